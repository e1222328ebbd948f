//! Reading one province workbook into a cleaned table.
//!
//! Sheet layout: rows 0-1 are titles, row 2 is the column header, row 3 is
//! a sub-header, and data starts at row 4. Column A is unused; columns B-E
//! hold the category label, accrual, collection and the reported ratio.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use taxmap_model::{Amount, CategoryRow, ProvinceTable};

use crate::discovery::ProvinceFile;
use crate::error::{IngestError, Result};

/// Used width of a valid sheet: the unused column plus four data columns.
pub const EXPECTED_COLUMNS: u32 = 5;

/// First sheet row (0-based) holding category data.
pub const FIRST_DATA_ROW: u32 = 4;

const LABEL_COLUMN: u32 = 1;
const ACCRUAL_COLUMN: u32 = 2;
const COLLECTION_COLUMN: u32 = 3;
const RATIO_COLUMN: u32 = 4;

/// Opens a province workbook and reads its first worksheet.
pub fn read_province_table(file: &ProvinceFile) -> Result<ProvinceTable> {
    let path = file.path.as_path();
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::workbook(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::workbook(path, e))?;
    table_from_range(&range, &file.province, file.year, path)
}

/// Builds a table from a worksheet range.
///
/// Positions are absolute sheet coordinates, so leading empty rows and
/// columns count towards the layout even though calamine trims them from
/// the range.
pub fn table_from_range(
    range: &Range<Data>,
    province: &str,
    year: u16,
    path: &Path,
) -> Result<ProvinceTable> {
    let Some((last_row, last_col)) = range.end() else {
        return Err(IngestError::Shape {
            path: path.to_path_buf(),
            expected: EXPECTED_COLUMNS,
            found: 0,
        });
    };
    let width = last_col + 1;
    if width != EXPECTED_COLUMNS {
        return Err(IngestError::Shape {
            path: path.to_path_buf(),
            expected: EXPECTED_COLUMNS,
            found: width,
        });
    }

    let mut table = ProvinceTable::new(province, year, path);
    let mut unlabeled = 0usize;
    for row in FIRST_DATA_ROW..=last_row {
        let Some(label) = cell_label(range.get_value((row, LABEL_COLUMN))) else {
            unlabeled += 1;
            continue;
        };
        table.push_row(CategoryRow::new(
            label,
            clean_cell(range.get_value((row, ACCRUAL_COLUMN))),
            clean_cell(range.get_value((row, COLLECTION_COLUMN))),
            clean_cell(range.get_value((row, RATIO_COLUMN))),
        ));
    }

    debug!(
        province,
        year,
        rows = table.len(),
        unlabeled_rows = unlabeled,
        missing_cells = missing_cells(&table),
        "workbook parsed"
    );
    Ok(table)
}

/// Coerces a sheet cell to an [`Amount`]; anything non-numeric is missing.
pub fn clean_cell(cell: Option<&Data>) -> Amount {
    match cell {
        Some(Data::Float(value)) => Amount::from_f64(*value),
        Some(Data::Int(value)) => Amount::from_f64(*value as f64),
        Some(Data::String(text)) => Amount::parse(text),
        _ => Amount::Missing,
    }
}

/// Counts missing numeric cells in a table.
pub(crate) fn missing_cells(table: &ProvinceTable) -> usize {
    table
        .rows
        .iter()
        .flat_map(|row| [row.accrual, row.collection, row.ratio])
        .filter(|amount| amount.is_missing())
        .count()
}

fn cell_label(cell: Option<&Data>) -> Option<String> {
    match cell {
        Some(Data::String(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}
