//! Per-province tables loaded from one spreadsheet each.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Amount;

/// One category line of a province sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Category label as written in the sheet (trimmed), e.g. "1. Gelir Vergisi".
    pub label: String,
    pub accrual: Amount,
    pub collection: Amount,
    /// The collection ratio column as reported by the source file.
    pub ratio: Amount,
}

impl CategoryRow {
    pub fn new(
        label: impl Into<String>,
        accrual: Amount,
        collection: Amount,
        ratio: Amount,
    ) -> Self {
        Self {
            label: label.into(),
            accrual,
            collection,
            ratio,
        }
    }
}

/// The cleaned contents of a `<province>_<year>` spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceTable {
    /// Province name in the tabular-source spelling.
    pub province: String,
    pub year: u16,
    /// File the table was read from.
    pub source: PathBuf,
    pub rows: Vec<CategoryRow>,
}

impl ProvinceTable {
    pub fn new(province: impl Into<String>, year: u16, source: impl AsRef<Path>) -> Self {
        Self {
            province: province.into(),
            year,
            source: source.as_ref().to_path_buf(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: CategoryRow) {
        self.rows.push(row);
    }

    /// Category labels in sheet order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
