//! Tests for loading province workbooks from a dataset folder.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use taxmap_ingest::{IngestError, load_dataset};
use taxmap_model::Amount;

enum Cell<'a> {
    Num(f64),
    Text(&'a str),
    Blank,
}

fn write_cell(worksheet: &mut rust_xlsxwriter::Worksheet, row: u32, col: u16, cell: &Cell<'_>) {
    match cell {
        Cell::Num(value) => {
            worksheet.write_number(row, col, *value).unwrap();
        }
        Cell::Text(text) => {
            worksheet.write_string(row, col, *text).unwrap();
        }
        Cell::Blank => {}
    }
}

/// Writes a sheet in the published layout: two title rows, a header row,
/// a sub-header row, then one row per category in columns B-E.
fn write_province(path: &Path, rows: &[(&str, Cell<'_>, Cell<'_>, Cell<'_>)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 1, "İllere Göre Tahsilat Tahakkuk").unwrap();
    worksheet.write_string(1, 1, "(TL)").unwrap();
    for (col, header) in ["Kalem", "Tahakkuk", "Tahsilat", "Tahsilat/Tahakkuk"]
        .iter()
        .enumerate()
    {
        worksheet.write_string(2, col as u16 + 1, *header).unwrap();
    }
    worksheet.write_string(3, 1, "Genel Bütçe Gelirleri").unwrap();
    for (offset, (label, accrual, collection, ratio)) in rows.iter().enumerate() {
        let row = 4 + offset as u32;
        worksheet.write_string(row, 1, *label).unwrap();
        write_cell(worksheet, row, 2, accrual);
        write_cell(worksheet, row, 3, collection);
        write_cell(worksheet, row, 4, ratio);
    }
    workbook.save(path).unwrap();
}

#[test]
fn loads_tables_and_years() {
    let dir = TempDir::new().unwrap();
    write_province(
        &dir.path().join("X_2021.xlsx"),
        &[
            ("1. Gelir Vergisi", Cell::Num(200.0), Cell::Num(150.0), Cell::Num(75.0)),
            ("2. Kurumlar Vergisi", Cell::Num(10.004), Cell::Num(5.0), Cell::Num(49.98)),
        ],
    );
    write_province(
        &dir.path().join("Y_2021.xlsx"),
        &[("1. Gelir Vergisi", Cell::Num(100.0), Cell::Num(100.0), Cell::Num(100.0))],
    );
    std::fs::write(dir.path().join("readme.txt"), "not data").unwrap();

    let dataset = load_dataset(dir.path()).unwrap();

    assert_eq!(dataset.province_count(), 2);
    assert_eq!(dataset.matched_files, 2);
    assert!(dataset.warnings.is_empty());
    assert_eq!(dataset.year_label(), "2021");

    let x = dataset.get("X").expect("X loaded");
    let labels: Vec<&str> = x.labels().collect();
    assert_eq!(labels, vec!["1. Gelir Vergisi", "2. Kurumlar Vergisi"]);
    assert_eq!(x.rows[0].accrual, Amount::Number(200.0));
    assert_eq!(x.rows[1].accrual, Amount::Number(10.0));
}

#[test]
fn non_numeric_cells_become_missing_and_rows_are_kept() {
    let dir = TempDir::new().unwrap();
    write_province(
        &dir.path().join("34_İstanbul_2022.xlsx"),
        &[
            ("1. Gelir Vergisi", Cell::Text("gizli"), Cell::Num(150.0), Cell::Blank),
            ("2. KDV", Cell::Text("1.250,00"), Cell::Text(" 300 "), Cell::Text("-")),
        ],
    );

    let dataset = load_dataset(dir.path()).unwrap();
    let table = dataset.get("İstanbul").expect("plate code stripped");

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].accrual, Amount::Missing);
    assert_eq!(table.rows[0].collection, Amount::Number(150.0));
    assert_eq!(table.rows[0].ratio, Amount::Missing);
    assert_eq!(table.rows[1].accrual, Amount::Missing);
    assert_eq!(table.rows[1].collection, Amount::Number(300.0));
    assert_eq!(dataset.missing_cells(), 4);
    assert!(dataset.warnings.is_empty());
}

#[test]
fn bad_files_are_skipped_with_warnings() {
    let dir = TempDir::new().unwrap();
    write_province(
        &dir.path().join("Ankara_2021.xlsx"),
        &[("1. Gelir Vergisi", Cell::Num(1.0), Cell::Num(1.0), Cell::Num(100.0))],
    );
    std::fs::write(dir.path().join("Bolu_2021.xlsx"), b"this is not a workbook").unwrap();

    let mut narrow = Workbook::new();
    narrow
        .add_worksheet()
        .write_string(2, 1, "Kalem")
        .unwrap()
        .write_string(2, 2, "Tahakkuk")
        .unwrap();
    narrow.save(dir.path().join("Çorum_2021.xlsx")).unwrap();

    let dataset = load_dataset(dir.path()).unwrap();

    assert_eq!(dataset.province_count(), 1);
    assert_eq!(dataset.matched_files, 3);
    let skipped: Vec<&str> = dataset
        .warnings
        .iter()
        .map(|warning| warning.province.as_str())
        .collect();
    assert_eq!(skipped, vec!["Bolu", "Çorum"]);
    assert!(dataset.warnings[1].message.contains("expected 5 columns, found 3"));
    assert!(dataset.warnings[0].to_string().starts_with("Bolu (2021): "));
}

#[test]
fn duplicate_provinces_keep_the_later_file() {
    let dir = TempDir::new().unwrap();
    write_province(
        &dir.path().join("Ankara_2020.xlsx"),
        &[("1. Gelir Vergisi", Cell::Num(1.0), Cell::Num(1.0), Cell::Blank)],
    );
    write_province(
        &dir.path().join("Ankara_2021.xlsx"),
        &[("1. Gelir Vergisi", Cell::Num(2.0), Cell::Num(2.0), Cell::Blank)],
    );

    let dataset = load_dataset(dir.path()).unwrap();

    assert_eq!(dataset.province_count(), 1);
    assert_eq!(dataset.get("Ankara").unwrap().year, 2021);
    assert_eq!(dataset.warnings.len(), 1);
    assert_eq!(dataset.warnings[0].year, 2020);
    assert_eq!(dataset.year_label(), "2021");
}

#[test]
fn empty_folder_is_a_discovery_failure() {
    let dir = TempDir::new().unwrap();
    let err = load_dataset(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::NoProvinceFiles { .. }));
    assert!(err.is_discovery_failure());
}
