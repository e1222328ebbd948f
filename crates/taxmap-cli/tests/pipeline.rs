//! End-to-end tests: data folder on disk to written maps.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use taxmap_cli::config::{Overrides, Settings};
use taxmap_cli::pipeline::{OutputOptions, resolve_dataset_folder, write_outputs};
use taxmap_cli::session::DashboardSession;
use taxmap_ingest::DATASET_ROOT_NAME;

const MAP: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "Adiyaman"},
         "geometry": {"type": "Polygon", "coordinates": [[[38, 37], [39, 37], [39, 38], [38, 38], [38, 37]]]}},
        {"type": "Feature", "properties": {"name": "Istanbul"},
         "geometry": {"type": "Polygon", "coordinates": [[[28, 41], [29, 41], [29, 42], [28, 42], [28, 41]]]}},
        {"type": "Feature", "properties": {"name": "Rize"},
         "geometry": {"type": "Polygon", "coordinates": [[[40, 40], [41, 40], [41, 41], [40, 41], [40, 40]]]}}
    ]
}"#;

fn write_province(path: &Path, rows: &[(&str, f64, f64)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 1, "İllere Göre Tahsilat Tahakkuk").unwrap();
    for (col, header) in ["Kalem", "Tahakkuk", "Tahsilat", "Tahsilat/Tahakkuk"]
        .iter()
        .enumerate()
    {
        worksheet.write_string(2, col as u16 + 1, *header).unwrap();
    }
    worksheet.write_string(3, 1, "Genel Bütçe Gelirleri").unwrap();
    for (offset, (label, accrual, collection)) in rows.iter().enumerate() {
        let row = 4 + offset as u32;
        worksheet.write_string(row, 1, *label).unwrap();
        worksheet.write_number(row, 2, *accrual).unwrap();
        worksheet.write_number(row, 3, *collection).unwrap();
        worksheet
            .write_number(row, 4, collection / accrual * 100.0)
            .unwrap();
    }
    workbook.save(path).unwrap();
}

/// `veriler/` with two dataset folders and the map.
fn write_data_root() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("veriler");
    let dataset_root = root.join(DATASET_ROOT_NAME);
    let first = dataset_root.join("2021");
    let second = dataset_root.join("2022");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();
    std::fs::write(root.join("tr.json"), MAP).unwrap();

    write_province(
        &first.join("02_Adıyaman_2021.xlsx"),
        &[("1. Gelir Vergisi", 200.0, 150.0), ("2. Kurumlar Vergisi", 50.0, 25.0)],
    );
    write_province(
        &first.join("34_İstanbul_2021.xlsx"),
        &[("1. GELİR VERGİSİ", 100.0, 100.0)],
    );
    std::fs::write(first.join("notlar.txt"), "x").unwrap();
    write_province(
        &second.join("Rize_2022.xlsx"),
        &[("1. Gelir Vergisi", 10.0, 5.0)],
    );
    (dir, root)
}

fn settings_for(root: &Path, output: &Path) -> Settings {
    Settings::defaults(output, None).layered(
        None,
        None,
        &Overrides {
            data_root: Some(root.to_path_buf()),
            output_dir: Some(output.to_path_buf()),
            ..Overrides::default()
        },
    )
}

#[test]
fn renders_and_writes_maps() {
    let (dir, root) = write_data_root();
    let output = dir.path().join("out");
    let settings = settings_for(&root, &output);

    let data_root = settings.data_root().unwrap();
    let folder = resolve_dataset_folder(&settings.dataset_root_dir(&data_root), None).unwrap();
    assert!(folder.ends_with("2021"));

    let mut session = DashboardSession::open(&folder, &settings.map_path(&data_root)).unwrap();
    assert_eq!(session.year_label(), "2021");
    assert_eq!(
        session.categories(),
        vec!["1. Gelir Vergisi", "2. Kurumlar Vergisi"]
    );

    let maps = session.render("1. Gelir Vergisi").unwrap().clone();
    assert_eq!(maps.totals.accrual, 300.0);
    assert_eq!(maps.totals.collection, 250.0);
    assert_eq!(maps.totals.overall_ratio, 83.33);
    assert_eq!(maps.matched_count(), 2);
    assert!(maps.unresolved.is_empty());

    let written = write_outputs(&maps, &settings.output_dir, OutputOptions::default()).unwrap();
    let mut names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "2021_Gelir Vergisi_Haritalar.zip",
            "2021_Gelir Vergisi_Tahakkuk_Haritasi.png",
            "2021_Gelir Vergisi_Tahsilat_Haritasi.png",
            "2021_Gelir Vergisi_Tahsilat_Orani_Haritasi.png",
        ]
    );
    assert!(written.iter().all(|path| path.is_file()));
    let png = std::fs::read(output.join("2021_Gelir Vergisi_Tahsilat_Haritasi.png")).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn repeated_categories_render_once() {
    let (dir, root) = write_data_root();
    let settings = settings_for(&root, &dir.path().join("out"));
    let data_root = settings.data_root().unwrap();
    let folder =
        resolve_dataset_folder(&settings.dataset_root_dir(&data_root), Some("2021")).unwrap();
    let mut session = DashboardSession::open(&folder, &settings.map_path(&data_root)).unwrap();

    session.render("1. Gelir Vergisi").unwrap();
    session.render("gelir vergisi").unwrap();
    assert_eq!(session.cache().len(), 1);

    let kurumlar = session.render("2. Kurumlar Vergisi").unwrap();
    assert_eq!(kurumlar.absent, vec!["İstanbul"]);
    assert_eq!(session.cache().len(), 2);
}

#[test]
fn archive_can_be_skipped() {
    let (dir, root) = write_data_root();
    let output = dir.path().join("out");
    let settings = settings_for(&root, &output);
    let data_root = settings.data_root().unwrap();
    let folder =
        resolve_dataset_folder(&settings.dataset_root_dir(&data_root), Some("2022")).unwrap();
    let mut session = DashboardSession::open(&folder, &settings.map_path(&data_root)).unwrap();

    let maps = session.render("Gelir Vergisi").unwrap().clone();
    let options = OutputOptions {
        archive: false,
        svg: false,
    };
    let written = write_outputs(&maps, &output, options).unwrap();
    assert_eq!(written.len(), 3);
    assert!(!output.join(&maps.names.archive).exists());
}

#[test]
fn svg_sources_are_written_on_request() {
    let (dir, root) = write_data_root();
    let output = dir.path().join("out");
    let settings = settings_for(&root, &output);
    let data_root = settings.data_root().unwrap();
    let folder =
        resolve_dataset_folder(&settings.dataset_root_dir(&data_root), Some("2022")).unwrap();
    let mut session = DashboardSession::open(&folder, &settings.map_path(&data_root)).unwrap();

    let maps = session.render("Gelir Vergisi").unwrap().clone();
    let options = OutputOptions {
        archive: true,
        svg: true,
    };
    let written = write_outputs(&maps, &output, options).unwrap();
    assert_eq!(written.len(), 7);
    let svg =
        std::fs::read_to_string(output.join("2022_Gelir Vergisi_Tahsilat_Orani_Haritasi.svg"))
            .unwrap();
    assert!(svg.contains("TR Geneli Tahsilat Oranı: 50.00%"));
}

#[test]
fn unknown_folder_lists_the_available_ones() {
    let (_dir, root) = write_data_root();
    let error = resolve_dataset_folder(&root.join(DATASET_ROOT_NAME), Some("2019")).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("2019"));
    assert!(message.contains("2021, 2022"));
}

#[test]
fn missing_map_is_fatal() {
    let (_dir, root) = write_data_root();
    let folder = root.join(DATASET_ROOT_NAME).join("2021");
    let error = DashboardSession::open(&folder, &root.join("missing.json")).unwrap_err();
    assert!(format!("{error:#}").contains("load province map"));
}
