//! Province spreadsheet ingestion.
//!
//! This crate discovers `<province>_<year>.xlsx` files inside a dataset
//! folder, reads each workbook into a cleaned [`ProvinceTable`], and loads a
//! whole folder in one batch where a bad file is skipped and recorded
//! instead of aborting the run.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use taxmap_ingest::{list_dataset_folders, load_dataset};
//!
//! let folders = list_dataset_folders(Path::new("veriler/İllere Göre Tahsilat Tahakkuk (Yıllara Göre)"))?;
//! let dataset = load_dataset(&folders[0])?;
//! for warning in &dataset.warnings {
//!     eprintln!("{warning}");
//! }
//! ```
//!
//! [`ProvinceTable`]: taxmap_model::ProvinceTable

mod discovery;
mod error;
mod loader;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{
    DATA_DIR_NAME, DATASET_ROOT_NAME, MAP_FILE_NAME, ProvinceFile, list_dataset_folders,
    list_province_files, locate_data_root, parse_province_file_name,
};

// === Workbook Reading ===
pub use workbook::{
    EXPECTED_COLUMNS, FIRST_DATA_ROW, clean_cell, read_province_table, table_from_range,
};

// === Batch Loading ===
pub use loader::{LoadWarning, LoadedDataset, load_dataset, load_province_files};
