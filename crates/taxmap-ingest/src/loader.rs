//! Batch loading of a dataset folder.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, info_span, warn};

use taxmap_model::{ProvinceTable, year_label};

use crate::discovery::{ProvinceFile, list_province_files};
use crate::error::Result;
use crate::workbook::{missing_cells, read_province_table};

/// A recoverable problem with one province file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub province: String,
    pub year: u16,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.province, self.year, self.message)
    }
}

/// All province tables of one dataset folder.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub folder: PathBuf,
    /// Tables in file-name order, at most one per province.
    pub tables: Vec<ProvinceTable>,
    /// Years of the tables that loaded.
    pub years: BTreeSet<u16>,
    /// Files skipped or replaced during loading.
    pub warnings: Vec<LoadWarning>,
    /// Number of files that matched the naming pattern.
    pub matched_files: usize,
}

impl LoadedDataset {
    /// Looks up a table by its source-spelling province name.
    pub fn get(&self, province: &str) -> Option<&ProvinceTable> {
        self.tables.iter().find(|table| table.province == province)
    }

    pub fn province_count(&self) -> usize {
        self.tables.len()
    }

    /// The single year as text, or the mixed-years label.
    pub fn year_label(&self) -> String {
        year_label(&self.years)
    }

    /// Number of numeric cells that were blank or malformed across all tables.
    pub fn missing_cells(&self) -> usize {
        self.tables.iter().map(missing_cells).sum()
    }

    fn insert(&mut self, table: ProvinceTable) {
        match self
            .tables
            .iter_mut()
            .find(|existing| existing.province == table.province)
        {
            Some(existing) => {
                let message = format!(
                    "replaced by {} (duplicate province)",
                    table.source.display()
                );
                warn!(province = %existing.province, year = existing.year, %message, "duplicate province file");
                self.warnings.push(LoadWarning {
                    province: existing.province.clone(),
                    year: existing.year,
                    path: existing.source.clone(),
                    message,
                });
                *existing = table;
            }
            None => self.tables.push(table),
        }
    }
}

/// Discovers and loads every province spreadsheet of a dataset folder.
///
/// Discovery problems are returned as errors; problems with individual
/// files end up in [`LoadedDataset::warnings`].
pub fn load_dataset(folder: &Path) -> Result<LoadedDataset> {
    let span = info_span!("load", folder = %folder.display());
    let _guard = span.enter();
    let files = list_province_files(folder)?;
    let mut dataset = load_province_files(&files);
    dataset.folder = folder.to_path_buf();
    Ok(dataset)
}

/// Loads already-discovered files. Never fails as a whole.
pub fn load_province_files(files: &[ProvinceFile]) -> LoadedDataset {
    let start = Instant::now();
    let mut dataset = LoadedDataset {
        matched_files: files.len(),
        ..LoadedDataset::default()
    };

    for file in files {
        match read_province_table(file) {
            Ok(table) => dataset.insert(table),
            Err(error) => {
                warn!(
                    province = %file.province,
                    year = file.year,
                    %error,
                    "skipping province file"
                );
                dataset.warnings.push(LoadWarning {
                    province: file.province.clone(),
                    year: file.year,
                    path: file.path.clone(),
                    message: error.to_string(),
                });
            }
        }
    }
    dataset.years = dataset.tables.iter().map(|table| table.year).collect();

    info!(
        matched_files = dataset.matched_files,
        loaded = dataset.province_count(),
        skipped = dataset.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    dataset
}
