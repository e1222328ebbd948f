//! Error types for province data ingestion.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while discovering or reading province spreadsheets.
///
/// Discovery variants are fatal to a session. Workbook variants describe a
/// single file and are turned into [`LoadWarning`](crate::LoadWarning)s by
/// the batch loader.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// None of the candidate data folders exist.
    #[error("data folder not found (looked in: {})", join_paths(.candidates))]
    DataRootNotFound { candidates: Vec<PathBuf> },

    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset root has no sub-folders to choose from.
    #[error("no dataset folders found in {path}")]
    NoDatasetFolders { path: PathBuf },

    /// A dataset folder holds no `<province>_<year>.xlsx` files.
    #[error("no province spreadsheets found in {path}")]
    NoProvinceFiles { path: PathBuf },

    // === Workbook Errors ===
    /// The workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook contains no worksheet.
    #[error("workbook has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },

    /// The first worksheet does not have the expected column layout.
    #[error("unexpected sheet shape in {path}: expected {expected} columns, found {found}")]
    Shape {
        path: PathBuf,
        expected: u32,
        found: u32,
    },
}

impl IngestError {
    pub(crate) fn workbook(path: &Path, error: impl std::fmt::Display) -> Self {
        Self::Workbook {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Returns true for errors that end a session before any file is loaded.
    pub fn is_discovery_failure(&self) -> bool {
        matches!(
            self,
            Self::DataRootNotFound { .. }
                | Self::DirectoryNotFound { .. }
                | Self::DirectoryRead { .. }
                | Self::NoDatasetFolders { .. }
                | Self::NoProvinceFiles { .. }
        )
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
