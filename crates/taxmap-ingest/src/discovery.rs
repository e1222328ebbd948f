//! Data folder discovery and province file matching.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Name of the data folder searched for next to the working directory.
pub const DATA_DIR_NAME: &str = "veriler";

/// Folder under the data root holding one sub-folder per dataset.
pub const DATASET_ROOT_NAME: &str = "İllere Göre Tahsilat Tahakkuk (Yıllara Göre)";

/// Province geometry file under the data root.
pub const MAP_FILE_NAME: &str = "tr.json";

static PROVINCE_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)_(\d{4})\.(?i:xlsx)$").expect("province file pattern is valid")
});

/// A spreadsheet whose name matched the `<province>_<year>` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceFile {
    pub path: PathBuf,
    /// Province name with any numeric plate-code prefix removed.
    pub province: String,
    pub year: u16,
}

/// Returns the first candidate that is an existing directory.
pub fn locate_data_root(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        if candidate.is_dir() {
            debug!(path = %candidate.display(), "data folder found");
            return Ok(candidate.clone());
        }
    }
    Err(IngestError::DataRootNotFound {
        candidates: candidates.to_vec(),
    })
}

/// Lists dataset sub-folders of `root`, sorted by name.
pub fn list_dataset_folders(root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders: Vec<PathBuf> = read_entries(root)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect();
    if folders.is_empty() {
        return Err(IngestError::NoDatasetFolders {
            path: root.to_path_buf(),
        });
    }
    folders.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(folders)
}

/// Lists the province spreadsheets of a dataset folder, sorted by file name.
///
/// Files that do not match the naming pattern are skipped without error.
pub fn list_province_files(folder: &Path) -> Result<Vec<ProvinceFile>> {
    let mut files = Vec::new();
    for path in read_entries(folder)? {
        // Skip directories
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        // Excel lock files (`~$Ankara_2021.xlsx`) match the pattern but are not workbooks
        if name.starts_with("~$") {
            continue;
        }
        match parse_province_file_name(name) {
            Some((province, year)) => files.push(ProvinceFile {
                path: path.clone(),
                province,
                year,
            }),
            None => debug!(file = %name, "skipping file not named <province>_<year>.xlsx"),
        }
    }

    if files.is_empty() {
        return Err(IngestError::NoProvinceFiles {
            path: folder.to_path_buf(),
        });
    }

    // Sort by filename
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Splits a file name like `06_Ankara_2021.xlsx` into `("Ankara", 2021)`.
///
/// A leading all-digit segment is treated as a plate code and dropped; the
/// remaining segments keep their underscores (`03_Afyon_Karahisar` becomes
/// `Afyon_Karahisar`).
pub fn parse_province_file_name(file_name: &str) -> Option<(String, u16)> {
    let captures = PROVINCE_FILE_PATTERN.captures(file_name)?;
    let stem = captures.get(1)?.as_str();
    let year: u16 = captures.get(2)?.as_str().parse().ok()?;

    let province = match stem.split_once('_') {
        Some((code, rest)) if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) => rest,
        _ => stem,
    };
    if province.trim().is_empty() {
        return None;
    }
    Some((province.to_string(), year))
}

fn read_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    Ok(paths)
}
