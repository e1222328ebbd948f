//! Pipeline stages shared by the commands: dataset folder resolution and
//! writing rendered artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use taxmap_ingest::list_dataset_folders;
use taxmap_report::RenderedMaps;

/// Picks a dataset folder under `dataset_root`.
///
/// `requested` may be a folder name under the root or a path to an
/// existing directory; without it the first folder in name order is used.
pub fn resolve_dataset_folder(dataset_root: &Path, requested: Option<&str>) -> Result<PathBuf> {
    if let Some(requested) = requested {
        let as_path = Path::new(requested);
        if as_path.is_absolute() && as_path.is_dir() {
            return Ok(as_path.to_path_buf());
        }
    }

    let folders = list_dataset_folders(dataset_root)
        .with_context(|| format!("list dataset folders in {}", dataset_root.display()))?;
    let Some(requested) = requested else {
        // Non-empty: list_dataset_folders errors otherwise.
        return folders
            .into_iter()
            .next()
            .context("no dataset folders");
    };

    if let Some(folder) = folders.iter().find(|folder| folder_name(folder) == requested) {
        return Ok(folder.clone());
    }
    let as_path = Path::new(requested);
    if as_path.is_dir() {
        return Ok(as_path.to_path_buf());
    }
    let available: Vec<String> = folders.iter().map(|f| folder_name(f)).collect();
    bail!(
        "dataset folder '{requested}' not found; available: {}",
        available.join(", ")
    )
}

/// Final path component as text.
pub fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Which artifacts besides the PNG maps go to disk.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub archive: bool,
    /// Also write the SVG source of each map.
    pub svg: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            archive: true,
            svg: false,
        }
    }
}

/// Writes the three PNG maps and whatever `options` asks for on top.
pub fn write_outputs(
    maps: &RenderedMaps,
    output_dir: &Path,
    options: OutputOptions,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut files = maps.files();
    if !options.archive {
        files.retain(|(name, _)| *name != maps.names.archive);
    }
    if options.svg {
        files.extend(maps.source_files());
    }

    let mut written = Vec::new();
    for (name, bytes) in files {
        let path = output_dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    info!(
        category = %maps.category_label,
        files = written.len(),
        output_dir = %output_dir.display(),
        "artifacts written"
    );
    Ok(written)
}
