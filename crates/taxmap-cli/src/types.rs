use std::path::PathBuf;

use taxmap_report::RenderedMaps;

#[derive(Debug)]
pub struct RenderResult {
    pub folder: PathBuf,
    pub output_dir: PathBuf,
    pub year_label: String,
    pub province_files: usize,
    pub loaded_tables: usize,
    /// Provinces in the map geometry.
    pub map_provinces: usize,
    pub categories: Vec<CategorySummary>,
    /// Skipped or replaced province files.
    pub warnings: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct CategorySummary {
    pub maps: RenderedMaps,
    pub written: Vec<PathBuf>,
}
