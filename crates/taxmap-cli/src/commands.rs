use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use taxmap_cli::config::Settings;
use taxmap_cli::pipeline::{OutputOptions, folder_name, resolve_dataset_folder, write_outputs};
use taxmap_cli::session::DashboardSession;
use taxmap_ingest::{list_dataset_folders, list_province_files};
use taxmap_transform::category_title;

use crate::cli::{CategoriesArgs, RenderArgs};
use crate::summary::apply_table_style;
use crate::types::{CategorySummary, RenderResult};

pub fn run_folders(settings: &Settings) -> Result<()> {
    let data_root = settings.data_root()?;
    let dataset_root = settings.dataset_root_dir(&data_root);
    let folders = list_dataset_folders(&dataset_root)
        .with_context(|| format!("list dataset folders in {}", dataset_root.display()))?;

    let mut table = Table::new();
    table.set_header(vec!["Folder", "Province files"]);
    apply_table_style(&mut table);
    for folder in folders {
        // A folder without matching files is listed, not fatal.
        let files = list_province_files(&folder).map_or(0, |files| files.len());
        table.add_row(vec![folder_name(&folder), files.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_categories(settings: &Settings, args: &CategoriesArgs) -> Result<()> {
    let data_root = settings.data_root()?;
    let folder =
        resolve_dataset_folder(&settings.dataset_root_dir(&data_root), args.folder.as_deref())?;
    let session = DashboardSession::open(&folder, &settings.map_path(&data_root))?;

    println!("Folder: {} ({})", folder_name(&folder), session.year_label());
    let mut table = Table::new();
    table.set_header(vec!["Category", "Title"]);
    apply_table_style(&mut table);
    for label in session.categories() {
        let title = category_title(&label);
        table.add_row(vec![label, title]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_render(settings: &Settings, args: &RenderArgs) -> Result<RenderResult> {
    let data_root = settings.data_root()?;
    let folder =
        resolve_dataset_folder(&settings.dataset_root_dir(&data_root), args.folder.as_deref())?;
    let span = info_span!("render_command", folder = %folder_name(&folder));
    let _guard = span.enter();
    let start = Instant::now();

    let mut session = DashboardSession::open(&folder, &settings.map_path(&data_root))?;
    let dataset = session.dataset();
    let mut result = RenderResult {
        folder: folder.clone(),
        output_dir: settings.output_dir.clone(),
        year_label: dataset.year_label(),
        province_files: dataset.matched_files,
        loaded_tables: dataset.province_count(),
        map_provinces: session.map().len(),
        categories: Vec::new(),
        warnings: dataset.warnings.iter().map(ToString::to_string).collect(),
        dry_run: args.dry_run,
    };

    let options = OutputOptions {
        archive: !args.no_archive,
        svg: args.svg,
    };
    for category in &args.categories {
        let maps = session
            .render(category)
            .with_context(|| format!("render category '{category}'"))?
            .clone();
        let written = if args.dry_run {
            Vec::new()
        } else {
            write_outputs(&maps, &settings.output_dir, options)?
        };
        result.categories.push(CategorySummary { maps, written });
    }

    info!(
        categories = result.categories.len(),
        rendered = session.cache().len(),
        duration_ms = start.elapsed().as_millis(),
        "render command complete"
    );
    Ok(result)
}
