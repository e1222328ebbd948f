use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use taxmap_model::Amount;
use taxmap_report::{ProvinceFigures, RenderedMaps};

use crate::types::{CategorySummary, RenderResult};

pub fn print_summary(result: &RenderResult) {
    println!("Folder: {}", result.folder.display());
    println!("Years: {}", result.year_label);
    println!(
        "Province files: {} matched, {} loaded",
        result.province_files, result.loaded_tables
    );
    println!("Map: {} provinces", result.map_provinces);
    if result.dry_run {
        println!("Output: dry run, nothing written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    for category in &result.categories {
        println!();
        print_category(category);
    }

    if !result.warnings.is_empty() {
        eprintln!();
        eprintln!("Warnings:");
        for warning in &result.warnings {
            eprintln!("- {warning}");
        }
    }
}

fn print_category(summary: &CategorySummary) {
    let maps = &summary.maps;
    println!("{} ({})", maps.title, maps.category_label);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Province"),
        header_cell("Source"),
        header_cell("Accrual"),
        header_cell("Collection"),
        header_cell("Ratio %"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for province in ordered_provinces(maps) {
        table.add_row(vec![
            province_cell(province),
            match &province.source_province {
                Some(source) if *source != province.name => Cell::new(source),
                Some(_) => dim_cell("="),
                None => dim_cell("-"),
            },
            amount_cell(province.accrual),
            amount_cell(province.collection),
            amount_cell(province.ratio),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} provinces", maps.matched_count()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", maps.totals.accrual)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", maps.totals.collection)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", maps.totals.overall_ratio)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !maps.absent.is_empty() {
        println!("Category missing in: {}", maps.absent.join(", "));
    }
    for name in &maps.unresolved {
        println!(
            "Not on the map: {} (looked up as '{}')",
            name.province, name.canonical
        );
    }
    for conflict in &maps.conflicts {
        println!(
            "Name conflict on '{}': joined {}, ignored {}",
            conflict.canonical, conflict.joined, conflict.ignored
        );
    }
    if !summary.written.is_empty() {
        let mut files = Table::new();
        files.set_header(vec!["Written"]);
        apply_table_style(&mut files);
        for path in &summary.written {
            files.add_row(vec![path.display().to_string()]);
        }
        println!("{files}");
    }
}

/// Matched provinces first, each group by name.
fn ordered_provinces(maps: &RenderedMaps) -> Vec<&ProvinceFigures> {
    let mut ordered: Vec<&ProvinceFigures> = maps.provinces.iter().collect();
    ordered.sort_by(|a, b| {
        b.source_province
            .is_some()
            .cmp(&a.source_province.is_some())
            .then_with(|| a.name.cmp(&b.name))
    });
    ordered
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn province_cell(province: &ProvinceFigures) -> Cell {
    if province.source_province.is_some() {
        Cell::new(&province.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&province.name).fg(Color::Red)
    }
}

fn amount_cell(amount: Amount) -> Cell {
    match amount.value() {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
