//! One complete render: three maps, the data export and the archive.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use taxmap_model::Amount;
use taxmap_transform::{
    JoinedMap, NameConflict, Selection, Totals, UnresolvedName, category_title,
};

use crate::bundle::{build_archive, joined_csv};
use crate::naming::{ArtifactNames, MapKind};
use crate::raster::Rasterizer;
use crate::svg::render_map_svg;

/// Per-province line of a rendered map set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceFigures {
    /// Map-spelling province name.
    pub name: String,
    pub source_province: Option<String>,
    pub accrual: Amount,
    pub collection: Amount,
    pub ratio: Amount,
}

/// Everything produced for one (year label, category) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMaps {
    pub year_label: String,
    pub category_label: String,
    pub title: String,
    pub names: ArtifactNames,
    pub accrual_svg: String,
    pub collection_svg: String,
    pub ratio_svg: String,
    pub accrual_png: Vec<u8>,
    pub collection_png: Vec<u8>,
    pub ratio_png: Vec<u8>,
    pub data_csv: Vec<u8>,
    pub archive: Vec<u8>,
    pub totals: Totals,
    pub provinces: Vec<ProvinceFigures>,
    /// Provinces whose table lacks the category.
    pub absent: Vec<String>,
    pub unresolved: Vec<UnresolvedName>,
    pub conflicts: Vec<NameConflict>,
}

impl RenderedMaps {
    pub fn svg(&self, kind: MapKind) -> &str {
        match kind {
            MapKind::Accrual => &self.accrual_svg,
            MapKind::Collection => &self.collection_svg,
            MapKind::Ratio => &self.ratio_svg,
        }
    }

    pub fn png(&self, kind: MapKind) -> &[u8] {
        match kind {
            MapKind::Accrual => &self.accrual_png,
            MapKind::Collection => &self.collection_png,
            MapKind::Ratio => &self.ratio_png,
        }
    }

    /// `(file name, contents)` of the PNG maps and the archive, archive last.
    pub fn files(&self) -> Vec<(&str, &[u8])> {
        let mut files: Vec<(&str, &[u8])> = MapKind::ALL
            .iter()
            .map(|&kind| (self.names.map(kind), self.png(kind)))
            .collect();
        files.push((self.names.archive.as_str(), self.archive.as_slice()));
        files
    }

    /// `(file name, contents)` of the SVG sources.
    pub fn source_files(&self) -> Vec<(&str, &[u8])> {
        MapKind::ALL
            .iter()
            .map(|&kind| (self.names.source(kind), self.svg(kind).as_bytes()))
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.provinces
            .iter()
            .filter(|province| province.source_province.is_some())
            .count()
    }
}

/// Renders the three maps of a joined selection and bundles them.
pub fn render_maps(
    rasterizer: &Rasterizer,
    year_label: &str,
    selection: &Selection,
    joined: &JoinedMap<'_>,
) -> Result<RenderedMaps> {
    let span = info_span!("render", year = year_label, category = %selection.key);
    let _guard = span.enter();
    let start = Instant::now();

    let title = category_title(&selection.label);
    let names = ArtifactNames::new(year_label, &title);
    let render = |kind: MapKind| {
        render_map_svg(joined, kind, &kind.title(year_label, &title))
            .with_context(|| format!("render {}", names.map(kind)))
    };
    let accrual_svg = render(MapKind::Accrual)?;
    let collection_svg = render(MapKind::Collection)?;
    let ratio_svg = render(MapKind::Ratio)?;
    let rasterize = |kind: MapKind, svg: &str| {
        rasterizer
            .render_png(svg)
            .with_context(|| format!("rasterize {}", names.map(kind)))
    };
    let accrual_png = rasterize(MapKind::Accrual, &accrual_svg)?;
    let collection_png = rasterize(MapKind::Collection, &collection_svg)?;
    let ratio_png = rasterize(MapKind::Ratio, &ratio_svg)?;
    let data_csv = joined_csv(joined)?;
    let archive = build_archive([
        (names.accrual_map.as_str(), accrual_png.as_slice()),
        (names.collection_map.as_str(), collection_png.as_slice()),
        (names.ratio_map.as_str(), ratio_png.as_slice()),
        (names.data_csv.as_str(), data_csv.as_slice()),
    ])
    .with_context(|| format!("build {}", names.archive))?;

    let provinces = joined
        .records
        .iter()
        .map(|record| ProvinceFigures {
            name: record.name().to_string(),
            source_province: record.source_province.clone(),
            accrual: record.accrual,
            collection: record.collection,
            ratio: record.ratio,
        })
        .collect();

    info!(
        archive_bytes = archive.len(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(RenderedMaps {
        year_label: year_label.to_string(),
        category_label: selection.label.clone(),
        title,
        names,
        accrual_svg,
        collection_svg,
        ratio_svg,
        accrual_png,
        collection_png,
        ratio_png,
        data_csv,
        archive,
        totals: joined.totals,
        provinces,
        absent: selection.absent.clone(),
        unresolved: joined.unresolved.clone(),
        conflicts: joined.conflicts.clone(),
    })
}
