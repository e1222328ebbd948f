//! A loaded dataset and map with its render cache.

use std::path::Path;

use anyhow::{Context, Result};

use taxmap_geo::{ProvinceMap, load_province_map};
use taxmap_ingest::{LoadedDataset, load_dataset};
use taxmap_report::{Rasterizer, RenderCache, RenderKey, RenderedMaps, render_maps};
use taxmap_transform::{
    available_categories, join_selection, normalize_category_key, select_category,
};

/// State of one interactive session: a dataset folder, the province map,
/// and every map set rendered so far.
#[derive(Debug)]
pub struct DashboardSession {
    dataset: LoadedDataset,
    map: ProvinceMap,
    rasterizer: Rasterizer,
    cache: RenderCache,
}

impl DashboardSession {
    /// Loads a dataset folder and the province map.
    ///
    /// Discovery failures and an unreadable map are returned as errors;
    /// problems with single files end up in the dataset's warnings.
    pub fn open(folder: &Path, map_file: &Path) -> Result<Self> {
        let dataset = load_dataset(folder)
            .with_context(|| format!("load dataset {}", folder.display()))?;
        let map = load_province_map(map_file).context("load province map")?;
        Ok(Self::new(dataset, map))
    }

    pub fn new(dataset: LoadedDataset, map: ProvinceMap) -> Self {
        Self {
            dataset,
            map,
            rasterizer: Rasterizer::new(),
            cache: RenderCache::new(),
        }
    }

    pub fn dataset(&self) -> &LoadedDataset {
        &self.dataset
    }

    pub fn map(&self) -> &ProvinceMap {
        &self.map
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn year_label(&self) -> String {
        self.dataset.year_label()
    }

    /// Selectable category labels.
    pub fn categories(&self) -> Vec<String> {
        available_categories(&self.dataset.tables)
    }

    /// Runs select, join and render for `category`, once per session.
    pub fn render(&mut self, category: &str) -> Result<&RenderedMaps> {
        let year_label = self.dataset.year_label();
        let key = RenderKey::new(year_label.as_str(), normalize_category_key(category));
        self.cache.get_or_render(key, || {
            let selection = select_category(&self.dataset.tables, category);
            let joined = join_selection(&self.map, &selection.rows);
            render_maps(&self.rasterizer, &year_label, &selection, &joined)
        })
    }
}
