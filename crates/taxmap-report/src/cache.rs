//! Per-session cache of rendered map sets.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use anyhow::Result;
use tracing::debug;

use crate::render::RenderedMaps;

/// Cache key: the year label and the normalized category key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub year_label: String,
    pub category_key: String,
}

impl RenderKey {
    pub fn new(year_label: impl Into<String>, category_key: impl Into<String>) -> Self {
        Self {
            year_label: year_label.into(),
            category_key: category_key.into(),
        }
    }
}

/// Rendered output of one session. Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<RenderKey, RenderedMaps>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached maps for `key`, calling `render` only on a miss.
    ///
    /// A failed render leaves the cache unchanged.
    pub fn get_or_render<F>(&mut self, key: RenderKey, render: F) -> Result<&RenderedMaps>
    where
        F: FnOnce() -> Result<RenderedMaps>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                let key = entry.key();
                debug!(year = %key.year_label, category = %key.category_key, "render cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let maps = render()?;
                Ok(entry.insert(maps))
            }
        }
    }

    pub fn contains(&self, key: &RenderKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
