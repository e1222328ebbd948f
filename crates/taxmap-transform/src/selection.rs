//! Extracting one category across all province tables.

use std::time::Instant;

use tracing::{debug, info, info_span};

use taxmap_model::{ProvinceTable, SelectionRow};

use crate::category::normalize_category_key;

/// One category pulled out of every province table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// The label as requested.
    pub label: String,
    /// Normalized matching key of `label`.
    pub key: String,
    /// One row per province that has the category, in table order.
    pub rows: Vec<SelectionRow>,
    /// Provinces whose table has no row with a matching key.
    pub absent: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the selection for `label`.
///
/// Matching is on [`normalize_category_key`]; when a table has several rows
/// with the same key, the first one is used. Provinces without a match are
/// recorded in [`Selection::absent`], never treated as errors.
pub fn select_category(tables: &[ProvinceTable], label: &str) -> Selection {
    let key = normalize_category_key(label);
    let span = info_span!("select", category = %key);
    let _guard = span.enter();
    let start = Instant::now();

    let mut selection = Selection {
        label: label.trim().to_string(),
        key,
        ..Selection::default()
    };
    for table in tables {
        let matched = table
            .rows
            .iter()
            .find(|row| normalize_category_key(&row.label) == selection.key);
        match matched {
            Some(row) => selection.rows.push(SelectionRow {
                province: table.province.clone(),
                accrual: row.accrual.rounded(),
                collection: row.collection.rounded(),
                reported_ratio: row.ratio.rounded(),
            }),
            None => {
                debug!(province = %table.province, "category not present");
                selection.absent.push(table.province.clone());
            }
        }
    }

    info!(
        provinces = selection.rows.len(),
        absent = selection.absent.len(),
        duration_ms = start.elapsed().as_millis(),
        "selection complete"
    );
    selection
}
