//! Year labels used in titles and artifact names.

use std::collections::BTreeSet;

/// Label used when a folder mixes several years.
pub const MIXED_YEARS_LABEL: &str = "Yıllar";

/// Returns the single year as text, or [`MIXED_YEARS_LABEL`] otherwise.
pub fn year_label(years: &BTreeSet<u16>) -> String {
    match years.iter().next() {
        Some(year) if years.len() == 1 => year.to_string(),
        _ => MIXED_YEARS_LABEL.to_string(),
    }
}
