//! Category label matching and display titles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use taxmap_model::ProvinceTable;

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal prefix pattern is valid"));

fn strip_ordinal(label: &str) -> &str {
    let trimmed = label.trim();
    match ORDINAL_PREFIX.find(trimmed) {
        Some(prefix) => &trimmed[prefix.end()..],
        None => trimmed,
    }
}

/// Lowercases with the Turkish dotted capital I folded to a plain `i`, so
/// `GELİR` and `Gelir` compare equal.
fn fold_case(c: char) -> impl Iterator<Item = char> {
    let folded = if c == 'İ' { 'i' } else { c };
    folded.to_lowercase()
}

/// Matching key of a category label.
///
/// The leading `<digits>.` ordinal and the whitespace after it are removed,
/// inner whitespace runs collapse to one space, and the result is lowercased.
///
/// ```
/// use taxmap_transform::normalize_category_key;
///
/// assert_eq!(normalize_category_key(" 1.  Gelir   Vergisi "), "gelir vergisi");
/// assert_eq!(normalize_category_key("GELİR VERGİSİ"), "gelir vergisi");
/// ```
pub fn normalize_category_key(label: &str) -> String {
    strip_ordinal(label)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .flat_map(fold_case)
        .collect()
}

/// Display title of a category label: ordinal removed, then each word
/// capitalized with the rest lowercased (`"1. GELİR VERGİSİ"` becomes
/// `"Gelir Vergisi"`).
///
/// A word starts after any non-alphabetic character, so `"(KDV)"` becomes
/// `"(Kdv)"`.
pub fn category_title(label: &str) -> String {
    let mut title = String::with_capacity(label.len());
    let mut in_word = false;
    for c in strip_ordinal(label).chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(fold_case(c));
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}

/// Selectable category labels, taken from the first table in load order.
///
/// Labels are trimmed; later labels with an already seen key are dropped.
pub fn available_categories(tables: &[ProvinceTable]) -> Vec<String> {
    let Some(first) = tables.first() else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    first
        .labels()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(normalize_category_key(label)))
        .map(str::to_string)
        .collect()
}
