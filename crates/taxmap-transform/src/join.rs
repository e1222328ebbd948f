//! Left join of a selection onto the province map.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use taxmap_geo::{ProvinceMap, ProvinceShape};
use taxmap_model::{Amount, SelectionRow, round2};
use taxmap_names::{canonical_province_name, is_corrected};

/// Collection as a percentage of accrual.
///
/// Defined only when both values are present and strictly positive;
/// anything else is missing, never zero.
///
/// ```
/// use taxmap_model::Amount;
/// use taxmap_transform::collection_ratio;
///
/// assert_eq!(
///     collection_ratio(Amount::Number(1_000_000.0), Amount::Number(900_000.0)),
///     Amount::Number(90.0)
/// );
/// assert_eq!(collection_ratio(Amount::Number(0.0), Amount::Number(5.0)), Amount::Missing);
/// ```
pub fn collection_ratio(accrual: Amount, collection: Amount) -> Amount {
    match (accrual.positive(), collection.positive()) {
        (Some(accrual), Some(collection)) => Amount::from_f64(collection / accrual * 100.0),
        _ => Amount::Missing,
    }
}

/// A map shape with the values joined onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord<'g> {
    pub shape: &'g ProvinceShape,
    /// Source-spelling province the values came from, `None` when unmatched.
    pub source_province: Option<String>,
    pub accrual: Amount,
    pub collection: Amount,
    pub reported_ratio: Amount,
    /// Ratio recomputed from accrual and collection.
    pub ratio: Amount,
}

impl<'g> JoinedRecord<'g> {
    fn unmatched(shape: &'g ProvinceShape) -> Self {
        Self {
            shape,
            source_province: None,
            accrual: Amount::Missing,
            collection: Amount::Missing,
            reported_ratio: Amount::Missing,
            ratio: Amount::Missing,
        }
    }

    fn matched(shape: &'g ProvinceShape, row: &SelectionRow) -> Self {
        Self {
            shape,
            source_province: Some(row.province.clone()),
            accrual: row.accrual,
            collection: row.collection,
            reported_ratio: row.reported_ratio,
            ratio: collection_ratio(row.accrual, row.collection),
        }
    }

    /// Map-spelling province name.
    pub fn name(&self) -> &'g str {
        &self.shape.name
    }

    pub fn is_matched(&self) -> bool {
        self.source_province.is_some()
    }
}

/// A selection row whose reconciled name matches no map shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedName {
    pub province: String,
    pub canonical: String,
}

/// Two selection rows that reconcile to the same map name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub canonical: String,
    /// The row that was joined.
    pub joined: String,
    /// The row that was left out.
    pub ignored: String,
}

/// Country-wide figures of a joined map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    /// Sum of every present accrual.
    pub accrual: f64,
    /// Sum of every present collection.
    pub collection: f64,
    /// Collection over accrual in percent, across records with a defined
    /// ratio. Zero when that accrual sum is zero.
    pub overall_ratio: f64,
}

/// Result of joining a selection onto the map.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedMap<'g> {
    /// One record per map shape, in map order.
    pub records: Vec<JoinedRecord<'g>>,
    pub unresolved: Vec<UnresolvedName>,
    pub conflicts: Vec<NameConflict>,
    pub totals: Totals,
}

impl JoinedMap<'_> {
    pub fn matched_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_matched()).count()
    }
}

/// Reconciles the selection's province names and left-joins it onto `map`.
///
/// Every shape gets a record; shapes without data have missing values.
/// Rows that reconcile to no shape are reported as unresolved, and when
/// two rows reconcile to the same name the first is joined and the
/// collision is reported.
pub fn join_selection<'g>(map: &'g ProvinceMap, rows: &[SelectionRow]) -> JoinedMap<'g> {
    let span = info_span!("join", rows = rows.len(), shapes = map.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut by_name: HashMap<&str, &SelectionRow> = HashMap::with_capacity(rows.len());
    let mut unresolved = Vec::new();
    let mut conflicts = Vec::new();
    for row in rows {
        let canonical = canonical_province_name(&row.province);
        if is_corrected(&row.province) {
            debug!(province = %row.province, canonical, "province name corrected");
        }
        if map.get(canonical).is_none() {
            warn!(province = %row.province, canonical, "province not found on the map");
            unresolved.push(UnresolvedName {
                province: row.province.clone(),
                canonical: canonical.to_string(),
            });
            continue;
        }
        match by_name.entry(canonical) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(existing) => {
                warn!(
                    canonical,
                    joined = %existing.get().province,
                    ignored = %row.province,
                    "two provinces reconcile to the same map name"
                );
                conflicts.push(NameConflict {
                    canonical: canonical.to_string(),
                    joined: existing.get().province.clone(),
                    ignored: row.province.clone(),
                });
            }
        }
    }

    let records: Vec<JoinedRecord<'g>> = map
        .shapes
        .iter()
        .map(|shape| match by_name.get(shape.name.as_str()) {
            Some(row) => JoinedRecord::matched(shape, row),
            None => JoinedRecord::unmatched(shape),
        })
        .collect();
    let totals = compute_totals(&records);

    let joined = JoinedMap {
        records,
        unresolved,
        conflicts,
        totals,
    };
    info!(
        matched = joined.matched_count(),
        unmatched_shapes = joined.records.len() - joined.matched_count(),
        unresolved = joined.unresolved.len(),
        duration_ms = start.elapsed().as_millis(),
        "join complete"
    );
    joined
}

/// Totals over joined records.
pub fn compute_totals(records: &[JoinedRecord<'_>]) -> Totals {
    let accrual: f64 = records.iter().filter_map(|r| r.accrual.value()).sum();
    let collection: f64 = records.iter().filter_map(|r| r.collection.value()).sum();

    // Provinces without a positive accrual stay out of the overall rate.
    let (ratio_accrual, ratio_collection) = records
        .iter()
        .filter_map(|r| Some((r.accrual.positive()?, r.collection.value()?)))
        .fold((0.0, 0.0), |(a, c), (ra, rc)| (a + ra, c + rc));
    let overall_ratio = if ratio_accrual == 0.0 {
        0.0
    } else {
        round2(ratio_collection / ratio_accrual * 100.0)
    };

    Totals {
        accrual: round2(accrual),
        collection: round2(collection),
        overall_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxmap_geo::{Point, Polygon};

    fn shape(name: &str) -> ProvinceShape {
        ProvinceShape::new(
            name,
            vec![Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 0.0),
            ])],
        )
    }

    fn row(province: &str, accrual: Amount, collection: Amount) -> SelectionRow {
        SelectionRow {
            province: province.to_string(),
            accrual,
            collection,
            reported_ratio: Amount::Missing,
        }
    }

    #[test]
    fn ratio_needs_two_positive_values() {
        assert_eq!(
            collection_ratio(Amount::Number(3.0), Amount::Number(1.0)),
            Amount::Number(33.33)
        );
        assert_eq!(collection_ratio(Amount::Number(0.0), Amount::Number(1.0)), Amount::Missing);
        assert_eq!(collection_ratio(Amount::Number(1.0), Amount::Number(0.0)), Amount::Missing);
        assert_eq!(collection_ratio(Amount::Number(-1.0), Amount::Number(1.0)), Amount::Missing);
        assert_eq!(collection_ratio(Amount::Missing, Amount::Number(1.0)), Amount::Missing);
    }

    #[test]
    fn every_shape_is_kept() {
        let map = ProvinceMap::new(vec![shape("Adiyaman"), shape("Bolu"), shape("Istanbul")]);
        let rows = vec![
            row("Adıyaman", Amount::Number(1_000_000.0), Amount::Number(900_000.0)),
            row("İstanbul", Amount::Number(10.0), Amount::Missing),
        ];

        let joined = join_selection(&map, &rows);

        assert_eq!(joined.records.len(), 3);
        let adiyaman = &joined.records[0];
        assert_eq!(adiyaman.source_province.as_deref(), Some("Adıyaman"));
        assert_eq!(adiyaman.ratio, Amount::Number(90.0));

        let bolu = &joined.records[1];
        assert!(!bolu.is_matched());
        assert!(bolu.accrual.is_missing());
        assert!(bolu.collection.is_missing());
        assert!(bolu.ratio.is_missing());

        assert!(joined.records[2].ratio.is_missing());
        assert!(joined.unresolved.is_empty());
        assert_eq!(joined.matched_count(), 2);
    }

    #[test]
    fn unknown_names_are_reported() {
        let map = ProvinceMap::new(vec![shape("Ankara")]);
        let rows = vec![row("Atlantis", Amount::Number(1.0), Amount::Number(1.0))];
        let joined = join_selection(&map, &rows);
        assert_eq!(
            joined.unresolved,
            vec![UnresolvedName {
                province: "Atlantis".to_string(),
                canonical: "Atlantis".to_string(),
            }]
        );
        assert!(!joined.records[0].is_matched());
    }

    #[test]
    fn colliding_names_keep_the_first_row() {
        let map = ProvinceMap::new(vec![shape("Istanbul")]);
        let rows = vec![
            row("İstanbul", Amount::Number(1.0), Amount::Number(1.0)),
            row("Istanbul", Amount::Number(2.0), Amount::Number(2.0)),
        ];
        let joined = join_selection(&map, &rows);
        assert_eq!(joined.records[0].accrual, Amount::Number(1.0));
        assert_eq!(
            joined.conflicts,
            vec![NameConflict {
                canonical: "Istanbul".to_string(),
                joined: "İstanbul".to_string(),
                ignored: "Istanbul".to_string(),
            }]
        );
    }

    #[test]
    fn overall_ratio_skips_zero_accrual() {
        let map = ProvinceMap::new(vec![shape("Ankara"), shape("Bolu")]);
        let rows = vec![
            row("Ankara", Amount::Number(100.0), Amount::Number(50.0)),
            row("Bolu", Amount::Number(0.0), Amount::Number(30.0)),
        ];
        let totals = join_selection(&map, &rows).totals;
        assert_eq!(totals.overall_ratio, 50.0);
        assert_eq!(totals.accrual, 100.0);
        assert_eq!(totals.collection, 80.0);
    }

    #[test]
    fn overall_ratio_counts_zero_collection() {
        let map = ProvinceMap::new(vec![shape("Ankara"), shape("Bolu")]);
        let rows = vec![
            row("Ankara", Amount::Number(100.0), Amount::Number(50.0)),
            row("Bolu", Amount::Number(100.0), Amount::Number(0.0)),
        ];
        let joined = join_selection(&map, &rows);
        assert!(joined.records[1].ratio.is_missing());
        assert_eq!(joined.totals.accrual, 200.0);
        assert_eq!(joined.totals.collection, 50.0);
        assert_eq!(joined.totals.overall_ratio, 25.0);
    }

    #[test]
    fn totals_without_accrual_are_zero() {
        let map = ProvinceMap::new(vec![shape("Ankara")]);
        let totals = join_selection(&map, &[]).totals;
        assert_eq!(totals, Totals::default());
    }
}
