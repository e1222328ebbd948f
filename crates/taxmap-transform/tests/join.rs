//! Selection and join over whole tables.

use proptest::prelude::*;

use taxmap_geo::{Point, Polygon, ProvinceMap, ProvinceShape};
use taxmap_model::{Amount, CategoryRow, ProvinceTable};
use taxmap_transform::{collection_ratio, join_selection, select_category};

fn triangle(name: &str, offset: f64) -> ProvinceShape {
    ProvinceShape::new(
        name,
        vec![Polygon::new(vec![
            Point::new(offset, 0.0),
            Point::new(offset + 1.0, 0.0),
            Point::new(offset, 1.0),
            Point::new(offset, 0.0),
        ])],
    )
}

fn table(province: &str, accrual: f64, collection: f64) -> ProvinceTable {
    let mut table = ProvinceTable::new(province, 2021, format!("{province}_2021.xlsx"));
    table.push_row(CategoryRow::new(
        "1. Gelir Vergisi",
        Amount::from_f64(accrual),
        Amount::from_f64(collection),
        Amount::from_f64(collection / accrual * 100.0),
    ));
    table.push_row(CategoryRow::new(
        "2. Kurumlar Vergisi",
        Amount::from_f64(1.0),
        Amount::Missing,
        Amount::Missing,
    ));
    table
}

#[test]
fn two_province_scenario() {
    let tables = vec![table("X", 200.0, 150.0), table("Y", 100.0, 100.0)];
    let map = ProvinceMap::new(vec![triangle("X", 0.0), triangle("Y", 2.0), triangle("Z", 4.0)]);

    let selection = select_category(&tables, "1. Gelir Vergisi");
    let joined = join_selection(&map, &selection.rows);

    assert_eq!(joined.totals.accrual, 300.0);
    assert_eq!(joined.totals.collection, 250.0);
    assert_eq!(joined.totals.overall_ratio, 83.33);
    assert_eq!(joined.records[0].ratio, Amount::Number(75.0));
    assert_eq!(joined.records[1].ratio, Amount::Number(100.0));
    assert!(joined.records[2].accrual.is_missing());
}

#[test]
fn reconciled_names_reach_the_map() {
    let tables = vec![
        table("Afyon_Karahisar", 10.0, 5.0),
        table("K.Maraş", 10.0, 10.0),
        table("Kırıkkalae", 4.0, 1.0),
    ];
    let map = ProvinceMap::new(vec![
        triangle("Afyonkarahisar", 0.0),
        triangle("K. Maras", 2.0),
        triangle("Kinkkale", 4.0),
    ]);

    let selection = select_category(&tables, "gelir vergisi");
    let joined = join_selection(&map, &selection.rows);

    assert_eq!(joined.matched_count(), 3);
    assert!(joined.unresolved.is_empty());
    assert_eq!(joined.records[2].ratio, Amount::Number(25.0));
}

#[test]
fn a_category_missing_everywhere_leaves_the_map_empty() {
    let tables = vec![table("X", 1.0, 1.0)];
    let map = ProvinceMap::new(vec![triangle("X", 0.0)]);

    let selection = select_category(&tables, "Damga Vergisi");
    let joined = join_selection(&map, &selection.rows);

    assert_eq!(joined.records.len(), 1);
    assert_eq!(joined.matched_count(), 0);
    assert_eq!(joined.totals.overall_ratio, 0.0);
}

proptest! {
    #[test]
    fn ratio_is_defined_exactly_for_positive_inputs(
        accrual in -1.0e9f64..1.0e9,
        collection in -1.0e9f64..1.0e9,
    ) {
        let ratio = collection_ratio(Amount::from_f64(accrual), Amount::from_f64(collection));
        let accrual = Amount::from_f64(accrual);
        let collection = Amount::from_f64(collection);
        let defined = accrual.positive().is_some() && collection.positive().is_some();
        prop_assert_eq!(ratio.is_missing(), !defined);
    }
}
