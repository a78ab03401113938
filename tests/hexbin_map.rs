//! Tests for the spatial hexbin aggregation as driven by the filter
//! pipeline: grid geometry follows the filtered subset, cell identity is
//! stable, and the min-count policy switches with filter activity.

use dragonfly_atlas::filter::Selection;
use dragonfly_atlas::test_support::{generate_dataset, occurrence};
use dragonfly_atlas::{
    evaluate, hexbin, recompute, Dataset, FilterState, MapConfig,
};

mod support;

#[test]
fn geolocated_rows_are_fully_partitioned() {
    let dataset = generate_dataset(500, 31);
    let subset = evaluate(&dataset, &FilterState::default());
    let geolocated = subset
        .iter()
        .filter(|id| dataset.row(**id).geolocated().is_some())
        .count() as u64;

    let cells = hexbin(&dataset, &subset, 100, 1);
    let binned: u64 = cells.iter().map(|c| c.count).sum();
    assert_eq!(binned, geolocated);
}

#[test]
fn cell_identity_is_stable_for_identical_inputs() {
    let dataset = generate_dataset(200, 8);
    let subset = evaluate(&dataset, &FilterState::default());
    assert_eq!(
        hexbin(&dataset, &subset, 120, 1),
        hexbin(&dataset, &subset, 120, 1)
    );
}

#[test]
fn grid_extent_follows_the_filtered_subset() {
    // One cluster near Stockholm, one near Oslo; filtering to one country
    // re-derives the extent from the remaining points.
    let mut rows = Vec::new();
    for i in 0..10 {
        let mut occ = occurrence(i, "Sweden", None, None);
        occ.latitude = Some(59.3 + (i as f64) * 0.001);
        occ.longitude = Some(18.1 + (i as f64) * 0.001);
        rows.push(occ);
    }
    for i in 10..20 {
        let mut occ = occurrence(i, "Norway", None, None);
        occ.latitude = Some(59.9 + (i as f64) * 0.001);
        occ.longitude = Some(10.7 + (i as f64) * 0.001);
        rows.push(occ);
    }
    let dataset = Dataset::from_rows(rows);

    let mut state = FilterState::default();
    state.countries = ["Sweden".to_string()].into();
    let subset = evaluate(&dataset, &state);
    let cells = hexbin(&dataset, &subset, 50, 1);

    let total: u64 = cells.iter().map(|c| c.count).sum();
    assert_eq!(total, 10);
    for cell in &cells {
        assert!(cell.centroid_lon > 17.0, "extent must exclude Norway");
    }
}

#[test]
fn min_count_policy_switches_with_filter_activity() {
    // A lone faraway point vanishes from the global view (min 3) but
    // renders once a filter is active (min 1).
    let mut rows = Vec::new();
    for i in 0..8 {
        let mut occ = occurrence(i, "Sweden", None, None);
        occ.latitude = Some(59.3);
        occ.longitude = Some(18.1);
        rows.push(occ);
    }
    let mut lone = occurrence(8, "Norway", None, None);
    lone.latitude = Some(70.0);
    lone.longitude = Some(25.0);
    rows.push(lone);
    let dataset = Dataset::from_rows(rows);
    let map = MapConfig::default();

    let global = recompute(&dataset, &FilterState::default(), &map);
    assert_eq!(global.map.len(), 1, "the lone point is suppressed");
    assert_eq!(global.map[0].count, 8);

    let mut narrowed = FilterState::default();
    narrowed.countries = ["Norway".to_string()].into();
    let filtered = recompute(&dataset, &narrowed, &map);
    assert_eq!(filtered.map.len(), 1, "sparse filtered views still render");
    assert_eq!(filtered.map[0].count, 1);
}

#[test]
fn resolution_controls_cell_granularity() {
    let dataset = generate_dataset(800, 77);
    let subset = evaluate(&dataset, &FilterState::default());

    let coarse = hexbin(&dataset, &subset, 50, 1).len();
    let fine = hexbin(&dataset, &subset, 200, 1).len();
    assert!(
        fine >= coarse,
        "finer grids cannot produce fewer occupied cells for this spread"
    );
}

#[test]
fn filtered_to_nothing_yields_an_empty_map() {
    let dataset = support::mixed_dataset();
    let mut state = FilterState::default();
    state.sex = Selection::from_control("Hermaphrodite");
    let subset = evaluate(&dataset, &state);
    assert!(hexbin(&dataset, &subset, 100, 1).is_empty());
}
