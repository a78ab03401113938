//! Tests for the filter-to-derived-views pipeline.
//!
//! The key properties verified:
//!
//! 1. Identity filter - a default state passes every row
//! 2. Monotonicity - adding a constraint never grows the subset
//! 3. Null handling - nulls bucket as Unknown, never silently dropped
//! 4. Determinism - grouped output ordering is fully specified

use dragonfly_atlas::filter::Selection;
use dragonfly_atlas::test_support::generate_dataset;
use dragonfly_atlas::{
    count_distinct_species, count_occurrences, evaluate, grouped_counts, hexbin, Field,
    FilterState,
};

mod support;

#[test]
fn identity_filter_passes_every_row() {
    let dataset = generate_dataset(500, 42);
    let subset = evaluate(&dataset, &FilterState::default());
    assert_eq!(subset.len(), dataset.len());
}

#[test]
fn adding_constraints_never_grows_the_subset() {
    let dataset = generate_dataset(400, 7);

    let mut state = FilterState::default();
    let unconstrained = evaluate(&dataset, &state).len();

    state.countries = ["Sweden".to_string(), "Norway".to_string()].into();
    let by_country = evaluate(&dataset, &state).len();
    assert!(by_country <= unconstrained);

    state.sex = Selection::from_control("F");
    let by_sex = evaluate(&dataset, &state).len();
    assert!(by_sex <= by_country);

    state.max_uncertainty_m = Some(100.0);
    let by_uncertainty = evaluate(&dataset, &state).len();
    assert!(by_uncertainty <= by_sex);

    state.species = Selection::from_control("Aeshna cyanea");
    assert!(evaluate(&dataset, &state).len() <= by_uncertainty);
}

#[test]
fn country_filter_scenario() {
    let dataset = support::three_row_dataset();
    let mut state = FilterState::default();
    state.countries = ["USA".to_string()].into();

    let subset = evaluate(&dataset, &state);
    assert_eq!(subset.len(), 2);
    assert_eq!(count_occurrences(&subset), 2);
    assert_eq!(count_distinct_species(&dataset, &subset), 2);

    let groups = grouped_counts(&dataset, &subset, Field::Species);
    let pairs: Vec<(&str, u64)> = groups
        .iter()
        .map(|g| (g.label.as_str(), g.count))
        .collect();
    // Equal counts tie-break alphabetically.
    assert_eq!(pairs, [("A", 1), ("B", 1)]);
}

#[test]
fn null_uncertainty_is_excluded_under_a_threshold() {
    let dataset = support::mixed_dataset();
    let mut state = FilterState::default();
    state.max_uncertainty_m = Some(10.0);

    let subset = evaluate(&dataset, &state);
    // Rows 0 (5m) and 4 (8m) qualify; null-uncertainty rows 2 and 5 do not.
    assert_eq!(subset.len(), 2);
    for id in &subset {
        assert!(dataset.row(*id).uncertainty_m.unwrap() <= 10.0);
    }
}

#[test]
fn unknown_selection_matches_null_rows() {
    let dataset = support::mixed_dataset();
    let mut state = FilterState::default();
    state.species = Selection::from_control("Unknown");

    let subset = evaluate(&dataset, &state);
    assert_eq!(subset.len(), 2);
    for id in &subset {
        assert!(dataset.row(*id).species.is_none());
    }
}

#[test]
fn empty_result_is_a_valid_state_not_an_error() {
    let dataset = support::mixed_dataset();
    let mut state = FilterState::default();
    state.countries = ["Atlantis".to_string()].into();

    let subset = evaluate(&dataset, &state);
    assert!(subset.is_empty());
    assert_eq!(count_occurrences(&subset), 0);
    assert_eq!(count_distinct_species(&dataset, &subset), 0);
    assert!(grouped_counts(&dataset, &subset, Field::Species).is_empty());
    assert!(hexbin(&dataset, &subset, 100, 1).is_empty());
}

#[test]
fn evaluation_is_order_insensitive_and_repeatable() {
    let dataset = generate_dataset(250, 99);
    let mut state = FilterState::default();
    state.countries = ["Finland".to_string()].into();

    let first = evaluate(&dataset, &state);
    let second = evaluate(&dataset, &state);
    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0] < pair[1], "subset must be in ascending row order");
    }
}

#[test]
fn grouped_ordering_is_count_desc_then_label_asc() {
    let dataset = generate_dataset(600, 13);
    let subset = evaluate(&dataset, &FilterState::default());
    let groups = grouped_counts(&dataset, &subset, Field::Publisher);

    for pair in groups.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.count > b.count || (a.count == b.count && a.label < b.label),
            "ordering violated between {a:?} and {b:?}"
        );
    }
    let total: u64 = groups.iter().map(|g| g.count).sum();
    assert_eq!(total, subset.len() as u64);
}
