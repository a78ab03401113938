//! # Dependent Option Recomputation
//!
//! Keeps the species/life-stage/sex dropdown choices consistent with the
//! other active filters, so a user can never select a combination that
//! matches zero rows. The target dimension's own selection is deliberately
//! ignored: a choice must not shrink its own option list to a singleton.

use crate::dataset::Dataset;
use crate::filter::FilterState;
use crate::model::{Occurrence, ALL, UNKNOWN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter dimensions whose dropdown choices follow the other active filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionDimension {
    Species,
    LifeStage,
    Sex,
}

impl OptionDimension {
    fn value<'a>(&self, occ: &'a Occurrence) -> Option<&'a str> {
        match self {
            OptionDimension::Species => occ.species.as_deref(),
            OptionDimension::LifeStage => occ.life_stage.as_deref(),
            OptionDimension::Sex => occ.sex.as_deref(),
        }
    }
}

/// Valid choices for `target` given every *other* active constraint.
///
/// Returns the `All` sentinel followed by the sorted distinct values present
/// in the constrained view, nulls mapped to `Unknown`. Recomputed after
/// every change to any other dimension; a stale list that still offers
/// absent values is a correctness bug.
pub fn dependent_options(
    dataset: &Dataset,
    state: &FilterState,
    target: OptionDimension,
) -> Vec<String> {
    let mut values: BTreeSet<&str> = BTreeSet::new();
    for occ in dataset.rows() {
        if !state.country_ok(occ) || !state.uncertainty_ok(occ) {
            continue;
        }
        if target != OptionDimension::LifeStage && !state.life_stage_ok(occ) {
            continue;
        }
        if target != OptionDimension::Sex && !state.sex_ok(occ) {
            continue;
        }
        if target != OptionDimension::Species && !state.species_ok(occ) {
            continue;
        }
        values.insert(target.value(occ).unwrap_or(UNKNOWN));
    }

    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(ALL.to_string());
    options.extend(values.into_iter().map(str::to_string));
    options
}
