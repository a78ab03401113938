//! # Derived Dashboard View
//!
//! The explicit pure pipeline the presentation layer invokes on every filter
//! change: one evaluation pass, then every consumer of the subset recomputed
//! independently. There is no caching and no incremental update; the view is
//! rebuilt from the base dataset each time.

use crate::aggregate::{count_distinct_species, count_occurrences, grouped_counts, GroupCount};
use crate::config::MapConfig;
use crate::dataset::Dataset;
use crate::filter::{evaluate, FilterState};
use crate::hexbin::{hexbin, HexCell};
use crate::options::{dependent_options, OptionDimension};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every derived output for one filter state.
///
/// Ephemeral: rebuilt on each change, never cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Rows matching the current filters.
    pub occurrences: u64,
    /// Distinct species among them, nulls bucketed as `Unknown`.
    pub distinct_species: u64,
    /// Bar-chart data for the selected grouping variable.
    pub bar: Vec<GroupCount>,
    /// Occupied hexbin cells for the map.
    pub map: Vec<HexCell>,
    /// Refreshed dropdown choices, honoring the other active filters.
    pub species_options: Vec<String>,
    pub life_stage_options: Vec<String>,
    pub sex_options: Vec<String>,
}

impl DashboardView {
    /// Display string for the occurrences summary card.
    pub fn occurrences_label(&self) -> String {
        self.occurrences.to_string()
    }

    /// Display string for the species summary card.
    pub fn species_label(&self) -> String {
        self.distinct_species.to_string()
    }
}

/// Recompute all derived views from scratch.
///
/// The hexbin minimum-count threshold depends on whether any filter is
/// active: the unconstrained view suppresses single-point noise, while
/// narrow filtered views still render sparse cells.
pub fn recompute(dataset: &Dataset, state: &FilterState, map: &MapConfig) -> DashboardView {
    let subset = evaluate(dataset, state);
    let min_count = if state.is_unconstrained() {
        map.min_count_global
    } else {
        map.min_count_filtered
    };

    let view = DashboardView {
        occurrences: count_occurrences(&subset),
        distinct_species: count_distinct_species(dataset, &subset),
        bar: grouped_counts(dataset, &subset, state.grouping),
        map: hexbin(dataset, &subset, state.hex_resolution, min_count),
        species_options: dependent_options(dataset, state, OptionDimension::Species),
        life_stage_options: dependent_options(dataset, state, OptionDimension::LifeStage),
        sex_options: dependent_options(dataset, state, OptionDimension::Sex),
    };
    debug!(
        rows = subset.len(),
        groups = view.bar.len(),
        cells = view.map.len(),
        "recomputed dashboard view"
    );
    view
}
