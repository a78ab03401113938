//! # Dragonfly Atlas
//!
//! The filter-state-to-derived-views core behind interactive occurrence
//! dashboards: an immutable dataset loaded once at startup, a per-session
//! set of filter selections, and a pure recompute pipeline producing scalar
//! counts, a grouped bar aggregation, a spatial hexbin aggregation, and
//! dependent dropdown option lists that stay consistent with each other on
//! every change.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod hexbin;
pub mod model;
pub mod options;
pub mod test_support;
pub mod view;

// Re-export main types for convenience
pub use aggregate::{count_distinct_species, count_occurrences, grouped_counts, GroupCount};
pub use config::{resolve_map_token, AtlasConfig, MapConfig};
pub use dataset::Dataset;
pub use error::{InvalidFieldError, StartupError};
pub use filter::{evaluate, FilterEvent, FilterState, Selection, Subset};
pub use hexbin::{hexbin, CellId, HexCell};
pub use model::{Field, Occurrence, RowId};
pub use options::{dependent_options, OptionDimension};
pub use view::{recompute, DashboardView};

use std::sync::Arc;

/// Main handle: the loaded dataset plus configuration.
///
/// Created once per process; the dataset lives behind an `Arc` and is shared
/// read-only by every session, so no locking is ever required.
pub struct Atlas {
    dataset: Arc<Dataset>,
    config: AtlasConfig,
    map_token: String,
}

impl Atlas {
    /// Run the full startup sequence: resolve the map-tile token, then load
    /// the dataset.
    ///
    /// # Errors
    /// [`StartupError`] on a missing token or an unreadable/incomplete
    /// dataset. Both are fatal and must surface before any UI is served.
    pub fn boot(config: AtlasConfig) -> Result<Self, StartupError> {
        let map_token = config::resolve_map_token(&config.map)?;
        let dataset = Dataset::load(&config.data.path)?;
        Ok(Self {
            dataset: Arc::new(dataset),
            config,
            map_token,
        })
    }

    /// Build an atlas around an already-constructed dataset (synthetic data,
    /// tests). Token resolution is skipped.
    pub fn with_dataset(dataset: Dataset, config: AtlasConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config,
            map_token: String::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// The resolved map-tile token, for the presentation layer.
    pub fn map_token(&self) -> &str {
        &self.map_token
    }

    /// Open a new UI session with default (unconstrained) filter state.
    pub fn session(&self) -> Session {
        let mut state = FilterState::default();
        state.hex_resolution = self.config.map.hex_resolution.clamp(
            self.config.map.hex_resolution_min,
            self.config.map.hex_resolution_max,
        );
        Session {
            dataset: Arc::clone(&self.dataset),
            map: self.config.map.clone(),
            state,
        }
    }
}

/// One UI session: its own filter state over the shared dataset.
///
/// Sessions never share mutable state; they are created per user and
/// discarded when the user leaves.
pub struct Session {
    dataset: Arc<Dataset>,
    map: MapConfig,
    state: FilterState,
}

impl Session {
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Apply one control change and recompute every derived view.
    ///
    /// # Errors
    /// [`InvalidFieldError`] for an unrecognized grouping name; the state is
    /// left unchanged and no view is produced.
    pub fn apply(&mut self, event: FilterEvent) -> Result<DashboardView, InvalidFieldError> {
        let bounds = self.map.hex_resolution_min..=self.map.hex_resolution_max;
        self.state.apply_event(event, bounds)?;
        Ok(self.view())
    }

    /// Recompute the derived views for the current state (initial render).
    pub fn view(&self) -> DashboardView {
        view::recompute(&self.dataset, &self.state, &self.map)
    }

    /// Static region dropdown choices; unlike the dependent options these
    /// never change after load.
    pub fn region_options(&self) -> Vec<String> {
        self.dataset.region_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn atlas() -> Atlas {
        Atlas::with_dataset(
            test_support::generate_dataset(200, 9),
            AtlasConfig::default(),
        )
    }

    #[test]
    fn test_sessions_are_independent() {
        let atlas = atlas();
        let mut first = atlas.session();
        let second = atlas.session();

        first
            .apply(FilterEvent::Sex("F".to_string()))
            .unwrap();
        assert!(first.state().sex.is_active());
        assert!(!second.state().sex.is_active());
    }

    #[test]
    fn test_apply_returns_refreshed_views() {
        let atlas = atlas();
        let mut session = atlas.session();
        let initial = session.view();
        let narrowed = session
            .apply(FilterEvent::Countries(["Sweden".to_string()].into()))
            .unwrap();
        assert!(narrowed.occurrences <= initial.occurrences);
        assert!(narrowed.occurrences > 0);
    }

    #[test]
    fn test_invalid_grouping_leaves_state_untouched() {
        let atlas = atlas();
        let mut session = atlas.session();
        let before = session.state().clone();
        assert!(session
            .apply(FilterEvent::Grouping("Wingspan".to_string()))
            .is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_session_resolution_starts_within_bounds() {
        let mut config = AtlasConfig::default();
        config.map.hex_resolution = 10_000;
        let atlas = Atlas::with_dataset(test_support::generate_dataset(10, 1), config);
        let session = atlas.session();
        assert_eq!(
            session.state().hex_resolution,
            atlas.config().map.hex_resolution_max
        );
    }
}
