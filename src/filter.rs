//! # Filter State and Evaluation
//!
//! The set of currently selected constraints for one dashboard session, and
//! the pure evaluator that turns them into a row subset. Every constraint is
//! conjunctive; an inactive constraint (empty set, `All`, or `None`) filters
//! zero rows.
//!
//! Evaluation is deterministic and side-effect-free: identical inputs always
//! yield the identical subset, in ascending row order.

use crate::config::DEFAULT_HEX_RESOLUTION;
use crate::dataset::Dataset;
use crate::error::InvalidFieldError;
use crate::model::{Field, Occurrence, RowId, ALL, UNKNOWN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::warn;

/// The filtered row subset: ephemeral, recomputed fully on every change.
pub type Subset = Vec<RowId>;

/// Selected value of a single-choice categorical filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Constrain to one value; the literal `Unknown` selects internal nulls.
    Value(String),
}

impl Selection {
    /// Interpret a raw control value, mapping the `All` sentinel to no
    /// constraint.
    pub fn from_control(raw: &str) -> Self {
        if raw == ALL {
            Selection::All
        } else {
            Selection::Value(raw.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Value(_))
    }

    /// Equality test against a nullable column value. Internal nulls surface
    /// as the `Unknown` sentinel so they stay selectable, never dropped.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(selected) => value.unwrap_or(UNKNOWN) == selected,
        }
    }
}

/// The complete set of user-selected constraints for one session.
///
/// Every field independently defaults to its identity: a default state
/// constrains nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Multi-select country constraint; empty means unconstrained.
    pub countries: BTreeSet<String>,
    pub life_stage: Selection,
    pub sex: Selection,
    pub species: Selection,
    /// Upper bound on coordinate uncertainty in meters; `None` disables it.
    pub max_uncertainty_m: Option<f64>,
    /// Grouping variable feeding the bar aggregation.
    pub grouping: Field,
    /// Number of hexagons spanning the longitude extent of the map.
    pub hex_resolution: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            countries: BTreeSet::new(),
            life_stage: Selection::All,
            sex: Selection::All,
            species: Selection::All,
            max_uncertainty_m: None,
            grouping: Field::Country,
            hex_resolution: DEFAULT_HEX_RESOLUTION,
        }
    }
}

/// One `(dimension, new value)` control change from the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterEvent {
    /// Replace the country multi-select.
    Countries(BTreeSet<String>),
    /// Replace the life-stage selection (raw control value, `All` allowed).
    LifeStage(String),
    Sex(String),
    Species(String),
    /// Replace the uncertainty threshold; `None` clears it.
    MaxUncertainty(Option<f64>),
    /// Replace the grouping variable, by name as sent by the control.
    Grouping(String),
    /// Replace the hexbin resolution; clamped to the configured bounds.
    HexResolution(u32),
}

impl FilterState {
    /// Apply one control change.
    ///
    /// # Errors
    /// [`InvalidFieldError`] when a grouping event carries an unrecognized
    /// field name. State is left unchanged in that case.
    pub fn apply_event(
        &mut self,
        event: FilterEvent,
        resolution_bounds: RangeInclusive<u32>,
    ) -> Result<(), InvalidFieldError> {
        match event {
            FilterEvent::Countries(mut countries) => {
                // A control may hand back its own `All` sentinel; it means
                // unconstrained, never a country named "All".
                countries.remove(ALL);
                self.countries = countries;
            }
            FilterEvent::LifeStage(raw) => self.life_stage = Selection::from_control(&raw),
            FilterEvent::Sex(raw) => self.sex = Selection::from_control(&raw),
            FilterEvent::Species(raw) => self.species = Selection::from_control(&raw),
            FilterEvent::MaxUncertainty(limit) => self.max_uncertainty_m = limit,
            FilterEvent::Grouping(raw) => self.grouping = raw.parse()?,
            FilterEvent::HexResolution(requested) => {
                let clamped =
                    requested.clamp(*resolution_bounds.start(), *resolution_bounds.end());
                if clamped != requested {
                    warn!(requested, clamped, "hexbin resolution outside bounds");
                }
                self.hex_resolution = clamped;
            }
        }
        Ok(())
    }

    /// True when no row-filtering constraint is active. Grouping and
    /// resolution do not constrain rows.
    pub fn is_unconstrained(&self) -> bool {
        self.countries.is_empty()
            && !self.life_stage.is_active()
            && !self.sex.is_active()
            && !self.species.is_active()
            && self.max_uncertainty_m.is_none()
    }

    /// Country membership predicate; the empty set admits every row.
    pub fn country_ok(&self, occ: &Occurrence) -> bool {
        self.countries.is_empty() || self.countries.contains(&occ.country)
    }

    pub fn life_stage_ok(&self, occ: &Occurrence) -> bool {
        self.life_stage.admits(occ.life_stage.as_deref())
    }

    pub fn sex_ok(&self, occ: &Occurrence) -> bool {
        self.sex.admits(occ.sex.as_deref())
    }

    pub fn species_ok(&self, occ: &Occurrence) -> bool {
        self.species.admits(occ.species.as_deref())
    }

    /// Uncertainty threshold predicate. Rows with no recorded uncertainty
    /// are excluded while the threshold is active: the comparison is
    /// undefined for them.
    pub fn uncertainty_ok(&self, occ: &Occurrence) -> bool {
        match self.max_uncertainty_m {
            None => true,
            Some(limit) => occ.uncertainty_m.is_some_and(|value| value <= limit),
        }
    }

    /// Conjunction of every active constraint.
    pub fn passes(&self, occ: &Occurrence) -> bool {
        self.country_ok(occ)
            && self.life_stage_ok(occ)
            && self.sex_ok(occ)
            && self.species_ok(occ)
            && self.uncertainty_ok(occ)
    }
}

/// Evaluate the filter state over the dataset.
///
/// Pure and deterministic; returns matching rows in ascending row order.
pub fn evaluate(dataset: &Dataset, state: &FilterState) -> Subset {
    dataset
        .rows()
        .iter()
        .filter(|occ| state.passes(occ))
        .map(|occ| occ.row)
        .collect()
}
