//! # Data Model
//!
//! Core data structures for the occurrence dashboard: typed occurrence
//! records, row identifiers, and the enumerated categorical fields used for
//! filtering and grouping.
//!
//! Nullable categorical columns hold true `None` internally; the literal
//! `Unknown` category is substituted only at the presentation boundary
//! (option lists, grouping keys, distinct-species buckets).

use crate::error::InvalidFieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation sentinel for internal nulls in categorical columns.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel control value meaning "no constraint" for a filter dimension.
pub const ALL: &str = "All";

/// Compact identifier for dataset rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RowId(pub u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}

/// One recorded observation of a specimen at a place and time.
///
/// Immutable once loaded; the application only ever filters read-only views
/// of these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Dense row index within the dataset.
    pub row: RowId,
    /// GBIF record identifier.
    pub gbif_id: Option<i64>,
    /// Source occurrence identifier.
    pub occurrence_id: Option<String>,
    /// Country or region of the observation.
    pub country: String,
    /// Binomial species name.
    pub species: Option<String>,
    /// Genus name.
    pub genus: Option<String>,
    /// Recorded sex of the specimen.
    pub sex: Option<String>,
    /// Life stage at observation time.
    pub life_stage: Option<String>,
    /// Publishing institution.
    pub publisher: String,
    /// GBIF basis-of-record category.
    pub basis_of_record: String,
    /// Decimal latitude, if georeferenced.
    pub latitude: Option<f64>,
    /// Decimal longitude, if georeferenced.
    pub longitude: Option<f64>,
    /// Coordinate uncertainty in meters.
    pub uncertainty_m: Option<f64>,
}

impl Occurrence {
    /// Latitude/longitude pair for rows that carry both coordinates.
    pub fn geolocated(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Raw value of a categorical field; `None` for internal nulls.
    pub fn categorical(&self, field: Field) -> Option<&str> {
        match field {
            Field::Country => Some(self.country.as_str()),
            Field::Species => self.species.as_deref(),
            Field::Genus => self.genus.as_deref(),
            Field::Sex => self.sex.as_deref(),
            Field::LifeStage => self.life_stage.as_deref(),
            Field::Publisher => Some(self.publisher.as_str()),
            Field::BasisOfRecord => Some(self.basis_of_record.as_str()),
        }
    }

    /// Grouping key for a categorical field, nulls mapped to [`UNKNOWN`].
    pub fn group_key(&self, field: Field) -> &str {
        self.categorical(field).unwrap_or(UNKNOWN)
    }
}

/// Categorical fields a user can group or filter by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Field {
    Country,
    Species,
    Genus,
    Sex,
    LifeStage,
    Publisher,
    BasisOfRecord,
}

impl Field {
    /// Every recognized grouping variable, in control-surface order.
    pub const ALL_FIELDS: [Field; 7] = [
        Field::Country,
        Field::Species,
        Field::Genus,
        Field::Sex,
        Field::LifeStage,
        Field::Publisher,
        Field::BasisOfRecord,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Country => "Country",
            Field::Species => "Species",
            Field::Genus => "Genus",
            Field::Sex => "Sex",
            Field::LifeStage => "LifeStage",
            Field::Publisher => "Publisher",
            Field::BasisOfRecord => "BasisOfRecord",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = InvalidFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Country" => Ok(Field::Country),
            // Older control surfaces label the country dimension "Region".
            "Region" => Ok(Field::Country),
            "Species" => Ok(Field::Species),
            "Genus" => Ok(Field::Genus),
            "Sex" => Ok(Field::Sex),
            "LifeStage" => Ok(Field::LifeStage),
            "Publisher" => Ok(Field::Publisher),
            "BasisOfRecord" => Ok(Field::BasisOfRecord),
            other => Err(InvalidFieldError::new(other)),
        }
    }
}
