//! Default constants for atlas configuration.
//!
//! All magic numbers are centralized here with documentation.

// =============================================================================
// Dataset Defaults
// =============================================================================

/// Default path of the occurrence parquet file.
pub const DEFAULT_DATASET_PATH: &str = "data/dragonfly_database.parquet";

// =============================================================================
// Map Defaults
// =============================================================================

/// Environment variable consulted first for the map-tile token.
pub const TOKEN_ENV_VAR: &str = "MAPBOX_TOKEN";

/// Fallback token file, read when the environment variable is unset.
pub const DEFAULT_TOKEN_FILE: &str = ".mapbox_token";

/// Default number of hexagons spanning the longitude extent.
pub const DEFAULT_HEX_RESOLUTION: u32 = 100;

/// Lower bound of the hexbin resolution control.
pub const MIN_HEX_RESOLUTION: u32 = 50;

/// Upper bound of the hexbin resolution control.
pub const MAX_HEX_RESOLUTION: u32 = 200;

/// Minimum cell occupancy on the unconstrained view.
/// Suppresses single-point noise when the whole dataset is shown.
pub const DEFAULT_MIN_COUNT_GLOBAL: u64 = 3;

/// Minimum cell occupancy once any filter is active.
/// Sparse filtered views must still render.
pub const DEFAULT_MIN_COUNT_FILTERED: u64 = 1;
