//! Unified configuration for the atlas dashboard core.
//!
//! Configuration is loaded with precedence: CLI args > Env vars > Config file > Defaults
//!
//! # Example config file (atlas.toml)
//! ```toml
//! [data]
//! path = "data/dragonfly_database.parquet"
//!
//! [map]
//! token_file = ".mapbox_token"
//! hex_resolution = 100
//! ```

mod defaults;

pub use defaults::*;

use crate::error::StartupError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the atlas core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Dataset location
    pub data: DataConfig,
    /// Map and hexbin tuning
    pub map: MapConfig,
}

impl AtlasConfig {
    /// Load configuration with precedence: CLI args > Env > File > Defaults
    ///
    /// # Arguments
    /// * `config_path` - Optional path to TOML config file
    /// * `overrides` - CLI overrides to apply on top
    pub fn load(
        config_path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(AtlasConfig::default()));

        // Layer 1: Config file (if provided)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 2: Environment variables with ATLAS_ prefix
        figment = figment.merge(Env::prefixed("ATLAS_").split("__"));

        // Layer 3: CLI overrides
        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(ConfigError::from)
    }

    /// Load from environment and optional config file only (no CLI overrides)
    pub fn from_env(config_path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load(config_path, ConfigOverrides::default())
    }
}

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the occurrence parquet file
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

/// Map and hexbin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Token file consulted when the environment variable is unset
    pub token_file: PathBuf,
    /// Default hexbin resolution for new sessions
    pub hex_resolution: u32,
    /// Lower bound of the resolution control
    pub hex_resolution_min: u32,
    /// Upper bound of the resolution control
    pub hex_resolution_max: u32,
    /// Minimum cell occupancy on the unconstrained view
    pub min_count_global: u64,
    /// Minimum cell occupancy once any filter is active
    pub min_count_filtered: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            hex_resolution: DEFAULT_HEX_RESOLUTION,
            hex_resolution_min: MIN_HEX_RESOLUTION,
            hex_resolution_max: MAX_HEX_RESOLUTION,
            min_count_global: DEFAULT_MIN_COUNT_GLOBAL,
            min_count_filtered: DEFAULT_MIN_COUNT_FILTERED,
        }
    }
}

/// CLI overrides that take precedence over file and env config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataOverrides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_resolution: Option<u32>,
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// Resolve the map-tile token: environment variable first, then the token
/// file. Must succeed before anything is served.
///
/// # Errors
/// [`StartupError::MissingToken`] when neither source yields a token.
pub fn resolve_map_token(map: &MapConfig) -> Result<String, StartupError> {
    let env_value = std::env::var(TOKEN_ENV_VAR).ok();
    resolve_token(env_value.as_deref(), &map.token_file)
}

fn resolve_token(env_value: Option<&str>, token_file: &Path) -> Result<String, StartupError> {
    if let Some(raw) = env_value {
        let token = raw.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    if let Ok(raw) = std::fs::read_to_string(token_file) {
        let token = raw.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    Err(StartupError::MissingToken {
        env_var: TOKEN_ENV_VAR.to_string(),
        token_file: token_file.to_path_buf(),
    })
}
