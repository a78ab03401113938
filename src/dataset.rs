//! # Dataset Store
//!
//! Loads the immutable occurrence dataset once at startup and exposes typed
//! rows to every other component. The columnar file is decoded with polars,
//! then converted into explicit [`Occurrence`] records so all downstream
//! computation runs over plain typed data.

use crate::error::StartupError;
use crate::model::{Occurrence, RowId, ALL, UNKNOWN};
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Columns the loader expects in the columnar file.
pub const SCHEMA_COLUMNS: [&str; 12] = [
    "gbifID",
    "occurrenceID",
    "country",
    "species",
    "genus",
    "sex",
    "lifeStage",
    "publisher",
    "basisOfRecord",
    "decimalLatitude",
    "decimalLongitude",
    "coordinateUncertaintyInMeters",
];

/// Read-only store for occurrence rows.
///
/// Created exactly once per process and shared (behind `Arc`) by every
/// session; never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Occurrence>,
    /// Sorted distinct countries, fixed at load time.
    countries: Vec<String>,
}

impl Dataset {
    /// Load the dataset from a parquet file.
    ///
    /// # Errors
    /// Returns [`StartupError`] if the file cannot be read or any schema
    /// column is absent. Both are fatal: the process must not serve without
    /// its dataset.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let file = File::open(path).map_err(|err| StartupError::Dataset {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let frame = ParquetReader::new(file)
            .finish()
            .map_err(|err| StartupError::Dataset {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let dataset = Self::from_frame(&frame, path)?;
        info!(
            rows = dataset.len(),
            countries = dataset.countries.len(),
            path = %path.display(),
            "loaded occurrence dataset"
        );
        Ok(dataset)
    }

    /// Build a dataset from an already-decoded frame. Exposed for loaders
    /// that stage frames differently in tests.
    pub fn from_frame(frame: &DataFrame, path: &Path) -> Result<Self, StartupError> {
        let gbif_id = i64_column(frame, path, "gbifID")?;
        let occurrence_id = str_column(frame, path, "occurrenceID")?;
        let country = str_column(frame, path, "country")?;
        let species = str_column(frame, path, "species")?;
        let genus = str_column(frame, path, "genus")?;
        let sex = str_column(frame, path, "sex")?;
        let life_stage = str_column(frame, path, "lifeStage")?;
        let publisher = str_column(frame, path, "publisher")?;
        let basis = str_column(frame, path, "basisOfRecord")?;
        let latitude = f64_column(frame, path, "decimalLatitude")?;
        let longitude = f64_column(frame, path, "decimalLongitude")?;
        let uncertainty = f64_column(frame, path, "coordinateUncertaintyInMeters")?;

        let mut rows = Vec::with_capacity(frame.height());
        for i in 0..frame.height() {
            rows.push(Occurrence {
                row: RowId(i as u32),
                gbif_id: gbif_id[i],
                occurrence_id: occurrence_id[i].clone(),
                // Required string columns degrade to the Unknown sentinel
                // instead of dropping the row.
                country: country[i].clone().unwrap_or_else(|| UNKNOWN.to_string()),
                species: species[i].clone(),
                genus: genus[i].clone(),
                sex: sex[i].clone(),
                life_stage: life_stage[i].clone(),
                publisher: publisher[i].clone().unwrap_or_else(|| UNKNOWN.to_string()),
                basis_of_record: basis[i].clone().unwrap_or_else(|| UNKNOWN.to_string()),
                latitude: latitude[i],
                longitude: longitude[i],
                uncertainty_m: uncertainty[i],
            });
        }

        Ok(Self::from_rows(rows))
    }

    /// Build a dataset directly from rows (synthetic datasets, tests).
    ///
    /// Row ids are rewritten to the dense storage order.
    pub fn from_rows(mut rows: Vec<Occurrence>) -> Self {
        for (i, row) in rows.iter_mut().enumerate() {
            row.row = RowId(i as u32);
        }
        let countries: BTreeSet<String> =
            rows.iter().map(|occ| occ.country.clone()).collect();
        Self {
            rows,
            countries: countries.into_iter().collect(),
        }
    }

    /// All rows in storage order.
    pub fn rows(&self) -> &[Occurrence] {
        &self.rows
    }

    /// Resolve a row id.
    ///
    /// # Panics
    /// Panics on an out-of-range id: subsets are always derived from this
    /// dataset, so a dangling id is a caller bug and must fail loudly.
    pub fn row(&self, id: RowId) -> &Occurrence {
        &self.rows[id.0 as usize]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct countries present in the full dataset.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Static region dropdown choices: `All` followed by every country.
    ///
    /// Unlike species/life-stage/sex this list never depends on other
    /// filters.
    pub fn region_options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.countries.len() + 1);
        options.push(ALL.to_string());
        options.extend(self.countries.iter().cloned());
        options
    }
}

fn missing(path: &Path, column: &str) -> StartupError {
    StartupError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    }
}

fn decode(path: &Path, err: PolarsError) -> StartupError {
    StartupError::Dataset {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn str_column(
    frame: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<String>>, StartupError> {
    let series = frame
        .column(name)
        .map_err(|_| missing(path, name))?
        .cast(&DataType::String)
        .map_err(|err| decode(path, err))?;
    let chunked = series.str().map_err(|err| decode(path, err))?;
    Ok(chunked
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

fn f64_column(
    frame: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<f64>>, StartupError> {
    let series = frame
        .column(name)
        .map_err(|_| missing(path, name))?
        .cast(&DataType::Float64)
        .map_err(|err| decode(path, err))?;
    let chunked = series.f64().map_err(|err| decode(path, err))?;
    Ok(chunked.into_iter().collect())
}

fn i64_column(
    frame: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<i64>>, StartupError> {
    let series = frame
        .column(name)
        .map_err(|_| missing(path, name))?
        .cast(&DataType::Int64)
        .map_err(|err| decode(path, err))?;
    let chunked = series.i64().map_err(|err| decode(path, err))?;
    Ok(chunked.into_iter().collect())
}
