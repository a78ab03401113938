//! # Error Taxonomy
//!
//! Two classes of failure exist: fatal startup errors (missing token, missing
//! or malformed dataset) and invalid field names arriving from the control
//! surface. Zero matching rows is never an error; aggregators return empty
//! results for it.

use std::fmt;
use std::path::PathBuf;

/// Fatal initialization failure. Aborts the process before any view is built.
#[derive(Debug)]
pub enum StartupError {
    /// No map-tile token in the environment or on disk.
    MissingToken { env_var: String, token_file: PathBuf },
    /// The dataset file could not be read or decoded.
    Dataset { path: PathBuf, message: String },
    /// The dataset lacks one of the expected schema columns.
    MissingColumn { path: PathBuf, column: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken {
                env_var,
                token_file,
            } => write!(
                f,
                "could not load map token: set the {} environment variable to your token string, \
                 or create a token file at {}",
                env_var,
                token_file.display()
            ),
            Self::Dataset { path, message } => {
                write!(f, "could not load dataset {}: {}", path.display(), message)
            }
            Self::MissingColumn { path, column } => write!(
                f,
                "dataset {} is missing expected column '{}'",
                path.display(),
                column
            ),
        }
    }
}

impl std::error::Error for StartupError {}

/// An unrecognized grouping or filter field name reached the core.
///
/// A well-formed control surface never produces this; it is detected rather
/// than silently mis-aggregating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFieldError {
    pub field: String,
}

impl InvalidFieldError {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl fmt::Display for InvalidFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized field name: '{}'", self.field)
    }
}

impl std::error::Error for InvalidFieldError {}
