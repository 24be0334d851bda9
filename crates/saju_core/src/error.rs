//! Error types for dataset loading, label parsing, and configuration.
//!
//! The pillar calculation itself is total over `chrono::NaiveDateTime` and
//! never produces one of these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by `saju_core`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SajuError {
    /// Solar-term dataset file could not be read.
    #[error("failed to read solar-term dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank, non-comment dataset line is structurally invalid.
    #[error("solar-term dataset line {line}: {reason}")]
    SolarTermRecord { line: usize, reason: String },

    /// String is not a two-symbol stem-branch code.
    #[error("invalid pillar code: {0:?}")]
    InvalidPillar(String),

    /// Unrecognized five-element label.
    #[error("invalid five-element label: {0:?}")]
    InvalidElement(String),

    /// Unrecognized ten-god label.
    #[error("invalid ten-god label: {0:?}")]
    InvalidTenGod(String),

    /// Birth-time range not in the fixed twelve-slot list.
    #[error("invalid birth-time range: ({start}, {end})")]
    InvalidTimeRange { start: String, end: String },

    /// Configuration extraction failed.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for SajuError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SajuError>;
