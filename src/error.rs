//! Structural error taxonomy for a verification run.
//!
//! Only errors that must abort the run live here; reference-layer load
//! failures degrade to [`crate::models::LayerLoad::Unavailable`] instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerdokError {
    /// A column required by the selected coordinate format is absent.
    #[error("required column '{column}' missing for {format} input")]
    MissingField {
        column: &'static str,
        format: &'static str,
    },

    /// Hemisphere cell held something other than LU/LS/BT/BB.
    #[error("row {row}: unrecognized hemisphere code '{code}'")]
    BadHemisphere { row: usize, code: String },

    /// A numeric coordinate cell failed to parse.
    #[error("row {row}: column '{column}' is not a number: {value}")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Polygon mode needs at least 3 distinct vertices.
    #[error("polygon needs at least 3 distinct vertices, got {distinct}")]
    InsufficientVertices { distinct: usize },

    /// The input table had no data rows.
    #[error("input file contains no coordinate rows")]
    EmptyInput,

    #[error("failed to read input table")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VerdokError>;
