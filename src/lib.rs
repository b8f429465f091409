//! Verdok - coordinate conversion and maritime spatial verification.
//!
//! Converts tabular coordinate sheets into point or polygon geometry and
//! checks it against Indonesian maritime and land-use boundary layers.

pub mod config;
pub mod error;
pub mod eval;
pub mod export;
pub mod geometry;
pub mod input;
pub mod layers;
pub mod models;
pub mod pipeline;

pub use error::VerdokError;
pub use geometry::{CoreGeometry, ShapeKind};
pub use models::{CoordinateRecord, LayerKind, LayerVerdict, OutputRow, Severity};
