//! Core data models for coordinate conversion and layer verification.

pub mod coordinate;
pub mod layer;
pub mod verdict;

pub use coordinate::{dms_to_dd, CoordinateRecord, Hemisphere, OutputRow};
pub use layer::{Feature, LayerKind, LayerLoad, ReferenceLayer, ReferenceLayerSet};
pub use verdict::{LayerVerdict, MatchedRow, Severity};
