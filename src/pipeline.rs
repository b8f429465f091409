//! One verification run: records → geometry → per-layer verdicts → report.

use crate::error::VerdokError;
use crate::eval;
use crate::geometry::{self, CoreGeometry, ShapeKind};
use crate::models::{CoordinateRecord, LayerVerdict, OutputRow, ReferenceLayerSet};

/// Everything a run produces, for display and export.
#[derive(Debug)]
pub struct RunOutcome {
    /// The normalized result table, post-truncation.
    pub table: Vec<OutputRow>,
    /// Input exceeded the row cap and was cut to the first 50 records.
    pub truncated: bool,
    pub verdicts: Vec<LayerVerdict>,
    pub report: eval::Report,
    /// Kept for the export step.
    pub geometry: CoreGeometry,
}

/// Execute one run over an immutable layer-set snapshot.
pub fn run(
    records: Vec<CoordinateRecord>,
    shape: ShapeKind,
    layers: &ReferenceLayerSet,
) -> Result<RunOutcome, VerdokError> {
    let built = geometry::build(records, shape)?;

    let verdicts = eval::evaluate_all(&built.geometry, layers);
    let report = eval::report(&verdicts);

    Ok(RunOutcome {
        table: built.records.iter().map(OutputRow::from).collect(),
        truncated: built.truncated,
        verdicts,
        report,
        geometry: built.geometry,
    })
}
