//! Per-layer evaluation verdicts and report types.

use std::collections::HashMap;

use serde::Serialize;

use super::layer::LayerKind;

/// Message polarity for the user-facing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
}

/// One matched (input geometry, feature) pair, carrying the attributes the
/// layer's `id_fields` designate for tabular display.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    /// Id of the input point (or the synthetic polygon id).
    pub id: String,
    /// `id_field` name → attribute value, in the layer's field order.
    pub attributes: Vec<(String, String)>,
}

/// Outcome of evaluating the run geometry against one reference layer.
#[derive(Debug, Clone)]
pub struct LayerVerdict {
    pub kind: LayerKind,
    pub matched: bool,
    pub match_count: usize,
    /// Unique label-attribute values of matched features, first-seen order.
    pub matched_labels: Vec<String>,
    pub matched_rows: Vec<MatchedRow>,
}

impl LayerVerdict {
    /// Verdict for a layer with no matches.
    pub fn unmatched(kind: LayerKind) -> Self {
        Self {
            kind,
            matched: false,
            match_count: 0,
            matched_labels: Vec::new(),
            matched_rows: Vec::new(),
        }
    }
}

/// Extract this layer's row attributes from a feature attribute map.
pub fn row_attributes(kind: LayerKind, attrs: &HashMap<String, String>) -> Vec<(String, String)> {
    kind.id_fields()
        .iter()
        .map(|field| {
            let value = attrs.get(*field).cloned().unwrap_or_default();
            (field.to_string(), value)
        })
        .collect()
}
