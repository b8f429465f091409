//! KKPRL permit layer from a local ArcGIS-export JSON document.
//!
//! The export schema carries `attributes` plus `geometry.rings` per
//! feature; both are translated into the standard feature form. Features
//! without rings are dropped rather than failing the layer.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::convert;
use crate::models::{Feature, LayerKind, ReferenceLayer};

#[derive(Debug, Deserialize)]
struct KkprlDocument {
    #[serde(default)]
    features: Vec<KkprlFeature>,
}

#[derive(Debug, Deserialize)]
struct KkprlFeature {
    #[serde(default)]
    attributes: Value,
    #[serde(default)]
    geometry: Value,
}

/// Load the permit layer from disk.
pub fn load_kkprl(path: &Path) -> Result<ReferenceLayer> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read KKPRL file {}", path.display()))?;
    let document: KkprlDocument =
        serde_json::from_str(&raw).context("KKPRL file is not valid JSON")?;
    let layer = translate(document)?;
    info!(features = layer.len(), "KKPRL layer loaded");
    Ok(layer)
}

fn translate(document: KkprlDocument) -> Result<ReferenceLayer> {
    let mut features = Vec::new();
    for feat in document.features {
        match convert::esri_rings(&feat.geometry) {
            Some(geometry) => {
                features.push(Feature::new(convert::attributes(&feat.attributes), geometry))
            }
            None => debug!("dropping KKPRL feature without rings"),
        }
    }

    if features.is_empty() {
        return Err(anyhow!("no translatable features in KKPRL file"));
    }
    Ok(ReferenceLayer::new(LayerKind::Kkprl, features))
}
