//! Conservation-area layer from the Satu Peta ArcGIS REST service.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::convert;
use crate::models::{Feature, LayerKind, ReferenceLayer};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Value,
    #[serde(default)]
    geometry: Value,
}

/// Query every conservation-area polygon from the map service.
///
/// The upstream server presents an incomplete certificate chain, so
/// verification is disabled for this one client, as the original service
/// consumer does.
pub async fn fetch_conservation(url: &str) -> Result<ReferenceLayer> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(url)
        .query(&[("where", "1=1"), ("outFields", "*"), ("f", "geojson")])
        .send()
        .await
        .context("conservation layer request failed")?
        .error_for_status()
        .context("conservation layer request rejected")?;

    let collection: FeatureCollection = response
        .json()
        .await
        .context("conservation layer response is not a feature collection")?;

    let features = parse_features(collection);
    info!(features = features.len(), "conservation layer loaded");
    Ok(ReferenceLayer::new(LayerKind::Conservation, features))
}

fn parse_features(collection: FeatureCollection) -> Vec<Feature> {
    let mut features = Vec::new();
    for feat in collection.features {
        match convert::geojson_geometry(&feat.geometry) {
            Some(geometry) => {
                features.push(Feature::new(convert::attributes(&feat.properties), geometry))
            }
            None => debug!("skipping conservation feature without polygon geometry"),
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let raw = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"namobj": "Area X"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[106.0, -7.0], [108.0, -7.0], [108.0, -5.0], [106.0, -7.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"namobj": "No geometry"},
                    "geometry": null
                }
            ]
        });
        let collection: FeatureCollection = serde_json::from_value(raw).unwrap();
        let features = parse_features(collection);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].attribute("namobj"), Some("Area X"));
    }
}
