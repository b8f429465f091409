//! Shapefile layers hosted as zipped bundles on Google Drive.
//!
//! A sharing link is resolved to its file id, the zip is downloaded and
//! extracted into a temp dir, and the first `.shp` member is read.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use geo::MultiPolygon;
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use tracing::{debug, info};

use crate::models::{Feature, LayerKind, ReferenceLayer};

/// Pull the file id out of a `drive.google.com/file/d/<id>/...` link.
pub fn drive_file_id(share_url: &str) -> Result<&str> {
    let after = share_url
        .split("/d/")
        .nth(1)
        .ok_or_else(|| anyhow!("not a Drive sharing link: {share_url}"))?;
    let id = after.split('/').next().unwrap_or(after);
    if id.is_empty() {
        return Err(anyhow!("empty file id in sharing link: {share_url}"));
    }
    Ok(id)
}

/// Download + extract + read one shapefile layer.
pub async fn fetch_shapefile_layer(kind: LayerKind, share_url: &str) -> Result<ReferenceLayer> {
    let file_id = drive_file_id(share_url)?;
    let download_url = format!("https://drive.google.com/uc?id={file_id}&export=download");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()
        .context("failed to build HTTP client")?;

    let bytes = client
        .get(&download_url)
        .send()
        .await
        .with_context(|| format!("{} archive download failed", kind.name()))?
        .error_for_status()
        .with_context(|| format!("{} archive download rejected", kind.name()))?
        .bytes()
        .await
        .context("reading archive body failed")?;

    let tmp = tempfile::Builder::new()
        .prefix("verdok-layer-")
        .tempdir()
        .context("failed to create temp dir")?;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_ref()))
        .with_context(|| format!("{} archive is not a zip", kind.name()))?;
    archive
        .extract(tmp.path())
        .context("failed to extract archive")?;

    let shp_path = find_shp(tmp.path())?
        .ok_or_else(|| anyhow!("no .shp member in {} archive", kind.name()))?;
    debug!(path = %shp_path.display(), "reading shapefile");

    let layer = read_shapefile(kind, &shp_path)?;
    info!(layer = kind.name(), features = layer.len(), "shapefile layer loaded");
    Ok(layer)
}

fn find_shp(dir: &Path) -> Result<Option<PathBuf>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("shp")) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Read polygon shapes with their dBASE attributes. Non-polygon shapes
/// are skipped.
pub fn read_shapefile(kind: LayerKind, path: &Path) -> Result<ReferenceLayer> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("failed to open shapefile {}", path.display()))?;

    let mut features = Vec::new();
    for shape_record in reader.iter_shapes_and_records() {
        let (shape, record) = shape_record.context("failed to read shapefile record")?;

        let geometry: MultiPolygon<f64> = match shape {
            Shape::Polygon(poly) => poly.into(),
            other => {
                debug!(shape = %other.shapetype(), "skipping non-polygon shape");
                continue;
            }
        };

        let mut attributes = HashMap::new();
        for (name, value) in record {
            if let Some(text) = field_value_to_string(value) {
                attributes.insert(name, text);
            }
        }

        features.push(Feature::new(attributes, geometry));
    }

    Ok(ReferenceLayer::new(kind, features))
}

fn field_value_to_string(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(s) => s,
        FieldValue::Memo(s) => Some(s),
        FieldValue::Numeric(n) => n.map(|n| n.to_string()),
        FieldValue::Float(f) => f.map(|f| f.to_string()),
        FieldValue::Double(d) => Some(d.to_string()),
        FieldValue::Integer(i) => Some(i.to_string()),
        FieldValue::Currency(c) => Some(c.to_string()),
        FieldValue::Logical(b) => b.map(|b| b.to_string()),
        FieldValue::Date(d) => {
            d.map(|d| format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
        }
        FieldValue::DateTime(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_file_id_from_share_link() {
        let url = "https://drive.google.com/file/d/16MnH27AofcSSr45jTvmopOZx4CMPxMKs/view?usp=sharing";
        assert_eq!(
            drive_file_id(url).unwrap(),
            "16MnH27AofcSSr45jTvmopOZx4CMPxMKs"
        );
    }

    #[test]
    fn test_drive_file_id_rejects_other_urls() {
        assert!(drive_file_id("https://example.com/foo.zip").is_err());
    }
}
