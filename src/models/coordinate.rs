//! Coordinate records and DMS normalization.

use serde::{Deserialize, Serialize};

use crate::error::VerdokError;

/// Hemisphere letter as it appears in OSS coordinate sheets.
///
/// Latitude uses LU (north of the equator) / LS (south); longitude uses
/// BT (east of Greenwich) / BB (west).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse an OSS hemisphere code, case-insensitively.
    pub fn parse(code: &str, row: usize) -> Result<Self, VerdokError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "LU" => Ok(Hemisphere::North),
            "LS" => Ok(Hemisphere::South),
            "BT" => Ok(Hemisphere::East),
            "BB" => Ok(Hemisphere::West),
            _ => Err(VerdokError::BadHemisphere {
                row,
                code: code.to_string(),
            }),
        }
    }

    /// South and west are the negative half of each axis.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// Convert a degree/minute/second triple plus hemisphere into signed
/// decimal degrees.
///
/// Minutes and seconds outside [0, 60) are accepted as-is; the arithmetic
/// is applied without range checks, matching upstream OSS sheets that
/// occasionally carry overflowed components.
pub fn dms_to_dd(degree: f64, minute: f64, second: f64, hemisphere: Hemisphere) -> f64 {
    (degree + minute / 60.0 + second / 3600.0) * hemisphere.sign()
}

/// A normalized coordinate row: the unit every downstream stage consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Externally visible result row, identical in shape to [`CoordinateRecord`]
/// but kept separate so the output table stays decoupled from the pipeline's
/// internal record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<&CoordinateRecord> for OutputRow {
    fn from(rec: &CoordinateRecord) -> Self {
        Self {
            id: rec.id.clone(),
            longitude: rec.longitude,
            latitude: rec.latitude,
        }
    }
}
