//! Builds the run geometry from normalized coordinate records.

use geo::{Coord, LineString, Point, Polygon};
use tracing::warn;

use crate::error::VerdokError;
use crate::models::CoordinateRecord;

/// Hard cap on input rows; anything beyond is rejected wholesale.
pub const MAX_INPUT_ROWS: usize = 100;
/// Rows kept when the cap is exceeded.
pub const TRUNCATE_TO: usize = 50;

/// Which geometry the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Point,
    Polygon,
}

/// Synthetic id attached to the single polygon record.
pub const POLYGON_ID: &str = "polygon_1";

/// The one geometry object a run evaluates and exports.
#[derive(Debug, Clone)]
pub enum CoreGeometry {
    /// One point per input record, in input order.
    Points(Vec<(String, Point<f64>)>),
    /// A single closed exterior ring over the input sequence.
    Polygon(Polygon<f64>),
}

/// Geometry plus the records it was actually built from (post-truncation).
#[derive(Debug, Clone)]
pub struct BuiltGeometry {
    pub geometry: CoreGeometry,
    pub records: Vec<CoordinateRecord>,
    pub truncated: bool,
}

/// Build the run geometry, applying the row cap first.
///
/// Truncation is a warning surfaced to the caller, not an error; too few
/// distinct polygon vertices aborts the run.
pub fn build(
    mut records: Vec<CoordinateRecord>,
    shape: ShapeKind,
) -> Result<BuiltGeometry, VerdokError> {
    if records.is_empty() {
        return Err(VerdokError::EmptyInput);
    }

    let truncated = records.len() > MAX_INPUT_ROWS;
    if truncated {
        warn!(
            rows = records.len(),
            kept = TRUNCATE_TO,
            "input exceeds {} coordinates, truncating",
            MAX_INPUT_ROWS
        );
        records.truncate(TRUNCATE_TO);
    }

    let geometry = match shape {
        ShapeKind::Point => CoreGeometry::Points(
            records
                .iter()
                .map(|r| (r.id.clone(), Point::new(r.longitude, r.latitude)))
                .collect(),
        ),
        ShapeKind::Polygon => CoreGeometry::Polygon(build_ring(&records)?),
    };

    Ok(BuiltGeometry {
        geometry,
        records,
        truncated,
    })
}

/// Build a closed exterior ring from the record sequence, in input order.
fn build_ring(records: &[CoordinateRecord]) -> Result<Polygon<f64>, VerdokError> {
    let mut ring: Vec<Coord<f64>> = records
        .iter()
        .map(|r| Coord {
            x: r.longitude,
            y: r.latitude,
        })
        .collect();

    let mut distinct: Vec<Coord<f64>> = Vec::new();
    for c in &ring {
        if !distinct.contains(c) {
            distinct.push(*c);
        }
    }
    if distinct.len() < 3 {
        return Err(VerdokError::InsufficientVertices {
            distinct: distinct.len(),
        });
    }

    // Close the ring if needed
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    Ok(Polygon::new(LineString::new(ring), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, lon: f64, lat: f64) -> CoordinateRecord {
        CoordinateRecord {
            id: id.to_string(),
            longitude: lon,
            latitude: lat,
        }
    }

    #[test]
    fn test_point_mode_preserves_order_and_ids() {
        let built = build(vec![rec("1", 107.0, -6.0), rec("2", 108.0, -7.0)], ShapeKind::Point)
            .unwrap();
        match built.geometry {
            CoreGeometry::Points(points) => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[0].0, "1");
                assert_eq!(points[0].1, Point::new(107.0, -6.0));
                assert_eq!(points[1].0, "2");
            }
            _ => panic!("expected points"),
        }
        assert!(!built.truncated);
    }

    #[test]
    fn test_open_ring_is_closed() {
        let built = build(
            vec![rec("1", 0.0, 0.0), rec("2", 1.0, 0.0), rec("3", 1.0, 1.0)],
            ShapeKind::Polygon,
        )
        .unwrap();
        match built.geometry {
            CoreGeometry::Polygon(poly) => {
                let ring = poly.exterior();
                assert_eq!(ring.0.len(), 4);
                assert_eq!(ring.0.first(), ring.0.last());
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn test_closed_ring_untouched() {
        let built = build(
            vec![
                rec("1", 0.0, 0.0),
                rec("2", 1.0, 0.0),
                rec("3", 1.0, 1.0),
                rec("4", 0.0, 0.0),
            ],
            ShapeKind::Polygon,
        )
        .unwrap();
        match built.geometry {
            CoreGeometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 4),
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn test_too_few_distinct_vertices() {
        let err = build(
            vec![rec("1", 0.0, 0.0), rec("2", 1.0, 0.0), rec("3", 0.0, 0.0)],
            ShapeKind::Polygon,
        )
        .unwrap_err();
        assert!(matches!(err, VerdokError::InsufficientVertices { .. }));
    }

    #[test]
    fn test_truncates_oversized_input_to_first_50() {
        let records: Vec<_> = (0..150)
            .map(|i| rec(&i.to_string(), i as f64 * 0.01, 0.0))
            .collect();
        let built = build(records, ShapeKind::Point).unwrap();
        assert!(built.truncated);
        assert_eq!(built.records.len(), TRUNCATE_TO);
        match built.geometry {
            CoreGeometry::Points(points) => {
                assert_eq!(points.len(), TRUNCATE_TO);
                assert_eq!(points[0].0, "0");
                assert_eq!(points[49].0, "49");
            }
            _ => panic!("expected points"),
        }
    }

    #[test]
    fn test_exactly_100_rows_not_truncated() {
        let records: Vec<_> = (0..100)
            .map(|i| rec(&i.to_string(), i as f64 * 0.01, 0.0))
            .collect();
        let built = build(records, ShapeKind::Point).unwrap();
        assert!(!built.truncated);
        assert_eq!(built.records.len(), 100);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            build(vec![], ShapeKind::Point).unwrap_err(),
            VerdokError::EmptyInput
        ));
    }
}
