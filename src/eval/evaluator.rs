//! Evaluates the run geometry against each reference layer.

use tracing::debug;

use super::index::LayerIndex;
use crate::geometry::{CoreGeometry, POLYGON_ID};
use crate::models::verdict::row_attributes;
use crate::models::{LayerVerdict, MatchedRow, ReferenceLayer, ReferenceLayerSet};

/// Evaluate one layer: containment for point runs, intersection for
/// polygon runs.
pub fn evaluate(geometry: &CoreGeometry, layer: &ReferenceLayer) -> LayerVerdict {
    let index = LayerIndex::build(layer);
    let label_field = layer.kind.label_field();

    let mut match_count = 0usize;
    let mut matched_labels: Vec<String> = Vec::new();
    let mut matched_rows: Vec<MatchedRow> = Vec::new();

    let mut record_match = |id: &str, feature: &crate::models::Feature| {
        match_count += 1;
        if let Some(field) = label_field {
            if let Some(value) = feature.attribute(field) {
                if !matched_labels.iter().any(|l| l == value) {
                    matched_labels.push(value.to_string());
                }
            }
        }
        matched_rows.push(MatchedRow {
            id: id.to_string(),
            attributes: row_attributes(layer.kind, &feature.attributes),
        });
    };

    match geometry {
        CoreGeometry::Points(points) => {
            for (id, point) in points {
                for feature in index.containing(*point) {
                    record_match(id, &feature);
                }
            }
        }
        CoreGeometry::Polygon(polygon) => {
            for feature in index.intersecting(polygon) {
                record_match(POLYGON_ID, &feature);
            }
        }
    }

    debug!(
        layer = layer.kind.name(),
        features = layer.len(),
        matches = match_count,
        "layer evaluated"
    );

    LayerVerdict {
        kind: layer.kind,
        matched: match_count > 0,
        match_count,
        matched_labels,
        matched_rows,
    }
}

/// Evaluate every loaded layer in fixed order; absent layers are skipped.
pub fn evaluate_all(geometry: &CoreGeometry, set: &ReferenceLayerSet) -> Vec<LayerVerdict> {
    set.layers()
        .filter_map(|(kind, load)| match load.as_layer() {
            Some(layer) => Some(evaluate(geometry, layer)),
            None => {
                debug!(layer = kind.name(), "layer unavailable, skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, LayerKind, LayerLoad, ReferenceLayer};
    use geo::{polygon, MultiPolygon, Point};
    use std::collections::HashMap;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ]])
    }

    fn feature(label_field: &str, label: &str, geom: MultiPolygon<f64>) -> Feature {
        let mut attrs = HashMap::new();
        attrs.insert(label_field.to_string(), label.to_string());
        Feature::new(attrs, geom)
    }

    #[test]
    fn test_point_containment_records_label() {
        let layer = ReferenceLayer::new(
            LayerKind::Conservation,
            vec![feature("namobj", "Area X", square(106.0, -7.0, 108.0, -5.0))],
        );
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(107.0, -6.0))]);

        let verdict = evaluate(&geometry, &layer);
        assert!(verdict.matched);
        assert_eq!(verdict.match_count, 1);
        assert_eq!(verdict.matched_labels, vec!["Area X"]);
    }

    #[test]
    fn test_point_outside_no_match() {
        let layer = ReferenceLayer::new(
            LayerKind::Conservation,
            vec![feature("namobj", "Area X", square(0.0, 0.0, 1.0, 1.0))],
        );
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(107.0, -6.0))]);

        let verdict = evaluate(&geometry, &layer);
        assert!(!verdict.matched);
        assert_eq!(verdict.match_count, 0);
        assert!(verdict.matched_labels.is_empty());
        assert!(verdict.matched_rows.is_empty());
    }

    #[test]
    fn test_point_in_overlapping_features_matches_each() {
        let layer = ReferenceLayer::new(
            LayerKind::Conservation,
            vec![
                feature("namobj", "A", square(0.0, 0.0, 2.0, 2.0)),
                feature("namobj", "B", square(1.0, 1.0, 3.0, 3.0)),
            ],
        );
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(1.5, 1.5))]);

        let verdict = evaluate(&geometry, &layer);
        assert_eq!(verdict.match_count, 2);
        assert_eq!(verdict.matched_rows.len(), 2);
    }

    #[test]
    fn test_labels_deduplicated_first_seen_order() {
        let layer = ReferenceLayer::new(
            LayerKind::TwelveMile,
            vec![
                feature("WP", "Jawa Barat", square(0.0, 0.0, 2.0, 2.0)),
                feature("WP", "Jawa Barat", square(0.0, 0.0, 2.0, 2.0)),
                feature("WP", "Banten", square(0.0, 0.0, 2.0, 2.0)),
            ],
        );
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(1.0, 1.0))]);

        let verdict = evaluate(&geometry, &layer);
        assert_eq!(verdict.match_count, 3);
        assert_eq!(verdict.matched_labels, vec!["Jawa Barat", "Banten"]);
    }

    #[test]
    fn test_polygon_intersection() {
        let layer = ReferenceLayer::new(
            LayerKind::Conservation,
            vec![feature("namobj", "Area X", square(0.0, 0.0, 1.0, 1.0))],
        );
        let run_poly = polygon![
            (x: 0.5, y: 0.5),
            (x: 2.0, y: 0.5),
            (x: 2.0, y: 2.0),
            (x: 0.5, y: 2.0),
            (x: 0.5, y: 0.5),
        ];
        let verdict = evaluate(&CoreGeometry::Polygon(run_poly), &layer);
        assert!(verdict.matched);
        assert_eq!(verdict.matched_rows[0].id, POLYGON_ID);
    }

    #[test]
    fn test_feature_order_does_not_change_counts() {
        let a = feature("namobj", "A", square(0.0, 0.0, 2.0, 2.0));
        let b = feature("namobj", "B", square(1.0, 1.0, 3.0, 3.0));
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(1.5, 1.5))]);

        let fwd = evaluate(
            &geometry,
            &ReferenceLayer::new(LayerKind::Conservation, vec![a.clone(), b.clone()]),
        );
        let rev = evaluate(
            &geometry,
            &ReferenceLayer::new(LayerKind::Conservation, vec![b, a]),
        );
        assert_eq!(fwd.matched, rev.matched);
        assert_eq!(fwd.match_count, rev.match_count);
    }

    #[test]
    fn test_kkprl_rows_carry_permit_fields() {
        let mut attrs = HashMap::new();
        attrs.insert("NO_KKPRL".to_string(), "KKPRL-001".to_string());
        attrs.insert("NAMA_SUBJ".to_string(), "PT Contoh".to_string());
        let layer = ReferenceLayer::new(
            LayerKind::Kkprl,
            vec![Feature::new(attrs, square(0.0, 0.0, 1.0, 1.0))],
        );
        let geometry = CoreGeometry::Points(vec![("7".to_string(), Point::new(0.5, 0.5))]);

        let verdict = evaluate(&geometry, &layer);
        assert_eq!(verdict.matched_rows.len(), 1);
        let row = &verdict.matched_rows[0];
        assert_eq!(row.id, "7");
        assert_eq!(
            row.attributes,
            vec![
                ("NO_KKPRL".to_string(), "KKPRL-001".to_string()),
                ("NAMA_SUBJ".to_string(), "PT Contoh".to_string()),
            ]
        );
    }

    #[test]
    fn test_absent_layers_skipped() {
        let set = crate::models::ReferenceLayerSet::all_unavailable("offline");
        let geometry = CoreGeometry::Points(vec![("1".to_string(), Point::new(0.0, 0.0))]);
        assert!(evaluate_all(&geometry, &set).is_empty());

        let mut set = crate::models::ReferenceLayerSet::all_unavailable("offline");
        set.twelve_mile = LayerLoad::Loaded(ReferenceLayer::new(LayerKind::TwelveMile, vec![]));
        let verdicts = evaluate_all(&geometry, &set);
        assert_eq!(verdicts.len(), 1);
        assert!(!verdicts[0].matched);
    }
}
