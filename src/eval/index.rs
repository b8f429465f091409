//! Per-layer spatial index with bounding-box prefiltering.

use std::sync::Arc;

use geo::{BoundingRect, Contains, Intersects, Point, Polygon};
use rstar::{RTree, RTreeObject, AABB};

use crate::models::{Feature, ReferenceLayer};

/// Wrapper for R-tree indexing of layer features
#[derive(Clone)]
pub struct IndexedFeature {
    pub feature: Arc<Feature>,
    /// Position in the layer's feature sequence; query results are sorted
    /// by this so matches come back in feature order, not tree order.
    ordinal: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedFeature {
    pub fn new(ordinal: usize, feature: Feature) -> Option<Self> {
        let rect = feature.geometry.bounding_rect()?;
        Some(Self {
            feature: Arc::new(feature),
            ordinal,
            envelope: AABB::from_corners(
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            ),
        })
    }
}

/// Spatial index over one reference layer's features.
pub struct LayerIndex {
    tree: RTree<IndexedFeature>,
}

impl LayerIndex {
    pub fn build(layer: &ReferenceLayer) -> Self {
        let indexed: Vec<IndexedFeature> = layer
            .features
            .iter()
            .cloned()
            .enumerate()
            .filter_map(|(ordinal, feature)| IndexedFeature::new(ordinal, feature))
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// All features whose polygons contain the point, in feature order.
    ///
    /// Envelope intersection prefilters candidates, exact containment
    /// decides.
    pub fn containing(&self, point: Point<f64>) -> Vec<Arc<Feature>> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        let matches = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|ind| ind.feature.geometry.contains(&point));
        in_feature_order(matches)
    }

    /// All features whose polygons intersect the given polygon, in
    /// feature order.
    pub fn intersecting(&self, polygon: &Polygon<f64>) -> Vec<Arc<Feature>> {
        let Some(rect) = polygon.bounding_rect() else {
            return Vec::new();
        };
        let envelope = AABB::from_corners(
            [rect.min().x, rect.min().y],
            [rect.max().x, rect.max().y],
        );
        let matches = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|ind| ind.feature.geometry.intersects(polygon));
        in_feature_order(matches)
    }
}

/// The R-tree yields candidates in traversal order; downstream label
/// de-duplication is first-seen, so restore the layer's feature order.
fn in_feature_order<'a>(matches: impl Iterator<Item = &'a IndexedFeature>) -> Vec<Arc<Feature>> {
    let mut hits: Vec<(usize, Arc<Feature>)> = matches
        .map(|ind| (ind.ordinal, Arc::clone(&ind.feature)))
        .collect();
    hits.sort_by_key(|(ordinal, _)| *ordinal);
    hits.into_iter().map(|(_, feature)| feature).collect()
}
