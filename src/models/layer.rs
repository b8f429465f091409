//! Reference boundary layers and their per-layer reporting configuration.

use std::collections::HashMap;

use geo::MultiPolygon;

/// The four reference layers, in fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    /// Marine conservation area boundaries (kawasan konservasi).
    Conservation,
    /// 12-nautical-mile territorial sea boundaries per province.
    TwelveMile,
    /// Issued spatial-utilization permits (KKPRL).
    Kkprl,
    /// Coastal sedimentation priority areas.
    Sedimentation,
}

impl LayerKind {
    /// Evaluation (and report) order.
    pub fn all() -> &'static [LayerKind] {
        &[
            LayerKind::Conservation,
            LayerKind::TwelveMile,
            LayerKind::Kkprl,
            LayerKind::Sedimentation,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Conservation => "conservation",
            LayerKind::TwelveMile => "twelve_mile",
            LayerKind::Kkprl => "kkprl",
            LayerKind::Sedimentation => "sedimentation",
        }
    }

    /// Attribute carrying the human-facing label for matched features.
    /// The sedimentation dataset has no usable label attribute.
    pub fn label_field(&self) -> Option<&'static str> {
        match self {
            LayerKind::Conservation => Some("namobj"),
            LayerKind::TwelveMile => Some("WP"),
            LayerKind::Kkprl => Some("NO_KKPRL"),
            LayerKind::Sedimentation => None,
        }
    }

    /// Attributes retained per matched row for tabular display.
    pub fn id_fields(&self) -> &'static [&'static str] {
        match self {
            LayerKind::Kkprl => &["NO_KKPRL", "NAMA_SUBJ"],
            _ => &[],
        }
    }
}

/// One boundary feature: its attributes plus resolved geometry.
#[derive(Debug, Clone)]
pub struct Feature {
    pub attributes: HashMap<String, String>,
    pub geometry: MultiPolygon<f64>,
}

impl Feature {
    pub fn new(attributes: HashMap<String, String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            attributes,
            geometry,
        }
    }

    pub fn attribute(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).map(String::as_str)
    }
}

/// A fully loaded reference layer. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct ReferenceLayer {
    pub kind: LayerKind,
    pub features: Vec<Feature>,
}

impl ReferenceLayer {
    pub fn new(kind: LayerKind, features: Vec<Feature>) -> Self {
        Self { kind, features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Load outcome for a single layer. Absence is an ordinary state, not an
/// error: the evaluator skips `Unavailable` layers silently.
#[derive(Debug, Clone)]
pub enum LayerLoad {
    Loaded(ReferenceLayer),
    Unavailable(String),
}

impl LayerLoad {
    pub fn as_layer(&self) -> Option<&ReferenceLayer> {
        match self {
            LayerLoad::Loaded(layer) => Some(layer),
            LayerLoad::Unavailable(_) => None,
        }
    }
}

/// The full set of reference layers for one process lifetime.
#[derive(Debug, Clone)]
pub struct ReferenceLayerSet {
    pub conservation: LayerLoad,
    pub twelve_mile: LayerLoad,
    pub kkprl: LayerLoad,
    pub sedimentation: LayerLoad,
}

impl ReferenceLayerSet {
    /// All layers in fixed evaluation order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerKind, &LayerLoad)> {
        LayerKind::all().iter().map(move |kind| {
            let load = match kind {
                LayerKind::Conservation => &self.conservation,
                LayerKind::TwelveMile => &self.twelve_mile,
                LayerKind::Kkprl => &self.kkprl,
                LayerKind::Sedimentation => &self.sedimentation,
            };
            (*kind, load)
        })
    }

    /// A set with every layer absent; the conversion-only path uses this.
    pub fn all_unavailable(reason: &str) -> Self {
        Self {
            conservation: LayerLoad::Unavailable(reason.to_string()),
            twelve_mile: LayerLoad::Unavailable(reason.to_string()),
            kkprl: LayerLoad::Unavailable(reason.to_string()),
            sedimentation: LayerLoad::Unavailable(reason.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_order_fixed() {
        let kinds: Vec<&str> = LayerKind::all().iter().map(|k| k.name()).collect();
        assert_eq!(
            kinds,
            vec!["conservation", "twelve_mile", "kkprl", "sedimentation"]
        );
    }

    #[test]
    fn test_kkprl_row_fields() {
        assert_eq!(LayerKind::Kkprl.id_fields(), &["NO_KKPRL", "NAMA_SUBJ"]);
        assert!(LayerKind::Sedimentation.label_field().is_none());
    }
}
