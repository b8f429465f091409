//! JSON geometry and attribute conversion helpers.
//!
//! Handles both GeoJSON (`type` + `coordinates`) and the ArcGIS export
//! schema (`rings`). Untranslatable geometries yield `None` so callers can
//! drop the feature instead of failing the layer.

use std::collections::HashMap;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// One JSON position array → coordinate. Extra dimensions (z/m) ignored.
fn position(value: &Value) -> Option<Coord<f64>> {
    let arr = value.as_array()?;
    Some(Coord {
        x: arr.first()?.as_f64()?,
        y: arr.get(1)?.as_f64()?,
    })
}

fn ring(value: &Value) -> Option<LineString<f64>> {
    let coords: Vec<Coord<f64>> = value.as_array()?.iter().filter_map(position).collect();
    if coords.len() < 4 {
        return None;
    }
    Some(LineString::new(coords))
}

/// `[[ring], [ring], ...]` → polygon with exterior + holes.
fn polygon(value: &Value) -> Option<Polygon<f64>> {
    let rings: Vec<LineString<f64>> = value.as_array()?.iter().filter_map(ring).collect();
    let mut iter = rings.into_iter();
    let exterior = iter.next()?;
    Some(Polygon::new(exterior, iter.collect()))
}

/// GeoJSON geometry object → multipolygon. Only Polygon and MultiPolygon
/// are meaningful for boundary layers; anything else is dropped.
pub fn geojson_geometry(value: &Value) -> Option<MultiPolygon<f64>> {
    match value.get("type")?.as_str()? {
        "Polygon" => polygon(value.get("coordinates")?).map(|p| MultiPolygon::new(vec![p])),
        "MultiPolygon" => {
            let polys: Vec<Polygon<f64>> = value
                .get("coordinates")?
                .as_array()?
                .iter()
                .filter_map(polygon)
                .collect();
            if polys.is_empty() {
                None
            } else {
                Some(MultiPolygon::new(polys))
            }
        }
        _ => None,
    }
}

/// ArcGIS export geometry (`{"rings": [...]}`) → multipolygon. The first
/// ring is the exterior, the rest become holes, as in the export format.
pub fn esri_rings(geometry: &Value) -> Option<MultiPolygon<f64>> {
    let rings = geometry.get("rings")?;
    polygon(rings).map(|p| MultiPolygon::new(vec![p]))
}

/// Flatten a JSON attribute object into string values for reporting.
/// Null attributes are dropped; numbers and booleans are stringified.
pub fn attributes(value: &Value) -> HashMap<String, String> {
    let Some(map) = value.as_object() else {
        return HashMap::new();
    };
    map.iter()
        .filter_map(|(k, v)| {
            let s = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((k.clone(), s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geojson_polygon() {
        let geom = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        });
        let mp = geojson_geometry(&geom).unwrap();
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].exterior().0.len(), 4);
    }

    #[test]
    fn test_geojson_multipolygon() {
        let geom = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
            ]
        });
        assert_eq!(geojson_geometry(&geom).unwrap().0.len(), 2);
    }

    #[test]
    fn test_point_geometry_dropped() {
        let geom = json!({"type": "Point", "coordinates": [1.0, 2.0]});
        assert!(geojson_geometry(&geom).is_none());
    }

    #[test]
    fn test_esri_rings_exterior_and_hole() {
        let geom = json!({
            "rings": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
            ]
        });
        let mp = esri_rings(&geom).unwrap();
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn test_missing_rings_dropped() {
        assert!(esri_rings(&json!({"paths": []})).is_none());
    }

    #[test]
    fn test_attributes_stringified() {
        let attrs = attributes(&json!({
            "namobj": "Area X",
            "luas": 12.5,
            "aktif": true,
            "kosong": null
        }));
        assert_eq!(attrs.get("namobj").unwrap(), "Area X");
        assert_eq!(attrs.get("luas").unwrap(), "12.5");
        assert_eq!(attrs.get("aktif").unwrap(), "true");
        assert!(!attrs.contains_key("kosong"));
    }
}
