//! Minimal serde model of a GeoJSON `FeatureCollection` of point features.
//!
//! Only the parts the Carto SQL API returns for point tables are modelled.
//! Non-point geometries decode to [`Geometry::Other`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type", default)]
    pub kind: CollectionKind,
    pub features: Vec<Feature<P>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type", default)]
    pub kind: FeatureKind,
    pub properties: P,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`, optionally followed by altitude.
    Point { coordinates: Vec<f64> },
    #[serde(other)]
    Other,
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            kind: CollectionKind::FeatureCollection,
            features,
        }
    }
}

impl<P> Feature<P> {
    pub fn new(properties: P, geometry: Option<Geometry>) -> Self {
        Self {
            kind: FeatureKind::Feature,
            properties,
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_decode_point_and_other_geometry() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [-75.16, 39.95] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] } },
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        });

        let fc: FeatureCollection<Value> = serde_json::from_value(raw).unwrap();

        assert_eq!(fc.features.len(), 3);
        assert_eq!(
            fc.features[0].geometry,
            Some(Geometry::Point {
                coordinates: vec![-75.16, 39.95]
            })
        );
        assert_eq!(fc.features[1].geometry, Some(Geometry::Other));
        assert_eq!(fc.features[2].geometry, None);
    }

    #[test]
    fn test_encode_writes_type_tags() {
        let fc = FeatureCollection::new(vec![Feature::new(
            json!({ "name": "x" }),
            Some(Geometry::Point {
                coordinates: vec![1.0, 2.0],
            }),
        )]);

        let value = serde_json::to_value(&fc).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["geometry"]["type"], "Point");
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!([1.0, 2.0]));
    }
}
