use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::polling::types::{Code, PollingPlace, PrecinctRef};

/// Properties of one polling place feature, named as the source table names them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingPlaceProperties {
    pub placename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<Code>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_code: Option<Code>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_code: Option<Code>,
    pub precincts: Vec<PrecinctRef>,
}

pub fn point_geometry(point: &Point<f64>) -> Geometry {
    Geometry::Point {
        coordinates: vec![point.x(), point.y()],
    }
}

/// Encodes polling places as point features, one per place, in order.
pub fn to_feature_collection(places: &[PollingPlace]) -> FeatureCollection<PollingPlaceProperties> {
    FeatureCollection::new(
        places
            .iter()
            .map(|place| {
                Feature::new(
                    PollingPlaceProperties {
                        placename: place.place_name.clone(),
                        street_address: place.street_address.clone(),
                        zip_code: place.zip_code.clone(),
                        accessibility_code: place.accessibility_code.clone(),
                        parking_code: place.parking_code.clone(),
                        precincts: place.precincts.clone(),
                    },
                    place.canonical_location.as_ref().map(point_geometry),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encodes_place_as_point_feature() {
        let place = PollingPlace {
            place_name: "City Hall".to_string(),
            street_address: Some("1400 JFK Blvd".to_string()),
            zip_code: Some(Code::from("19107")),
            accessibility_code: Some(Code::from("F")),
            parking_code: None,
            canonical_location: Some(Point::new(-75.1635, 39.9524)),
            precincts: vec![PrecinctRef {
                ward: Some(Code::from(5)),
                division: Some(Code::from(1)),
                precinct: Some(Code::from("0501")),
            }],
        };

        let value = serde_json::to_value(to_feature_collection(&[place])).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {
                        "placename": "City Hall",
                        "street_address": "1400 JFK Blvd",
                        "zip_code": "19107",
                        "accessibility_code": "F",
                        "precincts": [{ "ward": 5, "division": 1, "precinct": "0501" }]
                    },
                    "geometry": { "type": "Point", "coordinates": [-75.1635, 39.9524] }
                }]
            })
        );
    }

    #[test]
    fn test_missing_location_encodes_null_geometry() {
        let place = PollingPlace {
            place_name: "Unknown".to_string(),
            street_address: None,
            zip_code: None,
            accessibility_code: None,
            parking_code: None,
            canonical_location: None,
            precincts: vec![],
        };

        let value = serde_json::to_value(to_feature_collection(&[place])).unwrap();

        assert!(value["features"][0]["geometry"].is_null());
    }
}
