//! Data types used by the polling place aggregation.

use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque code or identifier as the source reported it.
///
/// The polling place table mixes numeric and textual codes, so both are
/// kept and written back exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Number(n) => write!(f, "{n}"),
            Code::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Code::Text(s.to_string())
    }
}

impl From<u64> for Code {
    fn from(n: u64) -> Self {
        Code::Number(n.into())
    }
}

/// One precinct row from the polling places table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecinctRecord {
    pub place_name: Option<String>,
    pub street_address: Option<String>,
    pub zip_code: Option<Code>,
    pub accessibility_code: Option<Code>,
    pub parking_code: Option<Code>,
    pub ward: Option<Code>,
    pub division: Option<Code>,
    pub precinct: Option<Code>,
    /// `x` is longitude, `y` is latitude.
    pub coordinates: Option<Point<f64>>,
}

impl PrecinctRecord {
    pub fn precinct_ref(&self) -> PrecinctRef {
        PrecinctRef {
            ward: self.ward.clone(),
            division: self.division.clone(),
            precinct: self.precinct.clone(),
        }
    }
}

/// The electoral subdivision a record serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecinctRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<Code>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<Code>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precinct: Option<Code>,
}

/// A physical voting location and every precinct that votes there.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingPlace {
    pub place_name: String,
    pub street_address: Option<String>,
    pub zip_code: Option<Code>,
    pub accessibility_code: Option<Code>,
    pub parking_code: Option<Code>,
    /// Coordinates of the first record seen for this place. Never updated.
    pub canonical_location: Option<Point<f64>>,
    pub precincts: Vec<PrecinctRef>,
}

impl PollingPlace {
    pub(crate) fn first_seen(place_name: String, record: &PrecinctRecord) -> Self {
        Self {
            place_name,
            street_address: record.street_address.clone(),
            zip_code: record.zip_code.clone(),
            accessibility_code: record.accessibility_code.clone(),
            parking_code: record.parking_code.clone(),
            canonical_location: record.coordinates,
            precincts: vec![record.precinct_ref()],
        }
    }
}

/// Advisory report of a precinct whose reported point lies too far from
/// its polling place.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceWarning {
    pub place_name: String,
    pub precinct: PrecinctRef,
    pub distance_m: f64,
}
