//! Decoders for the payloads returned by the Carto SQL API.

use anyhow::{Context, Result, bail};
use geo::Point;
use serde::Deserialize;
use tracing::debug;

use crate::calls::ServiceCall;
use crate::geojson::{FeatureCollection, Geometry};
use crate::polling::{Code, PrecinctRecord};

/// Properties of a row in the `polling_places` table.
#[derive(Debug, Deserialize)]
struct RawPrecinct {
    placename: Option<String>,
    street_address: Option<String>,
    zip_code: Option<Code>,
    accessibility_code: Option<Code>,
    parking_code: Option<Code>,
    ward: Option<Code>,
    division: Option<Code>,
    precinct: Option<Code>,
}

fn refine_point(geometry: Option<Geometry>, index: usize) -> Result<Option<Point<f64>>> {
    match geometry {
        Some(Geometry::Point { coordinates }) => match coordinates.as_slice() {
            [lon, lat, ..] => Ok(Some(Point::new(*lon, *lat))),
            _ => bail!("feature {index}: point has {} coordinates", coordinates.len()),
        },
        Some(Geometry::Other) => {
            debug!(index, "Ignoring non-point geometry");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Decodes a GeoJSON `FeatureCollection` of polling place rows.
///
/// # Errors
///
/// Returns an error if the bytes are not a feature collection or a point
/// has fewer than two coordinates.
pub fn parse_precincts(bytes: &[u8]) -> Result<Vec<PrecinctRecord>> {
    let collection: FeatureCollection<RawPrecinct> =
        serde_json::from_slice(bytes).context("failed to decode polling places GeoJSON")?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| -> Result<PrecinctRecord> {
            let p = feature.properties;
            Ok(PrecinctRecord {
                place_name: p.placename,
                street_address: p.street_address,
                zip_code: p.zip_code,
                accessibility_code: p.accessibility_code,
                parking_code: p.parking_code,
                ward: p.ward,
                division: p.division,
                precinct: p.precinct,
                coordinates: refine_point(feature.geometry, index)?,
            })
        })
        .collect()
}

/// Decodes a CSV export of 311 calls. Unknown columns are ignored.
pub fn parse_calls(bytes: &[u8]) -> Result<Vec<ServiceCall>> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut calls = Vec::new();

    for (row, result) in rdr.deserialize().enumerate() {
        let call: ServiceCall = result.with_context(|| format!("failed to decode 311 row {row}"))?;
        calls.push(call);
    }

    Ok(calls)
}
