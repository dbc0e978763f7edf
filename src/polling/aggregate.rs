use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;
use tracing::debug;

use crate::polling::diagnostics::{DiagnosticsSink, TracingSink};
use crate::polling::distance::distance_m;
use crate::polling::types::{DistanceWarning, PollingPlace, PrecinctRecord};

/// metres
pub const WARNING_RADIUS: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("record {index} has no place name")]
    InvalidRecord { index: usize },
}

/// How records are matched to a polling place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// The place name exactly as the source spells it.
    #[default]
    Exact,
    /// Trimmed, whitespace-collapsed and lowercased. The output keeps the
    /// first record's spelling.
    Normalized,
}

impl KeyMode {
    fn key(self, place_name: &str) -> String {
        match self {
            KeyMode::Exact => place_name.to_string(),
            KeyMode::Normalized => place_name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    pub warning_radius_m: f64,
    pub key_mode: KeyMode,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            warning_radius_m: WARNING_RADIUS,
            key_mode: KeyMode::Exact,
        }
    }
}

/// Groups precinct records into one [`PollingPlace`] per place name,
/// logging distance warnings through `tracing`.
pub fn aggregate(records: &[PrecinctRecord]) -> Result<Vec<PollingPlace>, AggregateError> {
    aggregate_with(records, &AggregateOptions::default(), &mut TracingSink)
}

/// Groups precinct records into polling places.
///
/// Places are returned in order of first appearance and each record adds
/// exactly one entry to its place's `precincts`. The first record of a
/// place fixes its descriptive fields and canonical location. A later
/// record lying farther than `warning_radius_m` from that location is
/// reported to `sink`; the output is the same either way.
///
/// # Errors
///
/// [`AggregateError::InvalidRecord`] if a record has a missing, empty or
/// whitespace-only place name. Nothing is returned for the other records in that case.
pub fn aggregate_with(
    records: &[PrecinctRecord],
    options: &AggregateOptions,
    sink: &mut impl DiagnosticsSink,
) -> Result<Vec<PollingPlace>, AggregateError> {
    let mut places: Vec<PollingPlace> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let place_name = match record.place_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AggregateError::InvalidRecord { index }),
        };

        match index_by_key.entry(options.key_mode.key(place_name)) {
            Entry::Vacant(slot) => {
                slot.insert(places.len());
                places.push(PollingPlace::first_seen(place_name.to_string(), record));
            }
            Entry::Occupied(slot) => {
                let place = &mut places[*slot.get()];
                place.precincts.push(record.precinct_ref());

                if let (Some(canonical), Some(point)) = (place.canonical_location, record.coordinates)
                {
                    let distance = distance_m(&canonical, &point);
                    if distance > options.warning_radius_m {
                        sink.report(DistanceWarning {
                            place_name: place.place_name.clone(),
                            precinct: record.precinct_ref(),
                            distance_m: distance,
                        });
                    }
                }
            }
        }
    }

    debug!(
        records = records.len(),
        places = places.len(),
        "Aggregated precinct records"
    );

    Ok(places)
}
