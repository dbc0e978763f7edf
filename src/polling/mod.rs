//! Polling place deduplication.
//!
//! The polling places table has one row per precinct. This module folds
//! those rows into one polling place per physical location, keeps the
//! precincts that vote there, and reports precincts whose reported point
//! is suspiciously far from the place's first-seen location.

pub mod aggregate;
pub mod diagnostics;
pub mod distance;
pub mod encode;
pub mod types;

pub use aggregate::{AggregateError, AggregateOptions, KeyMode, aggregate, aggregate_with};
pub use diagnostics::{DiagnosticsSink, TracingSink};
pub use encode::to_feature_collection;
pub use types::{Code, DistanceWarning, PollingPlace, PrecinctRecord, PrecinctRef};
