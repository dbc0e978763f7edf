//! Philadelphia 311 service calls: counting, cross-filtering and display
//! helpers.

pub mod aggregate;
pub mod filter;
pub mod status;
pub mod types;

pub use aggregate::{count_by_status, count_by_type};
pub use filter::{FilterAction, FilterKind, FilterState};
pub use status::{StatusClass, format_requested};
pub use types::{CategoryCount, ServiceCall};
