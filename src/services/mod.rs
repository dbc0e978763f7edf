//! Remote open-data services.

pub mod carto;
