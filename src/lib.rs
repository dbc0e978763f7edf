pub mod calls;
pub mod config;
pub mod fetch;
pub mod geojson;
pub mod output;
pub mod parser;
pub mod polling;
pub mod services;
