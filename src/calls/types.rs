use serde::{Deserialize, Serialize};

/// Label used for calls that have no service name or status.
pub const UNKNOWN: &str = "Unknown";

/// One 311 service request row from `public_cases_fc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub service_request_id: Option<String>,
    pub status: Option<String>,
    pub service_name: Option<String>,
    pub service_code: Option<String>,
    pub agency_responsible: Option<String>,
    pub address: Option<String>,
    pub requested_datetime: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl ServiceCall {
    pub fn service_label(&self) -> &str {
        self.service_name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Number of calls carrying one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}
