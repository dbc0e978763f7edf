//! Cross-filter state for 311 calls.
//!
//! State is a plain value; [`FilterState::reduce`] returns the next state
//! instead of mutating anything shared.

use crate::calls::types::ServiceCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    CallType,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Select `value` for `kind`, or deselect it if it is already selected.
    Toggle { kind: FilterKind, value: String },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub call_type: Option<String>,
    pub status: Option<String>,
}

impl FilterState {
    pub fn reduce(&self, action: FilterAction) -> FilterState {
        match action {
            FilterAction::Clear => FilterState::default(),
            FilterAction::Toggle { kind, value } => {
                let mut next = self.clone();
                let slot = match kind {
                    FilterKind::CallType => &mut next.call_type,
                    FilterKind::Status => &mut next.status,
                };
                *slot = if slot.as_deref() == Some(value.as_str()) {
                    None
                } else {
                    Some(value)
                };
                next
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.call_type.is_some() || self.status.is_some()
    }

    pub fn matches(&self, call: &ServiceCall) -> bool {
        let type_ok = self
            .call_type
            .as_deref()
            .is_none_or(|t| call.service_label() == t);
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|s| call.status_label() == s);
        type_ok && status_ok
    }

    /// Calls matching every active filter, in input order.
    pub fn apply<'a>(&self, calls: &'a [ServiceCall]) -> Vec<&'a ServiceCall> {
        calls.iter().filter(|c| self.matches(c)).collect()
    }

    /// Human-readable summary such as `Service Type: Pothole, Status: Open`.
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(t) = &self.call_type {
            parts.push(format!("Service Type: {t}"));
        }
        if let Some(s) = &self.status {
            parts.push(format!("Status: {s}"));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(kind: FilterKind, value: &str) -> FilterAction {
        FilterAction::Toggle {
            kind,
            value: value.to_string(),
        }
    }

    fn call(service: &str, status: &str) -> ServiceCall {
        ServiceCall {
            service_name: Some(service.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_sets_then_clears() {
        let s0 = FilterState::default();
        let s1 = s0.reduce(toggle(FilterKind::CallType, "Pothole"));
        let s2 = s1.reduce(toggle(FilterKind::CallType, "Pothole"));

        assert_eq!(s1.call_type.as_deref(), Some("Pothole"));
        assert_eq!(s2, FilterState::default());
        assert_eq!(s0, FilterState::default());
    }

    #[test]
    fn test_toggle_other_value_replaces() {
        let s = FilterState::default()
            .reduce(toggle(FilterKind::Status, "Open"))
            .reduce(toggle(FilterKind::Status, "Closed"));

        assert_eq!(s.status.as_deref(), Some("Closed"));
    }

    #[test]
    fn test_clear_resets_both() {
        let s = FilterState::default()
            .reduce(toggle(FilterKind::Status, "Open"))
            .reduce(toggle(FilterKind::CallType, "Pothole"))
            .reduce(FilterAction::Clear);

        assert!(!s.is_active());
    }

    #[test]
    fn test_apply_combines_filters() {
        let calls = vec![
            call("Pothole", "Open"),
            call("Pothole", "Closed"),
            call("Graffiti Removal", "Open"),
        ];

        let by_type = FilterState::default().reduce(toggle(FilterKind::CallType, "Pothole"));
        assert_eq!(by_type.apply(&calls).len(), 2);

        let both = by_type.reduce(toggle(FilterKind::Status, "Open"));
        let kept = both.apply(&calls);
        assert_eq!(kept, vec![&calls[0]]);

        assert_eq!(FilterState::default().apply(&calls).len(), 3);
    }

    #[test]
    fn test_unknown_label_is_filterable() {
        let calls = vec![ServiceCall::default(), call("Pothole", "Open")];
        let s = FilterState::default().reduce(toggle(FilterKind::CallType, "Unknown"));

        assert_eq!(s.apply(&calls), vec![&calls[0]]);
    }

    #[test]
    fn test_describe() {
        assert_eq!(FilterState::default().describe(), None);

        let s = FilterState {
            call_type: Some("Pothole".to_string()),
            status: Some("Open".to_string()),
        };
        assert_eq!(s.describe().as_deref(), Some("Service Type: Pothole, Status: Open"));

        let s = FilterState {
            call_type: None,
            status: Some("Closed".to_string()),
        };
        assert_eq!(s.describe().as_deref(), Some("Status: Closed"));
    }
}
