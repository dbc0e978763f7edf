use std::collections::HashMap;

use crate::calls::types::{CategoryCount, ServiceCall};

/// Counts calls per service type, in order of first appearance.
pub fn count_by_type(calls: &[ServiceCall]) -> Vec<CategoryCount> {
    count_by(calls, ServiceCall::service_label)
}

/// Counts calls per status, in order of first appearance.
pub fn count_by_status(calls: &[ServiceCall]) -> Vec<CategoryCount> {
    count_by(calls, ServiceCall::status_label)
}

fn count_by<'a>(
    calls: &'a [ServiceCall],
    label: impl Fn(&'a ServiceCall) -> &'a str,
) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for call in calls {
        let l = label(call);
        match index.get(l) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(l, counts.len());
                counts.push(CategoryCount {
                    label: l.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(service: Option<&str>, status: Option<&str>) -> ServiceCall {
        ServiceCall {
            service_name: service.map(str::to_string),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    fn pairs(counts: &[CategoryCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.label.as_str(), c.count)).collect()
    }

    #[test]
    fn test_empty() {
        assert!(count_by_type(&[]).is_empty());
        assert!(count_by_status(&[]).is_empty());
    }

    #[test]
    fn test_count_by_type_first_seen_order() {
        let calls = vec![
            call(Some("Pothole"), Some("Open")),
            call(Some("Graffiti Removal"), Some("Closed")),
            call(Some("Pothole"), Some("Closed")),
            call(None, Some("Open")),
        ];

        assert_eq!(
            pairs(&count_by_type(&calls)),
            vec![("Pothole", 2), ("Graffiti Removal", 1), ("Unknown", 1)]
        );
    }

    #[test]
    fn test_count_by_status() {
        let calls = vec![
            call(Some("Pothole"), Some("Open")),
            call(Some("Pothole"), Some("Closed")),
            call(Some("Pothole"), Some("Open")),
            call(Some("Pothole"), None),
        ];

        assert_eq!(
            pairs(&count_by_status(&calls)),
            vec![("Open", 2), ("Closed", 1), ("Unknown", 1)]
        );
    }

    #[test]
    fn test_counts_sum_to_total() {
        let calls: Vec<_> = ["a", "b", "a", "c", "a"]
            .iter()
            .map(|s| call(Some(*s), None))
            .collect();

        let total: usize = count_by_type(&calls).iter().map(|c| c.count).sum();
        assert_eq!(total, calls.len());
    }
}
