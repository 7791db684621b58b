use model::{core::selector::Selector, query::options::QueryOptions};
use serde::Serialize;
use std::collections::BTreeSet;

/// Output of planning a filter request: what to send to the backend and
/// which fields the filter read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    pub selector: Selector,
    pub options: QueryOptions,
    /// Field names referenced anywhere in the filter, without duplicates.
    pub touched_fields: BTreeSet<String>,
}

impl CompiledQuery {
    /// The clamped page size. Always set on a planned query.
    pub fn limit(&self) -> Option<u64> {
        self.options.limit
    }

    pub fn touches(&self, field: &str) -> bool {
        self.touched_fields.contains(field)
    }

    /// Stable hash of the compiled query, suitable as a result-cache key.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let serialized = serde_json::to_string(self)?;
        Ok(format!("{:x}", md5::compute(serialized)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(limit: u64) -> CompiledQuery {
        let selector: Selector = serde_json::from_value(json!({"age": {"$gt": 18}})).unwrap();
        CompiledQuery {
            selector,
            options: QueryOptions::with_limit(limit),
            touched_fields: BTreeSet::from(["age".to_string()]),
        }
    }

    #[test]
    fn test_serialized_shape() {
        assert_eq!(
            serde_json::to_value(query(20)).unwrap(),
            json!({
                "selector": {"age": {"$gt": 18}},
                "options": {"limit": 20},
                "touchedFields": ["age"],
            })
        );
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinguishes_queries() {
        let a = query(20).fingerprint().unwrap();
        assert_eq!(a, query(20).fingerprint().unwrap());
        assert_eq!(a.len(), 32);
        assert_ne!(a, query(10).fingerprint().unwrap());
    }
}
