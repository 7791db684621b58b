use serde_json::{Map, Value};

/// A stored document as the backend sees it: an ordered JSON object.
pub type Document = Map<String, Value>;

/// Short name of a JSON value's kind, used when reporting malformed input.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds a document from `(key, value)` pairs, keeping their order.
pub fn document<I, K>(pairs: I) -> Document
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
