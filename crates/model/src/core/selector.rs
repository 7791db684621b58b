use crate::core::value::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The backend's native query-matching document.
///
/// Keys keep their insertion order so a compiled selector reads the same
/// way as the filter it came from. An empty selector matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(Document);

impl Selector {
    pub fn new() -> Self {
        Selector(Document::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes `key` without disturbing the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Applies `fragment` on top of this selector, key by key in the
    /// fragment's order.
    ///
    /// Collision policy: the last write wins. The keys that were overwritten
    /// are returned so the caller can report them.
    pub fn merge(&mut self, fragment: Selector) -> Vec<String> {
        let mut collisions = Vec::new();
        for (key, value) in fragment.0 {
            if self.0.insert(key.clone(), value).is_some() {
                collisions.push(key);
            }
        }
        collisions
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Document> for Selector {
    fn from(doc: Document) -> Self {
        Selector(doc)
    }
}

impl From<Selector> for Value {
    fn from(selector: Selector) -> Self {
        Value::Object(selector.0)
    }
}

impl FromIterator<(String, Value)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Selector(iter.into_iter().collect())
    }
}
