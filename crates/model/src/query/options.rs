use serde::{Serialize, Serializer, ser::SerializeMap};

/// Backend sort document: field name to `1` (ascending) or `-1`
/// (descending), in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(Vec<(String, i32)>);

impl SortSpec {
    pub fn new() -> Self {
        SortSpec(Vec::new())
    }

    /// Appends a sort key. A field that is already present keeps its
    /// position and takes the new value.
    pub fn push(&mut self, field: impl Into<String>, value: i32) {
        let field = field.into();
        match self.0.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.0.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<i32> {
        self.0.iter().find(|(f, _)| f == field).map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, value) in &self.0 {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Options for multi-document reads (`find`, `count`) and single lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "SortSpec::is_empty")]
    pub sort: SortSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl QueryOptions {
    pub fn with_limit(limit: u64) -> Self {
        QueryOptions {
            sort: SortSpec::new(),
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOptions {
    /// Insert a new document when nothing matches.
    pub upsert: bool,
    /// Update every matching document instead of the first.
    pub multi: bool,
}

/// Reserved; inserts take no options yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOptions;

/// Reserved; removals do not forward options to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions;
