use crate::{filter::error::FilterError, schema::field::FieldMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only field lookup used while compiling filters.
pub trait SchemaResolver: Send + Sync {
    /// Fails with [`FilterError::UnknownField`] for undeclared fields.
    fn resolve(&self, field: &str) -> Result<&FieldMetadata, FilterError>;
}

/// Declared fields of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    fields: BTreeMap<String, FieldMetadata>,
}

impl Schema {
    pub fn new() -> Self {
        Schema {
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, meta: FieldMetadata) -> Self {
        self.insert(name, meta);
        self
    }

    pub fn insert(&mut self, name: &str, meta: FieldMetadata) {
        self.fields.insert(name.to_string(), meta);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SchemaResolver for Schema {
    fn resolve(&self, field: &str) -> Result<&FieldMetadata, FilterError> {
        self.fields
            .get(field)
            .ok_or_else(|| FilterError::UnknownField(field.to_string()))
    }
}
