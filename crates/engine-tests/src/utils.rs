use crate::{POSTS_COLLECTION, posts_schema};
use async_trait::async_trait;
use connectors::{
    collection::{Collection, DocumentCursor},
    results::{DeleteResult, UpdateResult},
};
use model::{
    core::{selector::Selector, value::Document},
    query::options::{QueryOptions, UpdateOptions},
    schema::registry::{Schema, SchemaResolver},
};
use serde_json::{Value, json};
use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Write conflict on {0}")]
    WriteConflict(String),

    #[error("Connection lost")]
    ConnectionLost,
}

/// One call that reached the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub op: &'static str,
    pub selector: Value,
    pub options: Value,
}

/// In-memory collection that records every primitive it receives.
///
/// Only top-level equality on scalar selector values is evaluated (enough
/// for `_id`/`slug` lookups); operator documents such as `{"$gt": 1}` are
/// recorded but not applied. `find` honours `limit`.
pub struct MemoryCollection {
    schema: Schema,
    docs: Mutex<Vec<Document>>,
    calls: Mutex<Vec<RecordedCall>>,
    next_id: AtomicU64,
    offline: bool,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self {
            schema: posts_schema(),
            docs: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            offline: false,
        }
    }

    /// A collection whose every primitive fails with `ConnectionLost`.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn with_docs(docs: Vec<Value>) -> Self {
        let collection = Self::new();
        {
            let mut stored = collection.docs.lock().unwrap();
            stored.extend(docs.into_iter().filter_map(|d| d.as_object().cloned()));
        }
        collection
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    fn record(&self, op: &'static str, selector: &Selector, options: Value) {
        self.calls.lock().unwrap().push(RecordedCall {
            op,
            selector: selector.to_json(),
            options,
        });
    }

    fn online(&self) -> Result<(), MemoryError> {
        if self.offline {
            Err(MemoryError::ConnectionLost)
        } else {
            Ok(())
        }
    }

    fn matching_positions(&self, docs: &[Document], selector: &Selector) -> Vec<usize> {
        docs.iter()
            .enumerate()
            .filter(|(_, doc)| matches_scalars(doc, selector))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl Default for MemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_scalars(doc: &Document, selector: &Selector) -> bool {
    selector
        .iter()
        .filter(|(_, value)| !value.is_object())
        .all(|(key, value)| doc.get(key) == Some(value))
}

fn apply_set(doc: &mut Document, modifier: &Document) -> Result<bool, MemoryError> {
    let Some(set) = modifier.get("$set") else {
        return Ok(false);
    };
    let set = set
        .as_object()
        .ok_or_else(|| MemoryError::WriteConflict("$set must be an object".to_string()))?;

    let mut changed = false;
    for (key, value) in set {
        if doc.insert(key.clone(), value.clone()).as_ref() != Some(value) {
            changed = true;
        }
    }
    Ok(changed)
}

pub struct MemoryCursor {
    docs: Result<Vec<Document>, MemoryError>,
}

#[async_trait]
impl DocumentCursor for MemoryCursor {
    type Error = MemoryError;

    async fn fetch(self) -> Result<Vec<Document>, MemoryError> {
        self.docs
    }

    async fn count(self) -> Result<u64, MemoryError> {
        self.docs.map(|docs| docs.len() as u64)
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    type Error = MemoryError;
    type Cursor = MemoryCursor;

    fn name(&self) -> &str {
        POSTS_COLLECTION
    }

    fn schema(&self) -> &dyn SchemaResolver {
        &self.schema
    }

    async fn find_one(
        &self,
        selector: Selector,
        options: QueryOptions,
    ) -> Result<Option<Document>, MemoryError> {
        self.record("find_one", &selector, json!(options));
        self.online()?;

        let docs = self.docs.lock().unwrap();
        Ok(docs.iter().find(|d| matches_scalars(d, &selector)).cloned())
    }

    fn find(&self, selector: Selector, options: QueryOptions) -> MemoryCursor {
        self.record("find", &selector, json!(options));
        if let Err(e) = self.online() {
            return MemoryCursor { docs: Err(e) };
        }

        let docs = self.docs.lock().unwrap();
        let limit = options.limit.map_or(usize::MAX, |l| l as usize);
        MemoryCursor {
            docs: Ok(docs.iter().take(limit).cloned().collect()),
        }
    }

    async fn insert(&self, mut document: Document) -> Result<Document, MemoryError> {
        self.record("insert", &Selector::new(), Value::Null);
        self.online()?;

        if !document.contains_key("_id") {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            document.insert("_id".to_string(), json!(format!("doc-{id}")));
        }
        self.docs.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        selector: Selector,
        modifier: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult, MemoryError> {
        self.record("update", &selector, json!(options));
        self.online()?;

        let mut docs = self.docs.lock().unwrap();
        let mut positions = self.matching_positions(&docs, &selector);
        if !options.multi {
            positions.truncate(1);
        }

        if positions.is_empty() && options.upsert {
            let mut doc: Document = selector
                .iter()
                .filter(|(_, v)| !v.is_object())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            apply_set(&mut doc, &modifier)?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let upserted_id = doc
                .entry("_id")
                .or_insert_with(|| json!(format!("doc-{id}")))
                .clone();
            docs.push(doc);
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(upserted_id),
            });
        }

        let mut modified = 0;
        for idx in &positions {
            if apply_set(&mut docs[*idx], &modifier)? {
                modified += 1;
            }
        }

        Ok(UpdateResult {
            matched_count: positions.len() as u64,
            modified_count: modified,
            upserted_id: None,
        })
    }

    async fn remove(&self, selector: Selector) -> Result<DeleteResult, MemoryError> {
        self.record("remove", &selector, Value::Null);
        self.online()?;

        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| !matches_scalars(d, &selector));
        Ok(DeleteResult {
            deleted_count: (before - docs.len()) as u64,
        })
    }
}
