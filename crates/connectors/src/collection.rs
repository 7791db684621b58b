use crate::results::{DeleteResult, UpdateResult};
use async_trait::async_trait;
use model::{
    core::{selector::Selector, value::Document},
    query::options::{QueryOptions, UpdateOptions},
    schema::registry::SchemaResolver,
};

/// Result set of a `find`. Consumed by reading it once, either as the
/// materialized documents or as their count.
#[async_trait]
pub trait DocumentCursor: Send {
    type Error;

    async fn fetch(self) -> Result<Vec<Document>, Self::Error>;

    async fn count(self) -> Result<u64, Self::Error>;
}

/// CRUD primitives and schema access of a backend collection.
///
/// Implementations own connection handling, retries and timeouts; errors
/// are surfaced to callers as-is.
#[async_trait]
pub trait Collection: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    type Cursor: DocumentCursor<Error = Self::Error>;

    fn name(&self) -> &str;

    /// Field metadata used to compile filters against this collection.
    fn schema(&self) -> &dyn SchemaResolver;

    async fn find_one(
        &self,
        selector: Selector,
        options: QueryOptions,
    ) -> Result<Option<Document>, Self::Error>;

    fn find(&self, selector: Selector, options: QueryOptions) -> Self::Cursor;

    /// Stores `document` and returns it as persisted (with its primary key).
    async fn insert(&self, document: Document) -> Result<Document, Self::Error>;

    async fn update(
        &self,
        selector: Selector,
        modifier: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult, Self::Error>;

    async fn remove(&self, selector: Selector) -> Result<DeleteResult, Self::Error>;
}
