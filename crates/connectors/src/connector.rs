use crate::{
    collection::{Collection, DocumentCursor},
    error::ConnectorError,
    results::{DeleteResult, UpdateResult},
};
use model::{
    core::{selector::Selector, value::Document},
    filter::{error::FilterError, request::FilterRequest},
    query::options::{DeleteOptions, InsertOptions, QueryOptions, UpdateOptions},
};
use planner::{
    plan::CompiledQuery,
    query::{
        planner::FilterPlanner,
        unique::{normalize_selector, normalize_unique},
    },
};
use tracing::debug;

/// Document-store connector: the CRUD surface used by the API layer.
///
/// Single-document operations (`get`, `update`, `delete`) accept the public
/// `documentId` key and rewrite it to the backend primary key. Multi-document
/// reads take selectors already in backend form, typically produced by
/// [`Connector::filter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Connector {
    planner: FilterPlanner,
}

impl Connector {
    pub fn new(planner: FilterPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &FilterPlanner {
        &self.planner
    }

    /// Fetches at most one document; `Ok(None)` when nothing matches.
    pub async fn get<C: Collection>(
        &self,
        collection: &C,
        selector: &Selector,
        options: QueryOptions,
    ) -> Result<Option<Document>, C::Error> {
        let selector = normalize_unique(selector);
        debug!(collection = collection.name(), ?selector, "get");
        collection.find_one(selector, options).await
    }

    pub async fn find<C: Collection>(
        &self,
        collection: &C,
        selector: &Selector,
        options: QueryOptions,
    ) -> Result<Vec<Document>, C::Error> {
        let selector = normalize_selector(selector);
        debug!(collection = collection.name(), ?selector, ?options, "find");
        collection.find(selector, options).fetch().await
    }

    pub async fn count<C: Collection>(
        &self,
        collection: &C,
        selector: &Selector,
        options: QueryOptions,
    ) -> Result<u64, C::Error> {
        let selector = normalize_selector(selector);
        debug!(collection = collection.name(), ?selector, "count");
        collection.find(selector, options).count().await
    }

    /// Inserts a document. `_options` is accepted for symmetry with the other
    /// operations and is not forwarded.
    pub async fn create<C: Collection>(
        &self,
        collection: &C,
        document: Document,
        _options: InsertOptions,
    ) -> Result<Document, C::Error> {
        debug!(collection = collection.name(), "create");
        collection.insert(document).await
    }

    pub async fn update<C: Collection>(
        &self,
        collection: &C,
        selector: &Selector,
        modifier: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult, C::Error> {
        let selector = normalize_unique(selector);
        debug!(collection = collection.name(), ?selector, ?options, "update");
        collection.update(selector, modifier, options).await
    }

    /// Removes matching documents. `_options` is not forwarded to the backend.
    pub async fn delete<C: Collection>(
        &self,
        collection: &C,
        selector: &Selector,
        _options: DeleteOptions,
    ) -> Result<DeleteResult, C::Error> {
        let selector = normalize_unique(selector);
        debug!(collection = collection.name(), ?selector, "delete");
        collection.remove(selector).await
    }

    /// Compiles a filter request against the collection's schema into the
    /// selector and options for `find`/`count`.
    pub fn filter<C: Collection + ?Sized>(
        &self,
        collection: &C,
        request: &FilterRequest,
    ) -> Result<CompiledQuery, FilterError> {
        let query = self.planner.plan(collection.schema(), request)?;
        debug!(
            collection = collection.name(),
            touched = ?query.touched_fields,
            limit = query.limit(),
            "filter"
        );
        Ok(query)
    }

    /// Plans `request` and reads the matching documents.
    pub async fn find_filtered<C: Collection>(
        &self,
        collection: &C,
        request: &FilterRequest,
    ) -> Result<Vec<Document>, ConnectorError<C::Error>> {
        let query = self.filter(collection, request)?;
        self.find(collection, &query.selector, query.options)
            .await
            .map_err(ConnectorError::Backend)
    }

    /// Plans `request` and counts the matching documents.
    pub async fn count_filtered<C: Collection>(
        &self,
        collection: &C,
        request: &FilterRequest,
    ) -> Result<u64, ConnectorError<C::Error>> {
        let query = self.filter(collection, request)?;
        self.count(collection, &query.selector, query.options)
            .await
            .map_err(ConnectorError::Backend)
    }
}
