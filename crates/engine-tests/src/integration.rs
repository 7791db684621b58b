#[cfg(test)]
mod tests {
    use crate::utils::{MemoryCollection, MemoryError, RecordedCall};
    use connectors::{collection::Collection, connector::Connector, error::ConnectorError};
    use engine_config::settings::{MAX_DOCUMENTS_ENV, Settings};
    use model::{
        core::{selector::Selector, value::Document},
        filter::{error::FilterError, request::FilterRequest},
        query::options::{DeleteOptions, InsertOptions, QueryOptions, UpdateOptions},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn request(value: Value) -> FilterRequest {
        FilterRequest::from_json(&value).expect("valid filter request")
    }

    fn selector(value: Value) -> Selector {
        serde_json::from_value(value).expect("selector object")
    }

    fn document(value: Value) -> Document {
        value.as_object().cloned().expect("document object")
    }

    fn seeded(count: usize) -> MemoryCollection {
        MemoryCollection::with_docs(
            (0..count)
                .map(|i| json!({"_id": format!("p{i}"), "slug": format!("post-{i}"), "score": i}))
                .collect(),
        )
    }

    // Scenario: a combined filter with sort and an oversized limit.
    // Expected Outcome:
    // - The backend receives the `$and` selector and the clamped limit.
    // - The clamp is logged.
    #[traced_test]
    #[tokio::test]
    async fn tc01_filtered_find_reaches_backend_compiled() {
        let collection = seeded(3);
        let connector = Connector::new(Settings::default().filter_planner());

        let req = request(json!({
            "where": {"_and": [{"score": {"_gt": 18}}, {"status": {"_eq": "active"}}]},
            "orderBy": {"score": "desc"},
            "limit": 5000,
        }));

        let query = connector.filter(&collection, &req).unwrap();
        assert_eq!(
            query.touched_fields.iter().collect::<Vec<_>>(),
            vec!["score", "status"]
        );

        let docs = connector.find_filtered(&collection, &req).await.unwrap();
        assert_eq!(docs.len(), 3);

        assert_eq!(
            collection.last_call(),
            Some(RecordedCall {
                op: "find",
                selector: json!({"$and": [
                    {"score": {"$gt": 18}},
                    {"status": {"$eq": "active"}},
                ]}),
                options: json!({"sort": {"score": -1}, "limit": 1000}),
            })
        );
        assert!(logs_contain("clamping"));
        assert!(logs_contain("Compiled filter request"));
    }

    // Scenario: the configured ceiling is lowered through the environment lookup.
    // Expected Outcome: the backend sees, and honours, the lowered limit.
    #[traced_test]
    #[tokio::test]
    async fn tc02_configured_ceiling_bounds_reads() {
        let settings = Settings::default()
            .with_overrides(|key| (key == MAX_DOCUMENTS_ENV).then(|| "2".to_string()))
            .unwrap();
        let connector = Connector::new(settings.filter_planner());
        let collection = seeded(5);

        let docs = connector
            .find_filtered(&collection, &request(json!({"limit": 10})))
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(collection.last_call().unwrap().options, json!({"limit": 2}));
    }

    // Scenario: filter on a localized field.
    // Expected Outcome: the selector targets the locale container path.
    #[traced_test]
    #[tokio::test]
    async fn tc03_localized_filter() {
        let collection = MemoryCollection::new();
        let connector = Connector::default();

        connector
            .count_filtered(
                &collection,
                &request(json!({"where": {"title": {"_in": ["Hello", "Bonjour"]}}})),
            )
            .await
            .unwrap();

        let call = collection.last_call().unwrap();
        assert_eq!(call.op, "find");
        assert_eq!(
            call.selector,
            json!({"title_intl.value": {"$in": ["Hello", "Bonjour"]}})
        );
        assert_eq!(call.options, json!({"limit": 20}));
    }

    // Scenario: filter on a field the schema does not declare.
    // Expected Outcome: UnknownField, and nothing reaches the backend.
    #[traced_test]
    #[tokio::test]
    async fn tc04_unknown_field_never_reaches_backend() {
        let collection = seeded(1);
        let connector = Connector::default();

        let err = connector
            .find_filtered(
                &collection,
                &request(json!({"where": {"_or": [{"slug": {"_eq": "a"}}, {"author": {"_eq": "b"}}]}})),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ConnectorError::Filter(FilterError::UnknownField(ref field)) if field == "author"
        ));
        assert!(collection.calls().is_empty());
    }

    // Scenario: create a document, then read, update and delete it by its public id.
    // Expected Outcome: every single-document call is keyed by `_id`.
    #[traced_test]
    #[tokio::test]
    async fn tc05_document_lifecycle_by_public_id() {
        let collection = MemoryCollection::new();
        let connector = Connector::default();

        let created = connector
            .create(
                &collection,
                document(json!({"slug": "hello", "status": "draft"})),
                InsertOptions,
            )
            .await
            .unwrap();
        let id = created.get("_id").cloned().unwrap();
        let by_id = selector(json!({"documentId": id.clone()}));

        let fetched = connector
            .get(&collection, &by_id, QueryOptions::default())
            .await
            .unwrap()
            .expect("document exists");
        assert_eq!(fetched.get("slug"), Some(&json!("hello")));
        assert_eq!(collection.last_call().unwrap().selector, json!({"_id": id}));

        let result = connector
            .update(
                &collection,
                &by_id,
                document(json!({"$set": {"status": "published"}})),
                UpdateOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 1);

        let fetched = connector
            .get(&collection, &by_id, QueryOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.get("status"), Some(&json!("published")));

        let deleted = connector
            .delete(&collection, &by_id, DeleteOptions)
            .await
            .unwrap();
        assert_eq!(deleted.deleted_count, 1);
        assert_eq!(collection.last_call().unwrap().selector, json!({"_id": id}));
        assert_eq!(collection.len(), 0);

        // the caller's selector still carries the public key
        assert_eq!(by_id.get("documentId"), Some(&id));
    }

    // Scenario: single-document lookup by a backend-native field.
    // Expected Outcome: the selector is passed through unchanged.
    #[traced_test]
    #[tokio::test]
    async fn tc06_lookup_by_slug() {
        let collection = seeded(3);
        let connector = Connector::default();

        let found = connector
            .get(&collection, &selector(json!({"slug": "post-1"})), QueryOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.get("_id"), Some(&json!("p1")));
        assert_eq!(collection.last_call().unwrap().selector, json!({"slug": "post-1"}));
        assert!(logs_contain("get"));
    }

    // Scenario: upsert through the connector when nothing matches.
    // Expected Outcome: the backend reports the upserted id.
    #[traced_test]
    #[tokio::test]
    async fn tc07_upsert() {
        let collection = MemoryCollection::new();
        let connector = Connector::default();

        let result = connector
            .update(
                &collection,
                &selector(json!({"documentId": "fixed-id"})),
                document(json!({"$set": {"slug": "new"}})),
                UpdateOptions {
                    upsert: true,
                    multi: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.upserted_id, Some(json!("fixed-id")));
        assert_eq!(collection.len(), 1);
    }

    // Scenario: the backend is unreachable.
    // Expected Outcome: its error is returned to the caller unchanged.
    #[traced_test]
    #[tokio::test]
    async fn tc08_backend_errors_pass_through() {
        let collection = MemoryCollection::offline();
        let connector = Connector::default();

        let err = connector
            .get(&collection, &selector(json!({"documentId": "x"})), QueryOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, MemoryError::ConnectionLost);

        let err = connector
            .count_filtered(&collection, &FilterRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Backend(MemoryError::ConnectionLost)));
    }

    // Scenario: many callers plan and read concurrently through one connector.
    // Expected Outcome: every call completes with its own compiled query.
    #[traced_test]
    #[tokio::test]
    async fn tc09_concurrent_reads() {
        let collection = Arc::new(seeded(50));
        let connector = Connector::default();

        let handles = (1..=20u64).map(|limit| {
            let collection = Arc::clone(&collection);
            tokio::spawn(async move {
                let req = request(json!({
                    "where": {"score": {"_gte": limit}},
                    "limit": limit,
                }));
                connector.find_filtered(collection.as_ref(), &req).await
            })
        });

        let results = futures::future::join_all(handles).await;
        for (idx, result) in results.into_iter().enumerate() {
            let docs = result.expect("task completed").expect("find succeeded");
            assert_eq!(docs.len(), idx + 1);
        }
        assert_eq!(collection.calls().len(), 20);
    }

    // Scenario: the `search` key alongside a regular predicate.
    // Expected Outcome: search is ignored, the predicate is compiled.
    #[traced_test]
    #[tokio::test]
    async fn tc10_search_is_ignored() {
        let collection = MemoryCollection::new();
        let connector = Connector::default();

        let query = connector
            .filter(
                &collection,
                &request(json!({"where": {"search": "rust", "status": {"_neq": "draft"}}})),
            )
            .unwrap();

        assert_eq!(query.selector.to_json(), json!({"status": {"$ne": "draft"}}));
        assert_eq!(collection.name(), "posts");
    }
}
