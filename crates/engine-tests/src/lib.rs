#![allow(dead_code)]

use model::schema::{field::FieldMetadata, registry::Schema};

pub mod integration;
pub mod utils;

/// Collection used across the end-to-end tests.
const POSTS_COLLECTION: &str = "posts";

/// Schema of the `posts` collection: `title` is stored per locale.
pub fn posts_schema() -> Schema {
    Schema::new()
        .with_field("_id", FieldMetadata::plain())
        .with_field("slug", FieldMetadata::plain())
        .with_field("title", FieldMetadata::localized())
        .with_field("status", FieldMetadata::plain())
        .with_field("score", FieldMetadata::plain())
        .with_field("tags", FieldMetadata::plain())
}
