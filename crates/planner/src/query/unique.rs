use model::core::selector::Selector;

/// Identifier key exposed to API clients.
pub const PUBLIC_ID_KEY: &str = "documentId";

/// Primary-key field of the backend.
pub const PRIMARY_KEY: &str = "_id";

/// Rewrites a single-document selector into backend form.
///
/// `{ documentId: x }` becomes `{ _id: x }`. Selectors without the public
/// identifier (lookups by slug or any other field) come back unchanged, so
/// applying this twice is the same as applying it once. The caller's
/// selector is never modified.
pub fn normalize_unique(selector: &Selector) -> Selector {
    let mut normalized = selector.clone();
    if let Some(id) = normalized.remove(PUBLIC_ID_KEY) {
        normalized.insert(PRIMARY_KEY, id);
    }
    normalized
}

/// Multi-document selectors are already in backend form.
pub fn normalize_selector(selector: &Selector) -> Selector {
    selector.clone()
}
