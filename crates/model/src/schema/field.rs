use serde::{Deserialize, Serialize};

/// Suffix of the container that stores a localized field's per-locale values.
pub const LOCALE_CONTAINER_SUFFIX: &str = "_intl";

/// Projection of the translated text inside a locale container entry.
pub const LOCALE_VALUE_KEY: &str = "value";

/// Per-field descriptor owned by the collection schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Stored as an array of `{ locale, value }` records instead of a scalar.
    #[serde(default, alias = "intl", alias = "isLocalized")]
    pub localized: bool,
}

impl FieldMetadata {
    pub fn plain() -> Self {
        FieldMetadata { localized: false }
    }

    pub fn localized() -> Self {
        FieldMetadata { localized: true }
    }

    pub fn is_localized(&self) -> bool {
        self.localized
    }

    /// Physical path a filter on `field` must target.
    ///
    /// Localized fields are queried through the `value` projection of their
    /// locale container, e.g. `title` becomes `title_intl.value`.
    pub fn storage_path(&self, field: &str) -> String {
        if self.localized {
            format!("{field}{LOCALE_CONTAINER_SUFFIX}.{LOCALE_VALUE_KEY}")
        } else {
            field.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path() {
        assert_eq!(FieldMetadata::plain().storage_path("title"), "title");
        assert_eq!(
            FieldMetadata::localized().storage_path("title"),
            "title_intl.value"
        );
    }

    #[test]
    fn test_deserialize_aliases() {
        let meta: FieldMetadata = serde_json::from_str(r#"{"intl": true}"#).unwrap();
        assert!(meta.is_localized());
        let meta: FieldMetadata = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!meta.is_localized());
    }
}
