use error::SettingsError;
use planner::query::planner::{DEFAULT_MAX_DOCUMENTS, FilterPlanner};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub mod error;

/// Environment variable overriding `maxDocumentsPerRequest`.
pub const MAX_DOCUMENTS_ENV: &str = "DOCQ_MAX_DOCUMENTS_PER_REQUEST";

/// Runtime settings consulted by the query layer.
///
/// Precedence, lowest first: built-in defaults, a JSON settings document,
/// environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Upper bound on the page size of any multi-document read.
    pub max_documents_per_request: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_documents_per_request: DEFAULT_MAX_DOCUMENTS,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SettingsError::Read {
                path: path.display().to_string(),
                source,
            })?;

        info!("Loaded settings from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MAX_DOCUMENTS_ENV) {
            let value = raw.trim().parse::<u64>().map_err(|e| SettingsError::Invalid {
                name: MAX_DOCUMENTS_ENV.to_string(),
                reason: format!("'{raw}' is not a non-negative integer: {e}"),
            })?;
            debug!("Overriding maxDocumentsPerRequest from environment: {value}");
            self.max_documents_per_request = value;
        }

        self.validate()
    }

    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.max_documents_per_request == 0 {
            return Err(SettingsError::Invalid {
                name: "maxDocumentsPerRequest".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }

    pub fn max_documents_per_request(&self) -> u64 {
        self.max_documents_per_request
    }

    /// A planner bound to this configuration's pagination ceiling.
    pub fn filter_planner(&self) -> FilterPlanner {
        FilterPlanner::new(self.max_documents_per_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_documents_per_request(), 1000);
        assert_eq!(settings.filter_planner().max_documents(), 1000);
    }

    #[test]
    fn test_from_json_str() {
        let settings = Settings::from_json_str(r#"{"maxDocumentsPerRequest": 250}"#).unwrap();
        assert_eq!(settings.max_documents_per_request(), 250);

        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_zero_ceiling_is_invalid() {
        let err = Settings::from_json_str(r#"{"maxDocumentsPerRequest": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json_str(r#"{"maxDocumentsPerRequest": "lots"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .with_overrides(|key| (key == MAX_DOCUMENTS_ENV).then(|| "75".to_string()))
            .unwrap();
        assert_eq!(settings.max_documents_per_request(), 75);

        let settings = Settings::default().with_overrides(|_| None).unwrap();
        assert_eq!(settings.max_documents_per_request(), 1000);

        let err = Settings::default()
            .with_overrides(|_| Some("-3".to_string()))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxDocumentsPerRequest": 10}}"#).unwrap();

        let settings = Settings::from_file(file.path()).await.unwrap();
        assert_eq!(settings.max_documents_per_request(), 10);
    }

    #[tokio::test]
    async fn test_environment_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxDocumentsPerRequest": 10}}"#).unwrap();

        let settings = Settings::from_file(file.path())
            .await
            .unwrap()
            .with_overrides(|key| (key == MAX_DOCUMENTS_ENV).then(|| "5".to_string()))
            .unwrap();
        assert_eq!(settings.max_documents_per_request(), 5);
        assert_eq!(settings.filter_planner().max_documents(), 5);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Settings::from_file("/definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
