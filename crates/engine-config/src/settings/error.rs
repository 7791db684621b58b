use thiserror::Error;

/// Errors raised while loading or validating runtime settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON for `Settings`.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting holds a value outside its allowed range.
    #[error("Invalid value for setting '{name}': {reason}")]
    Invalid { name: String, reason: String },
}
