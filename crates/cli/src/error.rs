use engine_config::settings::error::SettingsError;
use model::filter::error::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid filter request: {0}")]
    Filter(#[from] FilterError),

    #[error("Selector must be a JSON object, got {0}")]
    InvalidSelector(&'static str),
}
