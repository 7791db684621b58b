use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use engine_config::settings::Settings;
use model::{
    core::{selector::Selector, value::kind_of},
    filter::request::FilterRequest,
    schema::registry::Schema,
};
use planner::{plan::CompiledQuery, query::unique::normalize_unique};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "docq", version = "0.1.0", about = "Document query compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            schema,
            request,
            settings,
            output,
        } => {
            info!("Planning request {request} against schema {schema}");

            let query = plan(&schema, &request, settings.as_deref()).await?;
            match output {
                Some(path) => output::write_plan(&query, path).await?,
                None => output::print_plan(&query)?,
            }
        }
        Commands::Normalize { selector } => {
            let normalized = normalize(&selector)?;
            let json =
                serde_json::to_string_pretty(&normalized).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
    }

    Ok(())
}

async fn load_settings(path: Option<&str>) -> Result<Settings, CliError> {
    let settings = match path {
        Some(path) => Settings::from_file(path).await?,
        None => Settings::default(),
    };
    Ok(settings.with_env_overrides()?)
}

async fn plan(
    schema_path: &str,
    request_path: &str,
    settings_path: Option<&str>,
) -> Result<CompiledQuery, CliError> {
    let settings = load_settings(settings_path).await?;

    let schema: Schema = serde_json::from_str(&tokio::fs::read_to_string(schema_path).await?)?;
    let request: Value = serde_json::from_str(&tokio::fs::read_to_string(request_path).await?)?;
    let request = FilterRequest::from_json(&request)?;

    Ok(settings.filter_planner().plan(&schema, &request)?)
}

fn normalize(raw: &str) -> Result<Selector, CliError> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Object(map) => Ok(normalize_unique(&Selector::from(map))),
        other => Err(CliError::InvalidSelector(kind_of(&other))),
    }
}
