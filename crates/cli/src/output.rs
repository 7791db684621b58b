use crate::error::CliError;
use planner::plan::CompiledQuery;
use serde::Serialize;

#[derive(Serialize)]
struct PlanReport<'a> {
    #[serde(flatten)]
    query: &'a CompiledQuery,
    fingerprint: String,
}

pub fn render_plan(query: &CompiledQuery) -> Result<String, CliError> {
    let fingerprint = query.fingerprint().map_err(CliError::JsonSerialize)?;
    serde_json::to_string_pretty(&PlanReport { query, fingerprint }).map_err(CliError::JsonSerialize)
}

pub async fn write_plan(query: &CompiledQuery, path: String) -> Result<(), CliError> {
    let json = render_plan(query)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub fn print_plan(query: &CompiledQuery) -> Result<(), CliError> {
    println!("{}", render_plan(query)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::query::options::QueryOptions;
    use serde_json::{Value, json};

    #[test]
    fn test_report_carries_fingerprint() {
        let query = CompiledQuery {
            selector: serde_json::from_value(json!({"status": {"$eq": "active"}})).unwrap(),
            options: QueryOptions::with_limit(20),
            touched_fields: ["status".to_string()].into(),
        };

        let report: Value = serde_json::from_str(&render_plan(&query).unwrap()).unwrap();
        assert_eq!(report["selector"], json!({"status": {"$eq": "active"}}));
        assert_eq!(report["options"], json!({"limit": 20}));
        assert_eq!(report["touchedFields"], json!(["status"]));
        assert_eq!(report["fingerprint"], json!(query.fingerprint().unwrap()));
    }
}
