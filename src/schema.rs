use schemars::schema_for;

use crate::config::ChartConfig;

/// Generate and print the JSON Schema for `ChartConfig`.
pub fn run() -> anyhow::Result<()> {
    println!("{}", get_schema_json());
    Ok(())
}

/// JSON Schema for `ChartConfig`, pretty-printed.
pub fn get_schema_json() -> String {
    let schema = schema_for!(ChartConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        serde_json::json!({ "error": format!("Serialization error: {e}") }).to_string()
    })
}
