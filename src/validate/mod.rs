mod input;
mod ranges;

use std::path::Path;

use thiserror::Error;

use crate::config::ChartConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} has min {min} greater than max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },

    #[error("{field} has a non-finite bound")]
    NonFiniteRange { field: String },

    #[error("future_spot_differential must be finite, got {value}")]
    NonFiniteDifferential { value: f64 },

    #[error("Column name for `{role}` is empty")]
    EmptyColumn { role: String },

    #[error("Column `{name}` is used for both {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: String,
        second: String,
    },

    #[error("Split input uses the same file `{path}` for calls and puts")]
    SameSplitFile { path: String },

    #[error("Contract label is empty; omit it to auto-detect")]
    EmptyContractLabel,

    #[error("Output path `{path}` should end in .html")]
    OutputNotHtml { path: String },
}

/// Load and fully validate a chart config from a JSON file.
pub fn load_and_validate(path: &Path) -> Result<ChartConfig, Vec<ConfigError>> {
    let contents = std::fs::read_to_string(path).map_err(|e| vec![ConfigError::Io(e)])?;
    let config: ChartConfig =
        serde_json::from_str(&contents).map_err(|e| vec![ConfigError::Json(e)])?;
    validate(&config)?;
    Ok(config)
}

/// Validate a config, collecting all errors.
pub fn validate(config: &ChartConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    errors.extend(ranges::check_ranges(config));
    errors.extend(ranges::check_differential(config));
    errors.extend(input::check_columns(config));
    errors.extend(input::check_input(config));
    errors.extend(input::check_output(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join errors into one indented message for `anyhow` callers.
pub fn describe(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// CLI entry point for the `validate` subcommand.
pub fn run(path: &Path) -> anyhow::Result<()> {
    match load_and_validate(path) {
        Ok(cfg) => {
            let input = match &cfg.input {
                crate::config::InputSource::Combined { path } => {
                    format!("combined export {}", path.display())
                }
                crate::config::InputSource::Split { calls, puts } => {
                    format!("call sheet {}, put sheet {}", calls.display(), puts.display())
                }
            };
            println!("Config is valid. Reads {input}, writes {}.", cfg.output.display());
            Ok(())
        }
        Err(errors) => {
            eprintln!("Validation failed with {} error(s):", errors.len());
            for (i, e) in errors.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, e);
            }
            std::process::exit(1);
        }
    }
}
