use crate::config::{ChartConfig, InputSource};

use super::ConfigError;

/// Check that column names are non-empty and distinct.
pub fn check_columns(config: &ChartConfig) -> Vec<ConfigError> {
    let cols = &config.columns;
    let roles = [
        ("strike", cols.strike.as_str()),
        ("change", cols.change.as_str()),
        ("close", cols.close.as_str()),
    ];
    let mut errors = Vec::new();

    for (role, name) in roles {
        if name.trim().is_empty() {
            errors.push(ConfigError::EmptyColumn {
                role: role.to_string(),
            });
        }
    }

    for (i, (first, a)) in roles.iter().enumerate() {
        for (second, b) in &roles[i + 1..] {
            if !a.trim().is_empty() && a == b {
                errors.push(ConfigError::DuplicateColumn {
                    name: a.to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }

    errors
}

/// Check the input source and contract label.
pub fn check_input(config: &ChartConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if let InputSource::Split { calls, puts } = &config.input {
        if calls == puts {
            errors.push(ConfigError::SameSplitFile {
                path: calls.display().to_string(),
            });
        }
    }

    if let Some(label) = &config.contract_label {
        if label.trim().is_empty() {
            errors.push(ConfigError::EmptyContractLabel);
        }
    }

    errors
}

pub fn check_output(config: &ChartConfig) -> Vec<ConfigError> {
    let is_html = config
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    if is_html {
        vec![]
    } else {
        vec![ConfigError::OutputNotHtml {
            path: config.output.display().to_string(),
        }]
    }
}
