use crate::config::ChartConfig;
use crate::model::PriceRange;

use super::ConfigError;

/// Check that both optional ranges are finite and not inverted.
pub fn check_ranges(config: &ChartConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let named = [
        ("strike_range", config.strike_range),
        ("price_display_range", config.price_display_range),
    ];
    for (field, range) in named {
        if let Some(range) = range {
            errors.extend(check_range(field, &range));
        }
    }

    errors
}

fn check_range(field: &str, range: &PriceRange) -> Option<ConfigError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Some(ConfigError::NonFiniteRange {
            field: field.to_string(),
        });
    }
    if range.min > range.max {
        return Some(ConfigError::InvertedRange {
            field: field.to_string(),
            min: range.min,
            max: range.max,
        });
    }
    None
}

pub fn check_differential(config: &ChartConfig) -> Vec<ConfigError> {
    let value = config.future_spot_differential;
    if value.is_finite() {
        vec![]
    } else {
        vec![ConfigError::NonFiniteDifferential { value }]
    }
}
