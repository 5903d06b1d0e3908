use serde::Serialize;

use crate::max_pain::MaxPain;
use crate::model::{OptionChain, PriceRange};

pub const POSITIVE_COLOR: &str = "#2196F3";
pub const NEGATIVE_COLOR: &str = "#F44336";
pub const LEVEL_LINE_COLOR: &str = "#FF9800";
pub const LEVEL_BAR_COLOR: &str = "#4CAF50";
pub const LEVEL_LABEL_COLOR: &str = "#2E7D32";

/// One display-ready point: spot-equivalent price with both values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub price: f64,
    pub change: f64,
    pub level: f64,
}

/// Shift strikes to spot-equivalent prices and restrict to the display range.
///
/// The display range applies to the adjusted price, not the raw strike.
/// Output is ascending by price.
pub fn prepare(
    chain: &OptionChain,
    future_spot_differential: f64,
    display_range: Option<PriceRange>,
) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = chain
        .rows()
        .iter()
        .map(|r| ChartPoint {
            price: r.strike - future_spot_differential,
            change: r.change_in_open_interest,
            level: r.open_interest_at_close,
        })
        .filter(|p| display_range.is_none_or(|range| range.contains(p.price)))
        .collect();
    points.sort_by(|a, b| a.price.total_cmp(&b.price));
    points
}

/// Bar color for a change value: non-negative and negative differ.
pub fn bar_color(change: f64) -> &'static str {
    if change >= 0.0 {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

/// Data label text for a bar.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Price axis tick text. Prices are shown as whole numbers.
pub fn format_price(price: f64) -> String {
    format!("{}", price.trunc() as i64)
}

/// Value-axis bounds padded by 10% away from zero; zero stays in view.
pub fn value_axis_bounds(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = if max > 0.0 { max * 1.1 } else { 0.0 };
    let lower = if min < 0.0 { min * 1.1 } else { 0.0 };
    (lower, upper)
}

/// Spot-equivalent price of the max-pain strike, if there is one.
pub fn max_pain_price(max_pain: Option<&MaxPain>, future_spot_differential: f64) -> Option<f64> {
    max_pain.map(|mp| mp.strike - future_spot_differential)
}
