use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ColumnMap, PriceRange};

/// Where the call and put tables come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputSource {
    /// One export holding both tables, each introduced by a
    /// `<contract> Calls` / `<contract> Puts` row and closed by a `TOTALS` row.
    Combined {
        /// Path to the CSV export.
        path: PathBuf,
    },
    /// Separate call and put sheets, each with a header row.
    Split {
        /// Path to the call sheet CSV.
        calls: PathBuf,
        /// Path to the put sheet CSV.
        puts: PathBuf,
    },
}

/// Which series each panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Change bars and open-interest line on one price axis.
    #[default]
    Combo,
    /// Change bars only, colored by sign.
    Change,
    /// Open-interest bars only.
    Level,
}

/// Where the price axis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Price on the vertical axis, horizontal bars.
    #[default]
    Vertical,
    /// Price on the horizontal axis, vertical bars.
    Horizontal,
}

/// Full configuration for one chart run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartConfig {
    /// Input export(s).
    pub input: InputSource,
    /// Column names in the export.
    #[serde(default)]
    pub columns: ColumnMap,
    /// Constant subtracted from each strike to get a spot-equivalent price.
    #[serde(default)]
    pub future_spot_differential: f64,
    /// Strike filter applied while loading (raw strikes, inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_range: Option<PriceRange>,
    /// Display filter applied to spot-equivalent prices (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_display_range: Option<PriceRange>,
    /// Contract to chart, e.g. "OG DEC 25". Auto-detected when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_label: Option<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub orientation: Orientation,
    /// Overlay the max-pain price on every panel.
    #[serde(default = "default_true")]
    pub show_max_pain: bool,
    /// Output HTML path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from("voi_chart.html")
}

impl ChartConfig {
    /// Config with defaults for everything but the input.
    pub fn new(input: InputSource) -> Self {
        Self {
            input,
            columns: ColumnMap::default(),
            future_spot_differential: 0.0,
            strike_range: None,
            price_display_range: None,
            contract_label: None,
            layout: Layout::default(),
            orientation: Orientation::default(),
            show_max_pain: true,
            output: default_output(),
        }
    }
}
