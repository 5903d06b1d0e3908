use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Names of the export columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnMap {
    /// Strike price column.
    #[serde(default = "default_strike")]
    pub strike: String,
    /// Session change in open interest ("variable value").
    #[serde(default = "default_change")]
    pub change: String,
    /// Open interest at close ("stock value"). May carry thousands separators.
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_strike() -> String {
    "Strike".to_string()
}

fn default_change() -> String {
    "Change".to_string()
}

fn default_close() -> String {
    "At Close".to_string()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            strike: default_strike(),
            change: default_change(),
            close: default_close(),
        }
    }
}

impl ColumnMap {
    pub fn names(&self) -> [&str; 3] {
        [&self.strike, &self.change, &self.close]
    }
}
