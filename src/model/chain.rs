use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::columns::ColumnMap;
use super::raw::{RawRow, RawValue};

/// Which side of the option chain a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Marker word used by the export ahead of each table.
    pub fn marker(&self) -> &'static str {
        match self {
            OptionSide::Call => "Calls",
            OptionSide::Put => "Puts",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker())
    }
}

/// One strike of one side of the chain, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OptionChainRow {
    /// Raw strike price (before any future/spot adjustment).
    pub strike: f64,
    /// Signed change in open interest for the session ("variable value").
    pub change_in_open_interest: f64,
    /// Open interest at session close ("stock value").
    pub open_interest_at_close: f64,
}

/// Cleaned rows of one side, sorted ascending by strike.
///
/// Only the loader builds these, so the ordering and finiteness
/// invariants hold for every instance.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct OptionChain {
    pub side: OptionSide,
    rows: Vec<OptionChainRow>,
}

impl OptionChain {
    pub(crate) fn from_sorted(side: OptionSide, rows: Vec<OptionChainRow>) -> Self {
        Self { side, rows }
    }

    pub fn empty(side: OptionSide) -> Self {
        Self {
            side,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[OptionChainRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.strike)
    }

    pub fn total_change(&self) -> f64 {
        self.rows.iter().map(|r| r.change_in_open_interest).sum()
    }

    pub fn total_open_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.open_interest_at_close).sum()
    }

    /// Render back into raw rows under the given column names, so the
    /// cleaned chain can be fed through the loader again.
    pub fn to_raw_rows(&self, columns: &ColumnMap) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|r| {
                RawRow::new()
                    .with(&columns.strike, RawValue::Number(r.strike))
                    .with(&columns.change, RawValue::Number(r.change_in_open_interest))
                    .with(&columns.close, RawValue::Number(r.open_interest_at_close))
            })
            .collect()
    }
}
