use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A single cell as it arrives from a spreadsheet export.
///
/// Exports mix numeric cells with numbers-as-text (often carrying
/// thousands separators), so both shapes are kept until normalization.
/// From JSON, anything that is neither a number nor a string (bools,
/// arrays, objects) reads as `Empty` rather than failing the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl RawValue {
    /// Parse as a finite number. Unparseable text, blanks, NaN and
    /// infinities all read as missing.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Like [`RawValue::to_number`], but strips `,` thousands separators
    /// from text first (`"1,234.5"` reads as `1234.5`).
    pub fn to_number_stripping_separators(&self) -> Option<f64> {
        match self {
            RawValue::Text(s) if s.contains(',') => {
                RawValue::Text(s.replace(',', "")).to_number()
            }
            other => other.to_number(),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
            serde_json::Value::String(s) => RawValue::Text(s),
            _ => RawValue::Empty,
        })
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(s.to_string())
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// One raw record: column name to cell. Columns absent from the record
/// read as [`RawValue::Empty`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: HashMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and in-memory sources.
    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<RawValue>) {
        self.fields.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> &RawValue {
        static EMPTY: RawValue = RawValue::Empty;
        self.fields.get(column).unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_numbers_parse() {
        assert_eq!(RawValue::from("3250").to_number(), Some(3250.0));
        assert_eq!(RawValue::from(" -12 ").to_number(), Some(-12.0));
        assert_eq!(RawValue::from("+7").to_number(), Some(7.0));
        assert_eq!(RawValue::Number(1.5).to_number(), Some(1.5));
    }

    #[test]
    fn test_unparseable_is_missing() {
        assert_eq!(RawValue::from("N/A").to_number(), None);
        assert_eq!(RawValue::from("").to_number(), None);
        assert_eq!(RawValue::Empty.to_number(), None);
        assert_eq!(RawValue::Number(f64::NAN).to_number(), None);
        assert_eq!(RawValue::from("inf").to_number(), None);
    }

    #[test]
    fn test_separator_stripping() {
        assert_eq!(
            RawValue::from("1,234.5").to_number_stripping_separators(),
            Some(1234.5)
        );
        assert_eq!(
            RawValue::from("12,345,678").to_number_stripping_separators(),
            Some(12_345_678.0)
        );
        // Plain parsing keeps rejecting separators.
        assert_eq!(RawValue::from("1,234").to_number(), None);
        assert_eq!(RawValue::from("abc").to_number_stripping_separators(), None);
    }

    #[test]
    fn test_missing_column_reads_empty() {
        let row = RawRow::new().with("Strike", "3300");
        assert_eq!(row.get("Change"), &RawValue::Empty);
    }

    #[test]
    fn test_deserialize_mixed_json() {
        let row: RawRow =
            serde_json::from_str(r#"{"Strike": 3300, "At Close": "1,200", "Change": null}"#)
                .unwrap();
        assert_eq!(row.get("Strike"), &RawValue::Number(3300.0));
        assert_eq!(row.get("At Close"), &RawValue::Text("1,200".into()));
        assert_eq!(row.get("Change"), &RawValue::Empty);
    }

    #[test]
    fn test_odd_json_cells_read_empty() {
        let rows: Vec<RawRow> = serde_json::from_str(
            r#"[
                {"Strike": 100, "Change": 1, "At Close": 10},
                {"Strike": true, "Change": [1, 2], "At Close": {"v": 3}}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Strike"), &RawValue::Number(100.0));
        assert_eq!(rows[1].get("Strike"), &RawValue::Empty);
        assert_eq!(rows[1].get("Change"), &RawValue::Empty);
        assert_eq!(rows[1].get("At Close"), &RawValue::Empty);
    }
}
