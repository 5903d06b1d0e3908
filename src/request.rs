//! JSON max-pain requests over raw rows, used by the wasm bindings.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::loader;
use crate::max_pain;
use crate::model::{ColumnMap, OptionSide, PriceRange, RawRow};

/// `{"calls": [{"Strike": ..}], "puts": [..], "columns"?, "strike_range"?, "candidates"?}`
#[derive(Debug, Deserialize)]
pub struct MaxPainRequest {
    pub calls: Vec<RawRow>,
    pub puts: Vec<RawRow>,
    #[serde(default)]
    pub columns: ColumnMap,
    #[serde(default)]
    pub strike_range: Option<PriceRange>,
    #[serde(default)]
    pub candidates: Option<Vec<f64>>,
}

/// Answer a request given as JSON text. Unparseable requests come back
/// as `{"error": ..}`; no strikes at all gives `"max_pain": null`.
pub fn max_pain_response(json: &str) -> Value {
    let req: MaxPainRequest = match serde_json::from_str(json) {
        Ok(r) => r,
        Err(e) => return json!({ "error": format!("JSON parse error: {}", e) }),
    };
    let calls = loader::load(&req.calls, &req.columns, req.strike_range, OptionSide::Call);
    let puts = loader::load(&req.puts, &req.columns, req.strike_range, OptionSide::Put);
    let result = max_pain::compute_max_pain(&calls, &puts, req.candidates.as_deref());
    json!({
        "max_pain": result,
        "calls": calls.len(),
        "puts": puts.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chains_give_null() {
        let out = max_pain_response(r#"{"calls": [], "puts": []}"#);
        assert_eq!(out["max_pain"], Value::Null);
        assert_eq!(out["calls"], json!(0));
        assert_eq!(out["puts"], json!(0));
    }

    #[test]
    fn test_rows_in_result_out() {
        let out = max_pain_response(
            r#"{
                "calls": [{"Strike": 100, "Change": 1, "At Close": 10},
                          {"Strike": "110", "Change": -2, "At Close": "5"}],
                "puts":  [{"Strike": 100, "Change": 0, "At Close": 2},
                          {"Strike": 110, "Change": 3, "At Close": "4"},
                          {"Strike": true, "Change": 3, "At Close": 4}]
            }"#,
        );
        // At 100 only the 110 puts pay: 10 x 4. At 110 the 100 calls pay 10 x 10.
        assert_eq!(out["max_pain"]["strike"], json!(100.0));
        assert_eq!(out["max_pain"]["total_loss"], json!(40.0));
        assert_eq!(out["calls"], json!(2));
        assert_eq!(out["puts"], json!(2));
    }

    #[test]
    fn test_bad_json_is_error_object() {
        let out = max_pain_response("{not json");
        assert!(out["error"].as_str().unwrap().starts_with("JSON parse error"));
    }
}
