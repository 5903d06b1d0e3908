use wasm_bindgen::prelude::*;

use crate::request;

/// Max pain from raw rows, JSON in and JSON out.
///
/// Input: `{"calls": [{"Strike": ..}], "puts": [..], "columns"?, "strike_range"?, "candidates"?}`.
#[wasm_bindgen]
pub fn max_pain_json(json: &str) -> String {
    request::max_pain_response(json).to_string()
}

#[wasm_bindgen]
pub fn get_schema() -> String {
    crate::schema::get_schema_json()
}
