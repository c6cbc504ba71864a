//! WebAssembly bindings.
//!
//! Exposes the named-start search to JavaScript. Input and output objects
//! mirror the serde representation of [`LocationMatrix`], [`KBestConfig`]
//! and [`KBestResult`](crate::heldkarp::KBestResult).

use crate::heldkarp::{KBestConfig, KBestRunner};
use crate::matrix::LocationMatrix;
use wasm_bindgen::prelude::*;

#[derive(serde::Deserialize)]
struct TourRequest {
    locations: LocationMatrix,
    start: String,
    #[serde(default)]
    config: KBestConfig,
}

/// Finds the K cheapest tours for `{ locations, start, config? }`.
///
/// Rejects with the error message on malformed input.
#[wasm_bindgen(js_name = solveKBestTours)]
pub fn solve_k_best_tours(request: JsValue) -> Result<JsValue, JsValue> {
    let request: TourRequest = serde_wasm_bindgen::from_value(request)?;
    let result = KBestRunner::run_named(&request.locations, &request.start, &request.config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
