//! Shared accessors for the browser singletons.

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| "no window".into())
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| "no document".into())
}

/// Logical viewport size in CSS pixels.
pub fn viewport() -> Result<(f64, f64), JsValue> {
    let win = window()?;
    let w = win
        .inner_width()?
        .as_f64()
        .ok_or("inner_width is not a number")?;
    let h = win
        .inner_height()?
        .as_f64()
        .ok_or("inner_height is not a number")?;
    Ok((w, h))
}
