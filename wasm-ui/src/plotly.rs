//! Bridge to the Plotly library loaded by the page, if any.

use js_sys::{Function, JSON, Reflect};
use teleport_ui::PlotSpec;
use wasm_bindgen::{JsCast, JsValue};

fn plotly() -> Option<JsValue> {
    let window = web_sys::window()?;
    let plotly = Reflect::get(&window, &JsValue::from_str("Plotly")).ok()?;
    if plotly.is_object() { Some(plotly) } else { None }
}

/// Whether `window.Plotly` exists.
pub fn is_available() -> bool {
    plotly().is_some()
}

/// Draw `spec` into `element` with `Plotly.newPlot`.
pub fn new_plot(element: &web_sys::Element, spec: &PlotSpec) -> Result<(), JsValue> {
    let plotly = plotly().ok_or_else(|| JsValue::from_str("Plotly is not loaded"))?;
    let new_plot: Function = Reflect::get(&plotly, &JsValue::from_str("newPlot"))?.dyn_into()?;

    let data = serde_json::to_string(&spec.data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let layout =
        serde_json::to_string(&spec.layout).map_err(|e| JsValue::from_str(&e.to_string()))?;

    new_plot.call3(&plotly, element, &JSON::parse(&data)?, &JSON::parse(&layout)?)?;
    Ok(())
}
