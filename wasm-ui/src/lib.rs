//! Web UI for the quantum teleportation demo
//!
//! A Yew front end that binds the page controls to the `teleport-ui`
//! controller, talks to the simulation service with `fetch`, and draws the
//! results with Plotly when the page has loaded it.

mod api;
mod app;
pub mod components;
pub mod plotly;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    yew::Renderer::<app::App>::new().render();
}
