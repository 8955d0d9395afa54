//! # teleport-ui
//!
//! Controller core for a quantum teleportation demo page.
//!
//! The page lets a visitor pick the state to teleport (an RY angle), a
//! noise level and a shot count, then asks a simulation service to run the
//! protocol. This crate holds everything between the controls and the
//! rendered results, independent of any UI framework:
//!
//! - **Input binding** ([`params`]): slider values and their labels
//! - **Step navigation** ([`steps`]): walk the seven protocol steps
//! - **Wire contract** ([`api`]): request bodies and response decoding
//! - **Rendering models** ([`chart`]): Plotly figures and fallback bars
//! - **Page state** ([`controller`]): busy flags, results, reset
//!
//! The simulation itself lives in the service. The `wasm-ui` crate mounts
//! this state in a browser; the `teleport-run` binary drives it from a
//! terminal.
//!
//! ## Example
//!
//! ```
//! use teleport_ui::{Controller, Endpoint};
//!
//! let mut page = Controller::new();
//! page.set_noise("0.15").unwrap();
//! assert_eq!(page.noise_label, "0.15 (Fair)");
//!
//! let request = page.begin(Endpoint::Simulate).unwrap();
//! assert_eq!(request.endpoint().path(), "/simulate");
//! // a second click while the first is in flight does nothing
//! assert!(page.begin(Endpoint::Simulate).is_none());
//! ```

pub mod api;
pub mod chart;
#[cfg(not(target_arch = "wasm32"))]
pub mod client;
pub mod controller;
pub mod error;
pub mod params;
pub mod steps;

pub use api::{
    Endpoint, NoiseAnalysisRequest, NoiseAnalysisResponse, SimulateRequest, SimulateResponse,
    decode_response,
};
pub use chart::{MeasurementBar, PlotSpec, measurement_bars, measurement_plot, noise_plot};
#[cfg(not(target_arch = "wasm32"))]
pub use client::{ClientConfig, ServiceClient};
pub use controller::{ActionState, Controller, NoiseAnalysisView, Request, SimulationView};
pub use error::ClientError;
pub use params::{ControlParams, NoiseQuality, angle_label, noise_label};
pub use steps::StepNavigator;
