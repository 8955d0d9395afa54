//! Page state for the teleportation demo.
//!
//! The controller owns everything the page displays. Event handlers call
//! into it and re-render from it; it never touches the DOM or the network.
//! A request cycle is `begin` (returns the request to send, or nothing if
//! that action is already in flight) followed by exactly one `finish_*`.

use serde::Serialize;

use crate::api::{
    Endpoint, NoiseAnalysisRequest, NoiseAnalysisResponse, SimulateRequest, SimulateResponse,
};
use crate::chart::{self, MeasurementBar, PlotSpec};
use crate::error::ClientError;
use crate::params::{
    self, ControlParams, RESET_ANGLE_LABEL, RESET_NOISE_LABEL, angle_label, noise_label,
};
use crate::steps::StepNavigator;

pub const BLOCH_PLACEHOLDER: &str = "Bloch sphere visualization loading...";
pub const MEASUREMENT_PLACEHOLDER: &str = "Measurement distribution will appear here";
pub const METRIC_PLACEHOLDER: &str = "-";

/// Whether a request for an action is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Running,
}

/// A request ready to be sent by whichever transport the caller uses.
/// Serializes as the bare request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Request {
    Simulate(SimulateRequest),
    NoiseAnalysis(NoiseAnalysisRequest),
}

impl Request {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Request::Simulate(_) => Endpoint::Simulate,
            Request::NoiseAnalysis(_) => Endpoint::NoiseAnalysis,
        }
    }

    /// JSON request body.
    pub fn body(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Rendered results of the last successful simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationView {
    pub bloch_uri: String,
    pub bars: Vec<MeasurementBar>,
    pub plot: PlotSpec,
    pub fidelity: String,
    pub noise: String,
}

impl SimulationView {
    pub fn from_response(resp: &SimulateResponse) -> Self {
        Self {
            bloch_uri: chart::png_data_uri(&resp.bloch_sphere),
            bars: chart::measurement_bars(&resp.counts, &resp.measurement_probabilities),
            plot: chart::measurement_plot(&resp.counts, &resp.measurement_probabilities),
            fidelity: chart::percent(resp.fidelity),
            noise: chart::percent(resp.noise_level),
        }
    }
}

/// Rendered results of the last successful noise analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseAnalysisView {
    pub plot: PlotSpec,
    pub image_uri: Option<String>,
    pub rows: Vec<(String, String)>,
}

impl NoiseAnalysisView {
    pub fn from_response(resp: &NoiseAnalysisResponse) -> Self {
        Self {
            plot: chart::noise_plot(&resp.noise_levels, &resp.fidelities),
            image_uri: resp.plot.as_deref().map(chart::png_data_uri),
            rows: chart::noise_rows(&resp.noise_levels, &resp.fidelities),
        }
    }
}

/// Text for the blocking alert after a failed request.
pub fn alert_message(endpoint: Endpoint, err: &ClientError) -> String {
    match err {
        ClientError::Service(msg) => format!("Error: {}", msg),
        other => format!("Error running {}: {}", endpoint.action(), other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub params: ControlParams,
    pub angle_label: String,
    pub noise_label: String,
    pub steps: StepNavigator,
    pub simulation: Option<SimulationView>,
    pub noise_analysis: Option<NoiseAnalysisView>,
    simulate_state: ActionState,
    noise_state: ActionState,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            params: ControlParams::default(),
            angle_label: RESET_ANGLE_LABEL.to_string(),
            noise_label: RESET_NOISE_LABEL.to_string(),
            steps: StepNavigator::new(),
            simulation: None,
            noise_analysis: None,
            simulate_state: ActionState::Idle,
            noise_state: ActionState::Idle,
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_angle(&mut self, text: &str) -> Result<(), ClientError> {
        let angle = params::parse_slider(text)?;
        self.params.psi_angle = angle;
        self.angle_label = angle_label(angle);
        Ok(())
    }

    pub fn set_noise(&mut self, text: &str) -> Result<(), ClientError> {
        let noise = params::parse_slider(text)?;
        self.params.noise_level = noise;
        self.noise_label = noise_label(noise);
        Ok(())
    }

    pub fn set_shots(&mut self, text: &str) -> Result<(), ClientError> {
        self.params.shots = params::parse_shots(text)?;
        Ok(())
    }

    pub fn state(&self, endpoint: Endpoint) -> ActionState {
        match endpoint {
            Endpoint::Simulate => self.simulate_state,
            Endpoint::NoiseAnalysis => self.noise_state,
        }
    }

    fn state_mut(&mut self, endpoint: Endpoint) -> &mut ActionState {
        match endpoint {
            Endpoint::Simulate => &mut self.simulate_state,
            Endpoint::NoiseAnalysis => &mut self.noise_state,
        }
    }

    pub fn is_running(&self, endpoint: Endpoint) -> bool {
        self.state(endpoint) == ActionState::Running
    }

    /// Mark `endpoint` as in flight and hand back the request to send.
    /// Returns `None` if a request for it is already running.
    pub fn begin(&mut self, endpoint: Endpoint) -> Option<Request> {
        if self.is_running(endpoint) {
            tracing::debug!(path = endpoint.path(), "request already in flight");
            return None;
        }
        *self.state_mut(endpoint) = ActionState::Running;
        let request = match endpoint {
            Endpoint::Simulate => Request::Simulate(self.params.simulate_request()),
            Endpoint::NoiseAnalysis => {
                Request::NoiseAnalysis(self.params.noise_analysis_request())
            }
        };
        tracing::debug!(path = endpoint.path(), ?request, "dispatching");
        Some(request)
    }

    /// Apply the outcome of a `/simulate` call. The action is idle again
    /// whatever the outcome; on failure the alert text is returned.
    pub fn finish_simulation(
        &mut self,
        result: Result<SimulateResponse, ClientError>,
    ) -> Result<(), String> {
        self.simulate_state = ActionState::Idle;
        match result {
            Ok(resp) => {
                self.steps
                    .load(resp.step_descriptions.clone(), resp.step_circuits.clone());
                self.simulation = Some(SimulationView::from_response(&resp));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "simulation failed");
                Err(alert_message(Endpoint::Simulate, &e))
            }
        }
    }

    /// Apply the outcome of a `/noise_analysis` call.
    pub fn finish_noise_analysis(
        &mut self,
        result: Result<NoiseAnalysisResponse, ClientError>,
    ) -> Result<(), String> {
        self.noise_state = ActionState::Idle;
        match result {
            Ok(resp) => {
                self.noise_analysis = Some(NoiseAnalysisView::from_response(&resp));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "noise analysis failed");
                Err(alert_message(Endpoint::NoiseAnalysis, &e))
            }
        }
    }

    /// Button caption for an action in its current state.
    pub fn button_label(&self, endpoint: Endpoint) -> &'static str {
        match (endpoint, self.state(endpoint)) {
            (Endpoint::Simulate, ActionState::Idle) => "🚀 Run Teleportation",
            (Endpoint::Simulate, ActionState::Running) => "Running...",
            (Endpoint::NoiseAnalysis, ActionState::Idle) => "📈 Noise Analysis",
            (Endpoint::NoiseAnalysis, ActionState::Running) => "Analyzing...",
        }
    }

    pub fn fidelity_text(&self) -> &str {
        self.simulation
            .as_ref()
            .map(|s| s.fidelity.as_str())
            .unwrap_or(METRIC_PLACEHOLDER)
    }

    pub fn noise_text(&self) -> &str {
        self.simulation
            .as_ref()
            .map(|s| s.noise.as_str())
            .unwrap_or(METRIC_PLACEHOLDER)
    }

    /// Restore the default controls and clear every result. Requests in
    /// flight keep running and still land when they finish.
    pub fn reset(&mut self) {
        self.params = ControlParams::default();
        self.angle_label = RESET_ANGLE_LABEL.to_string();
        self.noise_label = RESET_NOISE_LABEL.to_string();
        self.steps.clear();
        self.simulation = None;
        self.noise_analysis = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use crate::steps::DESCRIPTION_PLACEHOLDER;

    fn simulate_response() -> SimulateResponse {
        SimulateResponse {
            step_descriptions: (1..=7).map(|i| format!("Step {}", i)).collect(),
            step_circuits: (1..=7).map(|i| format!("circuit {}", i)).collect(),
            bloch_sphere: "iVBOR".to_string(),
            counts: BTreeMap::from([("000".to_string(), 600), ("100".to_string(), 424)]),
            measurement_probabilities: BTreeMap::from([
                ("000".to_string(), 0.5859375),
                ("100".to_string(), 0.4140625),
            ]),
            fidelity: 0.9412,
            noise_level: 0.05,
            psi_angle: Some(0.78),
        }
    }

    fn noise_response() -> NoiseAnalysisResponse {
        NoiseAnalysisResponse {
            noise_levels: vec![0.0, 0.25, 0.5],
            fidelities: vec![0.95, 0.6, 0.2],
            plot: Some("PLOT".to_string()),
        }
    }

    #[test]
    fn test_initial_state() {
        let c = Controller::new();
        assert_eq!(c.angle_label, RESET_ANGLE_LABEL);
        assert_eq!(c.noise_label, RESET_NOISE_LABEL);
        assert_eq!(c.fidelity_text(), "-");
        assert_eq!(c.noise_text(), "-");
        assert!(!c.is_running(Endpoint::Simulate));
        assert_eq!(c.button_label(Endpoint::Simulate), "🚀 Run Teleportation");
    }

    #[test]
    fn test_slider_updates_labels() {
        let mut c = Controller::new();
        c.set_angle("1.57").unwrap();
        assert_eq!(c.params.psi_angle, 1.57);
        assert_eq!(c.angle_label, "1.57 rad (90.0°)");

        c.set_noise("0.25").unwrap();
        assert_eq!(c.noise_label, "0.25 (Fair)");

        c.set_shots("2048").unwrap();
        assert_eq!(c.params.shots, 2048);
    }

    #[test]
    fn test_invalid_input_keeps_previous_value() {
        let mut c = Controller::new();
        c.set_noise("0.2").unwrap();
        assert!(c.set_noise("bogus").is_err());
        assert_eq!(c.params.noise_level, 0.2);
        assert_eq!(c.noise_label, "0.20 (Fair)");
        assert!(c.set_shots("").is_err());
        assert_eq!(c.params.shots, 1024);
    }

    #[test]
    fn test_begin_blocks_second_click() {
        let mut c = Controller::new();
        let req = c.begin(Endpoint::Simulate).unwrap();
        assert_eq!(req.endpoint(), Endpoint::Simulate);
        assert_eq!(c.button_label(Endpoint::Simulate), "Running...");
        assert!(c.begin(Endpoint::Simulate).is_none());

        // the other action is independent
        assert!(c.begin(Endpoint::NoiseAnalysis).is_some());
        assert_eq!(c.button_label(Endpoint::NoiseAnalysis), "Analyzing...");
    }

    #[test]
    fn test_request_body_uses_current_params() {
        let mut c = Controller::new();
        c.set_angle("1.0").unwrap();
        c.set_noise("0.1").unwrap();
        let body = c.begin(Endpoint::Simulate).unwrap().body().unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"psi_angle": 1.0, "noise_level": 0.1, "shots": 1024})
        );

        let body = c.begin(Endpoint::NoiseAnalysis).unwrap().body().unwrap();
        assert_eq!(body, r#"{"psi_angle":1.0}"#);
    }

    #[test]
    fn test_request_serializes_without_variant_tag() {
        let request = Request::NoiseAnalysis(NoiseAnalysisRequest { psi_angle: 0.5 });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"psi_angle": 0.5})
        );

        let request = Request::Simulate(ControlParams::default().simulate_request());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["shots"], 1024);
        assert!(json.get("Simulate").is_none());
    }

    #[test]
    fn test_finish_simulation_success() {
        let mut c = Controller::new();
        c.begin(Endpoint::Simulate);
        c.steps.next();
        c.finish_simulation(Ok(simulate_response())).unwrap();

        assert!(!c.is_running(Endpoint::Simulate));
        assert_eq!(c.steps.current(), 0);
        assert_eq!(c.steps.description(), "Step 1");
        assert_eq!(c.fidelity_text(), "94.12%");
        assert_eq!(c.noise_text(), "5.00%");

        let view = c.simulation.as_ref().unwrap();
        assert_eq!(view.bloch_uri, "data:image/png;base64,iVBOR");
        assert_eq!(view.bars.len(), 2);
        assert_eq!(view.bars[0].percentage, "58.6");
    }

    #[test]
    fn test_finish_simulation_failure_clears_busy_flag() {
        let mut c = Controller::new();
        c.begin(Endpoint::Simulate);
        let alert = c
            .finish_simulation(Err(ClientError::Status(500)))
            .unwrap_err();
        assert_eq!(alert, "Error running simulation: Server error: 500");
        assert!(!c.is_running(Endpoint::Simulate));
        assert!(c.simulation.is_none());
        assert!(c.begin(Endpoint::Simulate).is_some());
    }

    #[test]
    fn test_service_failure_alert() {
        let mut c = Controller::new();
        c.begin(Endpoint::NoiseAnalysis);
        let alert = c
            .finish_noise_analysis(Err(ClientError::Service("bad angle".into())))
            .unwrap_err();
        assert_eq!(alert, "Error: bad angle");
        assert!(c.noise_analysis.is_none());
    }

    #[test]
    fn test_transport_failure_alert() {
        let err = ClientError::Transport("connection refused".into());
        assert_eq!(
            alert_message(Endpoint::NoiseAnalysis, &err),
            "Error running noise analysis: network error: connection refused"
        );
    }

    #[test]
    fn test_finish_noise_analysis_success() {
        let mut c = Controller::new();
        c.begin(Endpoint::NoiseAnalysis);
        c.finish_noise_analysis(Ok(noise_response())).unwrap();
        let view = c.noise_analysis.as_ref().unwrap();
        assert_eq!(view.image_uri.as_deref(), Some("data:image/png;base64,PLOT"));
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.plot.data[0]["type"], "scatter");
    }

    #[test]
    fn test_reset_clears_results() {
        let mut c = Controller::new();
        c.set_angle("2.0").unwrap();
        c.set_noise("0.4").unwrap();
        c.begin(Endpoint::Simulate);
        c.finish_simulation(Ok(simulate_response())).unwrap();
        c.begin(Endpoint::NoiseAnalysis);
        c.finish_noise_analysis(Ok(noise_response())).unwrap();
        c.steps.next();

        c.reset();

        assert_eq!(c.params, ControlParams::default());
        assert_eq!(c.angle_label, RESET_ANGLE_LABEL);
        assert_eq!(c.noise_label, RESET_NOISE_LABEL);
        assert!(c.simulation.is_none());
        assert!(c.noise_analysis.is_none());
        assert_eq!(c.steps.current(), 0);
        assert_eq!(c.steps.description(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(c.fidelity_text(), "-");
    }

    #[test]
    fn test_reset_leaves_running_request() {
        let mut c = Controller::new();
        c.begin(Endpoint::Simulate);
        c.reset();
        assert!(c.is_running(Endpoint::Simulate));
        c.finish_simulation(Ok(simulate_response())).unwrap();
        assert!(c.simulation.is_some());
    }
}
