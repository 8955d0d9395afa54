//! Wire contract with the simulation service.
//!
//! Every response carries a `success` flag, and an `error` string when the
//! flag is false. The payload fields sit next to the flag at the top level.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// The two service calls the page makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Simulate,
    NoiseAnalysis,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Simulate => "/simulate",
            Endpoint::NoiseAnalysis => "/noise_analysis",
        }
    }

    /// Name used in user-facing error messages.
    pub fn action(self) -> &'static str {
        match self {
            Endpoint::Simulate => "simulation",
            Endpoint::NoiseAnalysis => "noise analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub psi_angle: f64,
    pub noise_level: f64,
    pub shots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseAnalysisRequest {
    pub psi_angle: f64,
}

/// Payload of a successful `/simulate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub step_descriptions: Vec<String>,
    pub step_circuits: Vec<String>,
    /// Base64-encoded PNG.
    pub bloch_sphere: String,
    /// Bitstring to shot count.
    pub counts: BTreeMap<String, u64>,
    /// Bitstring to probability.
    pub measurement_probabilities: BTreeMap<String, f64>,
    pub fidelity: f64,
    pub noise_level: f64,
    #[serde(default)]
    pub psi_angle: Option<f64>,
}

/// Payload of a successful `/noise_analysis` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseAnalysisResponse {
    pub noise_levels: Vec<f64>,
    pub fidelities: Vec<f64>,
    /// Base64-encoded PNG of the same curve, used when no chart library is
    /// available.
    #[serde(default)]
    pub plot: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Turn a raw HTTP status and body into a typed payload.
///
/// A non-2xx status is reported without looking at the body.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "service returned error status");
        return Err(ClientError::Status(status));
    }

    let value: serde_json::Value = serde_json::from_str(body)?;
    let envelope: Envelope = serde_json::from_value(value.clone())?;
    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        tracing::warn!(%message, "service reported failure");
        return Err(ClientError::Service(message));
    }

    let payload = serde_json::from_value(value)?;
    tracing::debug!(status, bytes = body.len(), "decoded service response");
    Ok(payload)
}
