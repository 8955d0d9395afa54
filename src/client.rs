//! Blocking HTTP client for the simulation service.
//!
//! Used by the `teleport-run` CLI. The browser build has its own fetch-based
//! dispatcher; both share `decode_response`.

use crate::api::{Endpoint, NoiseAnalysisResponse, SimulateResponse, decode_response};
use crate::controller::Request;
use crate::error::ClientError;
use crate::params::ControlParams;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

pub struct ServiceClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl ServiceClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Client that ignores proxy settings from the environment.
    #[cfg(test)]
    fn without_proxy(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST a request and return the raw status and body.
    fn send(&self, request: &Request) -> Result<(u16, String), ClientError> {
        let url = self.config.url(request.endpoint());
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    pub fn simulate(&self, params: &ControlParams) -> Result<SimulateResponse, ClientError> {
        let (status, body) = self.send(&Request::Simulate(params.simulate_request()))?;
        decode_response(status, &body)
    }

    pub fn noise_analysis(&self, psi_angle: f64) -> Result<NoiseAnalysisResponse, ClientError> {
        let request = ControlParams {
            psi_angle,
            ..ControlParams::default()
        }
        .noise_analysis_request();
        let (status, body) = self.send(&Request::NoiseAnalysis(request))?;
        decode_response(status, &body)
    }
}
