//! Fetch-based dispatcher for the two service calls.

use gloo::net::http::Request as HttpRequest;
use teleport_ui::{
    ClientError, NoiseAnalysisResponse, Request, SimulateResponse, decode_response,
};

/// POST the request body to its endpoint, relative to the page origin.
async fn send(request: &Request) -> Result<(u16, String), ClientError> {
    let body = request.body()?;
    let resp = HttpRequest::post(request.endpoint().path())
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| ClientError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    Ok((status, text))
}

pub async fn simulate(request: &Request) -> Result<SimulateResponse, ClientError> {
    let (status, body) = send(request).await?;
    decode_response(status, &body)
}

pub async fn noise_analysis(request: &Request) -> Result<NoiseAnalysisResponse, ClientError> {
    let (status, body) = send(request).await?;
    decode_response(status, &body)
}
