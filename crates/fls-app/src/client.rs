//! Access to the external simulation service.

use tracing::debug;

use crate::error::{AppError, AppResult, RunFailure};
use crate::settings::ClientSettings;
use crate::wire::{
    HEALTH_PATH, HealthResponse, RUN_SIMULATION_PATH, RunSimulationRequest, RunSimulationResponse,
    decode_response,
};

/// One request/response exchange with the simulation engine.
///
/// Implementations return the decoded response for both success and logical
/// failure; only transport problems are errors.
pub trait SimulationService: Send + Sync {
    fn run_simulation(
        &self,
        request: &RunSimulationRequest,
    ) -> Result<RunSimulationResponse, RunFailure>;

    fn health(&self) -> Result<HealthResponse, RunFailure>;
}

/// Blocking HTTP client for the simulation service.
#[derive(Debug, Clone)]
pub struct HttpSimulationService {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSimulationService {
    pub fn new(settings: &ClientSettings) -> AppResult<Self> {
        settings.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| AppError::Settings(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport_failure(err: reqwest::Error) -> RunFailure {
    if err.is_timeout() {
        RunFailure::Transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        RunFailure::Transport(format!("could not connect to simulation service: {}", err))
    } else {
        RunFailure::Transport(format!("request failed: {}", err))
    }
}

impl SimulationService for HttpSimulationService {
    fn run_simulation(
        &self,
        request: &RunSimulationRequest,
    ) -> Result<RunSimulationResponse, RunFailure> {
        let url = self.url(RUN_SIMULATION_PATH);
        debug!(%url, nodes = request.node_count, "posting simulation request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(transport_failure)?;
        let status = response.status();
        let body = response.text().map_err(transport_failure)?;
        debug!(status = status.as_u16(), bytes = body.len(), "simulation response received");

        decode_response(status.as_u16(), &body)
    }

    fn health(&self) -> Result<HealthResponse, RunFailure> {
        let url = self.url(HEALTH_PATH);
        debug!(%url, "checking service health");

        let response = self.client.get(&url).send().map_err(transport_failure)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RunFailure::Transport(format!("HTTP {}", status)));
        }
        response.json().map_err(transport_failure)
    }
}
