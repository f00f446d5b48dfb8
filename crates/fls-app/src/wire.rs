//! JSON contract with the simulation service.
//!
//! Field names are fixed by the service and must not change.

use fls_params::{PhyType, PropagationModel, SimulationConfig};
use fls_results::ThroughputPoint;
use serde::{Deserialize, Serialize};

use crate::error::RunFailure;

pub const RUN_SIMULATION_PATH: &str = "/run-simulation";
pub const HEALTH_PATH: &str = "/health";
pub const SUCCESS_STATUS: &str = "success";
pub const HEALTHY_STATUS: &str = "healthy";

/// Body of `POST /run-simulation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSimulationRequest {
    pub phy_type: PhyType,
    pub node_count: u32,
    /// Seconds.
    pub simulation_time: u32,
    /// dBm.
    pub tx_power: i32,
    /// GHz.
    pub frequency: f64,
    /// MHz.
    pub channel_width: u32,
    /// Bare model name, e.g. `LogDistance`.
    pub propagation_model: PropagationModel,
}

impl From<&SimulationConfig> for RunSimulationRequest {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            phy_type: config.phy_type,
            node_count: config.node_count,
            simulation_time: config.simulation_time_s,
            tx_power: config.tx_power_dbm,
            frequency: config.frequency_ghz,
            channel_width: config.channel_width.mhz(),
            propagation_model: config.propagation_model,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub time: f64,
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPayload {
    /// The service substitutes an empty list when it has no samples.
    #[serde(default)]
    pub time_series_data: Vec<WirePoint>,
}

/// Body returned by `POST /run-simulation`, on success and on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSimulationResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What a well-formed response means for the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome {
    Success(Vec<ThroughputPoint>),
    Failure(String),
}

impl RunSimulationResponse {
    pub fn success(points: &[(f64, f64)]) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            results: Some(ResultsPayload {
                time_series_data: points
                    .iter()
                    .map(|&(time, throughput)| WirePoint { time, throughput })
                    .collect(),
            }),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            results: None,
            message: Some(message.into()),
        }
    }

    /// Interpret the response. A success without a `results` object is
    /// malformed and reported as a transport failure.
    pub fn into_outcome(self) -> Result<ServiceOutcome, RunFailure> {
        if self.status == SUCCESS_STATUS {
            let results = self.results.ok_or_else(|| {
                RunFailure::Transport("success response is missing 'results'".to_string())
            })?;
            let series = results
                .time_series_data
                .into_iter()
                .map(|p| ThroughputPoint::new(p.time, p.throughput))
                .collect();
            Ok(ServiceOutcome::Success(series))
        } else {
            let message = self
                .message
                .unwrap_or_else(|| format!("simulation service reported status '{}'", self.status));
            Ok(ServiceOutcome::Failure(message))
        }
    }
}

/// Decode a response body regardless of HTTP status.
///
/// The service sends structured failure bodies with HTTP 500, so the status
/// code only matters when the body cannot be decoded.
pub fn decode_response(http_status: u16, body: &str) -> Result<RunSimulationResponse, RunFailure> {
    serde_json::from_str(body).map_err(|e| {
        RunFailure::Transport(format!("undecodable response (HTTP {http_status}): {e}"))
    })
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY_STATUS
    }

    /// A reachable but unhealthy service is a service failure.
    pub fn ensure_healthy(&self) -> Result<(), RunFailure> {
        if self.is_healthy() {
            Ok(())
        } else {
            Err(RunFailure::Service(format!(
                "simulation service reported status '{}'",
                self.status
            )))
        }
    }
}
