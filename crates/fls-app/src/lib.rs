//! Shared application service layer for the FLS simulation front end.
//!
//! This crate provides a unified interface for both CLI and GUI frontends:
//! the wire contract with the simulation service, the HTTP client, the run
//! lifecycle controller and helpers for reading results.

pub mod client;
pub mod controller;
pub mod error;
pub mod query;
pub mod session;
pub mod settings;
pub mod wire;

// Re-export key types for convenience
pub use client::{HttpSimulationService, SimulationService};
pub use controller::{RunController, RunStatus};
pub use error::{AppError, AppResult, RunFailure};
pub use query::{RunSummary, plot_points, series_to_csv, summarize};
pub use session::Session;
pub use settings::ClientSettings;
pub use wire::{
    HealthResponse, ResultsPayload, RunSimulationRequest, RunSimulationResponse, ServiceOutcome,
    WirePoint,
};

pub use fls_core::RunTicket;
pub use fls_params::{ParamError, ParameterModel, SimulationConfig};
pub use fls_results::{ResultsStore, SimulationResult, ThroughputPoint};
