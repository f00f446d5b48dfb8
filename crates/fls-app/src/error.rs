//! Error types for the fls-app service layer.

use std::path::PathBuf;

/// Why a submitted run ended in the failed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunFailure {
    /// The service could not be reached or its reply could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered but reported a logical failure.
    #[error("Simulation failed: {0}")]
    Service(String),
}

impl RunFailure {
    pub fn message(&self) -> &str {
        match self {
            RunFailure::Transport(message) | RunFailure::Service(message) => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RunFailure::Transport(_))
    }
}

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Parameter error: {0}")]
    Param(#[from] fls_params::ParamError),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] fls_params::ConfigFileError),

    #[error("A simulation run is already in progress")]
    AlreadyRunning,

    #[error("Run failed: {0}")]
    Run(#[from] RunFailure),

    #[error("Failed to read settings file: {path}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run ended in unexpected state: {0}")]
    UnexpectedRunState(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fls-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fls_results::ResultsError> for AppError {
    fn from(err: fls_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
