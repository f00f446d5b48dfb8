//! Client-side settings: where the simulation service lives and how long to
//! wait for it.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_S: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the simulation service, without the request path.
    pub endpoint: String,
    /// HTTP timeout for a single request.
    pub request_timeout_s: u64,
    /// Upper bound on how long a run may stay in flight, enforced by the
    /// controller independently of the HTTP timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_deadline_s: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_s: DEFAULT_REQUEST_TIMEOUT_S,
            run_deadline_s: None,
        }
    }
}

impl ClientSettings {
    /// Load settings from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: ClientSettings = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Settings(format!("Failed to parse settings YAML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(AppError::Settings(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.request_timeout_s == 0 {
            return Err(AppError::Settings(
                "request_timeout_s must be positive".to_string(),
            ));
        }
        if self.run_deadline_s == Some(0) {
            return Err(AppError::Settings(
                "run_deadline_s must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }

    pub fn run_deadline(&self) -> Option<Duration> {
        self.run_deadline_s.map(Duration::from_secs)
    }
}
