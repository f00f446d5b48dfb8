//! Result data types.

use serde::{Deserialize, Serialize};

/// One sample of the throughput time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputPoint {
    pub time_s: f64,
    pub throughput_mbps: f64,
}

impl ThroughputPoint {
    pub fn new(time_s: f64, throughput_mbps: f64) -> Self {
        Self {
            time_s,
            throughput_mbps,
        }
    }
}

/// Outcome of one successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Samples in the order the service delivered them. May be empty.
    pub series: Vec<ThroughputPoint>,
    /// Fingerprint of the configuration snapshot that produced this result.
    pub config_id: String,
    /// RFC 3339 completion time.
    pub completed_at: String,
}

impl SimulationResult {
    pub fn new(series: Vec<ThroughputPoint>, config_id: String) -> Self {
        Self {
            series,
            config_id,
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_time_ordered(&self) -> bool {
        self.series.windows(2).all(|w| w[0].time_s <= w[1].time_s)
    }
}
