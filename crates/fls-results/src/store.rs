//! Single-slot store for the latest successful result.

use crate::types::{SimulationResult, ThroughputPoint};

/// Holds the last successful result, or nothing before the first success.
///
/// Updates are whole replacements; there is no merging.
#[derive(Debug, Clone, Default)]
pub struct ResultsStore {
    current: Option<SimulationResult>,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, result: SimulationResult) {
        self.current = Some(result);
    }

    /// `None` means no run has succeeded yet.
    pub fn current(&self) -> Option<&SimulationResult> {
        self.current.as_ref()
    }

    pub fn series(&self) -> &[ThroughputPoint] {
        self.current
            .as_ref()
            .map(|r| r.series.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
