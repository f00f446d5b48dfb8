//! The editable parameter model owned by a session.

use crate::error::{ParamError, ParamResult};
use crate::schema::{PhyType, PropagationModel, SimulationConfig};
use crate::validate::{
    check_channel_width, check_frequency, check_node_count, check_simulation_time, check_tx_power,
    validate_config,
};

/// Current simulation configuration plus the rules for editing it.
///
/// Every setter validates before committing, so the held configuration is
/// always inside its domain. A failed edit leaves the model untouched.
#[derive(Debug, Clone)]
pub struct ParameterModel {
    config: SimulationConfig,
    enabled_phy_types: Vec<PhyType>,
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterModel {
    /// Default configuration with only Wi-Fi enabled.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            enabled_phy_types: vec![PhyType::Wifi],
        }
    }

    /// Enable additional radio types. Wi-Fi stays enabled.
    pub fn with_enabled_phy_types(mut self, phy_types: &[PhyType]) -> Self {
        for phy in phy_types {
            if !self.enabled_phy_types.contains(phy) {
                self.enabled_phy_types.push(*phy);
            }
        }
        self
    }

    /// Build a model from an externally supplied configuration.
    pub fn from_config(config: SimulationConfig) -> ParamResult<Self> {
        let mut model = Self::new();
        model.replace_config(config)?;
        Ok(model)
    }

    /// Replace the whole configuration, all or nothing.
    pub fn replace_config(&mut self, config: SimulationConfig) -> ParamResult<()> {
        validate_config(&config)?;
        self.ensure_phy_enabled(config.phy_type)?;
        self.config = config;
        Ok(())
    }

    /// Value copy of the current configuration.
    pub fn snapshot(&self) -> SimulationConfig {
        self.config
    }

    pub fn enabled_phy_types(&self) -> &[PhyType] {
        &self.enabled_phy_types
    }

    pub fn is_phy_enabled(&self, phy: PhyType) -> bool {
        self.enabled_phy_types.contains(&phy)
    }

    pub fn wifi_params_apply(&self) -> bool {
        self.config.wifi_params_apply()
    }

    fn ensure_phy_enabled(&self, phy: PhyType) -> ParamResult<()> {
        if self.is_phy_enabled(phy) {
            Ok(())
        } else {
            Err(ParamError::UnsupportedPhyType { phy })
        }
    }

    pub fn set_phy_type(&mut self, phy: PhyType) -> ParamResult<()> {
        self.ensure_phy_enabled(phy)?;
        self.config.phy_type = phy;
        Ok(())
    }

    /// Text boundary for PHY selection (CLI flags, file values).
    pub fn set_phy_type_str(&mut self, name: &str) -> ParamResult<()> {
        let phy: PhyType = name.parse()?;
        self.set_phy_type(phy)
    }

    pub fn set_node_count(&mut self, v: u32) -> ParamResult<()> {
        self.config.node_count = check_node_count(v)?;
        Ok(())
    }

    pub fn set_simulation_time(&mut self, seconds: u32) -> ParamResult<()> {
        self.config.simulation_time_s = check_simulation_time(seconds)?;
        Ok(())
    }

    pub fn set_tx_power(&mut self, dbm: i32) -> ParamResult<()> {
        self.config.tx_power_dbm = check_tx_power(dbm)?;
        Ok(())
    }

    pub fn set_frequency(&mut self, ghz: f64) -> ParamResult<()> {
        self.config.frequency_ghz = check_frequency(ghz)?;
        Ok(())
    }

    pub fn set_channel_width(&mut self, mhz: u32) -> ParamResult<()> {
        self.config.channel_width = check_channel_width(mhz)?;
        Ok(())
    }

    pub fn set_propagation_model(&mut self, model: PropagationModel) {
        self.config.propagation_model = model;
    }

    pub fn set_propagation_model_str(&mut self, name: &str) -> ParamResult<()> {
        self.config.propagation_model = name.parse()?;
        Ok(())
    }
}
