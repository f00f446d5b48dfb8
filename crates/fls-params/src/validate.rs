//! Per-field domain checks.
//!
//! Each check returns the value to commit, so setters and whole-config
//! validation share one definition of every domain.

use fls_core::{Tolerances, snap_to_step};

use crate::domain;
use crate::error::{ParamError, ParamResult};
use crate::schema::{ChannelWidth, SimulationConfig};

pub fn check_node_count(v: u32) -> ParamResult<u32> {
    if domain::NODE_COUNT.contains(&v) {
        Ok(v)
    } else {
        Err(ParamError::invalid(
            "node_count",
            v,
            format!(
                "must be in [{}, {}]",
                domain::NODE_COUNT.start(),
                domain::NODE_COUNT.end()
            ),
        ))
    }
}

pub fn check_simulation_time(v: u32) -> ParamResult<u32> {
    if domain::SIMULATION_TIME_S.contains(&v) {
        Ok(v)
    } else {
        Err(ParamError::invalid(
            "simulation_time_s",
            v,
            format!(
                "must be in [{}, {}] seconds",
                domain::SIMULATION_TIME_S.start(),
                domain::SIMULATION_TIME_S.end()
            ),
        ))
    }
}

pub fn check_tx_power(v: i32) -> ParamResult<i32> {
    if domain::TX_POWER_DBM.contains(&v) {
        Ok(v)
    } else {
        Err(ParamError::invalid(
            "tx_power_dbm",
            v,
            format!(
                "must be in [{}, {}] dBm",
                domain::TX_POWER_DBM.start(),
                domain::TX_POWER_DBM.end()
            ),
        ))
    }
}

/// Returns the frequency snapped onto the 0.1 GHz grid.
pub fn check_frequency(v: f64) -> ParamResult<f64> {
    let snapped = snap_to_step(
        v,
        domain::FREQUENCY_STEPS_PER_GHZ,
        Tolerances::default(),
        "frequency_ghz",
    )
    .map_err(|e| ParamError::invalid("frequency_ghz", v, e.to_string()))?;

    if domain::FREQUENCY_GHZ.contains(&snapped) {
        Ok(snapped)
    } else {
        Err(ParamError::invalid(
            "frequency_ghz",
            v,
            format!(
                "must be in [{}, {}] GHz",
                domain::FREQUENCY_GHZ.start(),
                domain::FREQUENCY_GHZ.end()
            ),
        ))
    }
}

pub fn check_channel_width(mhz: u32) -> ParamResult<ChannelWidth> {
    ChannelWidth::try_from(mhz)
}

/// Check every field of a config against its domain.
///
/// Whether `phy_type` is enabled depends on the simulator build and is
/// checked by [`crate::ParameterModel`], not here.
pub fn validate_config(config: &SimulationConfig) -> ParamResult<()> {
    check_node_count(config.node_count)?;
    check_simulation_time(config.simulation_time_s)?;
    check_tx_power(config.tx_power_dbm)?;
    let snapped = check_frequency(config.frequency_ghz)?;
    if snapped != config.frequency_ghz {
        return Err(ParamError::invalid(
            "frequency_ghz",
            config.frequency_ghz,
            format!("must be written on the 0.1 GHz grid (nearest {snapped})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_bounds_and_grid() {
        assert_eq!(check_frequency(2.4).unwrap(), 2.4);
        assert_eq!(check_frequency(6.0).unwrap(), 6.0);
        assert_eq!(check_frequency(5.2).unwrap(), 5.2);
        assert!(check_frequency(2.3).is_err());
        assert!(check_frequency(6.1).is_err());
        assert!(check_frequency(5.25).is_err());
        assert!(check_frequency(f64::NAN).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&SimulationConfig::default()).unwrap();
    }

    #[test]
    fn out_of_domain_config_is_reported() {
        let config = SimulationConfig {
            simulation_time_s: 0,
            ..SimulationConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ParamError::InvalidParameter {
                field: "simulation_time_s",
                ..
            }
        ));
    }
}
