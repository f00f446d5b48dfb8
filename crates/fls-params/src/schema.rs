//! Simulation configuration schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain;
use crate::error::ParamError;

/// Physical-layer radio technology simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhyType {
    Wifi,
    Ble,
    Zigbee,
}

impl PhyType {
    pub const ALL: [PhyType; 3] = [PhyType::Wifi, PhyType::Ble, PhyType::Zigbee];

    /// Wire and file name.
    pub fn as_str(self) -> &'static str {
        match self {
            PhyType::Wifi => "wifi",
            PhyType::Ble => "ble",
            PhyType::Zigbee => "zigbee",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PhyType::Wifi => "Wi-Fi (802.11ax)",
            PhyType::Ble => "Bluetooth LE",
            PhyType::Zigbee => "ZigBee",
        }
    }
}

impl fmt::Display for PhyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhyType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wifi" | "wi-fi" => Ok(PhyType::Wifi),
            "ble" => Ok(PhyType::Ble),
            "zigbee" => Ok(PhyType::Zigbee),
            _ => Err(ParamError::invalid(
                "phy_type",
                s,
                "expected one of wifi, ble, zigbee",
            )),
        }
    }
}

/// Wi-Fi channel width. Only the widths the simulator accepts are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ChannelWidth {
    Mhz20,
    Mhz40,
    Mhz60,
    Mhz80,
    Mhz100,
    Mhz120,
    Mhz140,
    Mhz160,
}

impl ChannelWidth {
    pub const ALL: [ChannelWidth; 8] = [
        ChannelWidth::Mhz20,
        ChannelWidth::Mhz40,
        ChannelWidth::Mhz60,
        ChannelWidth::Mhz80,
        ChannelWidth::Mhz100,
        ChannelWidth::Mhz120,
        ChannelWidth::Mhz140,
        ChannelWidth::Mhz160,
    ];

    pub fn mhz(self) -> u32 {
        match self {
            ChannelWidth::Mhz20 => 20,
            ChannelWidth::Mhz40 => 40,
            ChannelWidth::Mhz60 => 60,
            ChannelWidth::Mhz80 => 80,
            ChannelWidth::Mhz100 => 100,
            ChannelWidth::Mhz120 => 120,
            ChannelWidth::Mhz140 => 140,
            ChannelWidth::Mhz160 => 160,
        }
    }

    pub fn from_mhz(mhz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.mhz() == mhz)
    }
}

impl TryFrom<u32> for ChannelWidth {
    type Error = ParamError;

    fn try_from(mhz: u32) -> Result<Self, Self::Error> {
        Self::from_mhz(mhz).ok_or_else(|| {
            ParamError::invalid(
                "channel_width",
                mhz,
                "expected one of 20, 40, 60, 80, 100, 120, 140, 160 MHz",
            )
        })
    }
}

impl From<ChannelWidth> for u32 {
    fn from(width: ChannelWidth) -> Self {
        width.mhz()
    }
}

impl fmt::Display for ChannelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.mhz())
    }
}

/// Propagation loss model evaluated by the simulator.
///
/// Serialized as the bare model name; the ns-3 class name is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropagationModel {
    #[serde(alias = "LogDistancePropagationLossModel")]
    LogDistance,
    #[serde(alias = "FriisPropagationLossModel")]
    Friis,
    #[serde(alias = "ThreeLogDistancePropagationLossModel")]
    ThreeLogDistance,
    #[serde(alias = "RangePropagationLossModel")]
    RangePropagation,
    #[serde(alias = "NakagamiPropagationLossModel")]
    Nakagami,
}

const NS3_LOSS_MODEL_SUFFIX: &str = "PropagationLossModel";

impl PropagationModel {
    pub const ALL: [PropagationModel; 5] = [
        PropagationModel::LogDistance,
        PropagationModel::Friis,
        PropagationModel::ThreeLogDistance,
        PropagationModel::RangePropagation,
        PropagationModel::Nakagami,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropagationModel::LogDistance => "LogDistance",
            PropagationModel::Friis => "Friis",
            PropagationModel::ThreeLogDistance => "ThreeLogDistance",
            PropagationModel::RangePropagation => "RangePropagation",
            PropagationModel::Nakagami => "Nakagami",
        }
    }

    /// Full ns-3 class name, e.g. `FriisPropagationLossModel`.
    pub fn ns3_class_name(self) -> String {
        format!("{}{}", self.as_str(), NS3_LOSS_MODEL_SUFFIX)
    }
}

impl fmt::Display for PropagationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropagationModel {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_suffix(NS3_LOSS_MODEL_SUFFIX)
            .unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(bare))
            .ok_or_else(|| {
                ParamError::invalid(
                    "propagation_model",
                    s,
                    "expected one of LogDistance, Friis, ThreeLogDistance, RangePropagation, Nakagami",
                )
            })
    }
}

/// One complete simulation configuration.
///
/// Wi-Fi specific fields are always present. They only apply while
/// `phy_type` is Wi-Fi and keep their values otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub phy_type: PhyType,
    pub node_count: u32,
    pub simulation_time_s: u32,
    pub tx_power_dbm: i32,
    pub frequency_ghz: f64,
    pub channel_width: ChannelWidth,
    pub propagation_model: PropagationModel,
}

impl SimulationConfig {
    pub fn wifi_params_apply(&self) -> bool {
        self.phy_type == PhyType::Wifi
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            phy_type: PhyType::Wifi,
            node_count: domain::DEFAULT_NODE_COUNT,
            simulation_time_s: domain::DEFAULT_SIMULATION_TIME_S,
            tx_power_dbm: domain::DEFAULT_TX_POWER_DBM,
            frequency_ghz: domain::DEFAULT_FREQUENCY_GHZ,
            channel_width: ChannelWidth::Mhz80,
            propagation_model: PropagationModel::LogDistance,
        }
    }
}
