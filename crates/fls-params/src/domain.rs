//! Accepted ranges for every configurable field.

use std::ops::RangeInclusive;

pub const NODE_COUNT: RangeInclusive<u32> = 2..=50;
pub const SIMULATION_TIME_S: RangeInclusive<u32> = 1..=30;
pub const TX_POWER_DBM: RangeInclusive<i32> = 0..=30;
pub const FREQUENCY_GHZ: RangeInclusive<f64> = 2.4..=6.0;

/// Frequency is edited on a 0.1 GHz grid.
pub const FREQUENCY_STEPS_PER_GHZ: f64 = 10.0;

pub const DEFAULT_NODE_COUNT: u32 = 10;
pub const DEFAULT_SIMULATION_TIME_S: u32 = 10;
pub const DEFAULT_TX_POWER_DBM: i32 = 20;
pub const DEFAULT_FREQUENCY_GHZ: f64 = 5.0;
