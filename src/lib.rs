#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TickContext`**: State written from the timer interrupt: the tick counter and the button debouncer
//! - **`TimeBase`**: Free-running tick counter exposing approximate elapsed minutes
//! - **`Debouncer`**: 8-bit shift-register debouncer for the override button
//! - **`HysteresisCounter`**: Saturating counter that must fill before the output flips
//! - **`LightSwitch`**: The decision engine driving a single output
//! - **`Thresholds`**: Compile-time tuning constants
//! - **`SwitchOutput`**: Trait to implement for your output line
//! - **`LightSensor`**: Trait to implement for your illuminance sensor
//! - **`MinuteSource`** / **`SettledInput`**: Seams the engine reads time and the button through
//! - **`EventLog`**: Bounded journal of transitions
//!
//! The interrupt handler only ever calls [`TickContext::on_tick`]. Everything
//! else runs from the main loop through [`LightSwitch::service`].

pub mod config;
pub mod context;
pub mod debounce;
pub mod event;
pub mod hysteresis;
pub mod switch;
pub mod time;

pub use config::{ConfigError, Thresholds};
pub use context::TickContext;
pub use debounce::{Debouncer, InputLevel, SettledInput};
pub use event::{EventLog, SwitchEvent};
pub use hysteresis::HysteresisCounter;
pub use switch::{LightSensor, LightSwitch, OutputState, ServiceOutcome, SwitchOutput};
pub use time::{MinutePeriod, MinuteSource, Minutes, TimeBase};

/// Reference illuminance threshold.
pub const LUX_THRESHOLD: u8 = Thresholds::REFERENCE.lux_threshold;

/// Reference polling interval.
pub const CHECK_INTERVAL_MINUTES: u32 = Thresholds::REFERENCE.check_interval.as_u32();

/// Reference hysteresis depth.
pub const SENSOR_COUNTER_MAX: u8 = Thresholds::REFERENCE.hysteresis_depth;

/// Reference minimum on period.
pub const MIN_ON_PERIOD_MINUTES: u32 = Thresholds::REFERENCE.min_on_period.as_u32();

/// Reference tick rate (2ms tick).
pub const TICKS_PER_SECOND: u32 = Thresholds::REFERENCE.ticks_per_second;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_constants_match_thresholds() {
        assert_eq!(LUX_THRESHOLD, 123);
        assert_eq!(CHECK_INTERVAL_MINUTES, 2);
        assert_eq!(SENSOR_COUNTER_MAX, 8);
        assert_eq!(MIN_ON_PERIOD_MINUTES, 60);
        assert_eq!(TICKS_PER_SECOND, 500);
    }
}
