//! Compile-time thresholds for the decision engine.

use crate::time::Minutes;

/// Tuning constants for one light switch.
///
/// There is no runtime configuration surface: build a `Thresholds` in a `const`
/// item and run it through [`Thresholds::validate`] so a bad value fails the
/// build instead of misbehaving on the device.
///
/// ```
/// use lux_switch::{Minutes, Thresholds};
///
/// const PORCH: Thresholds = match Thresholds::REFERENCE
///     .with_lux_threshold(90)
///     .with_min_on_period(Minutes(30))
///     .validate()
/// {
///     Ok(thresholds) => thresholds,
///     Err(_) => panic!("invalid porch thresholds"),
/// };
/// assert_eq!(PORCH.lux_threshold, 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Readings below this are dark, readings at or above it are bright.
    ///
    /// Empirically tuned against the raw 8-bit sensor value, not a lux unit.
    pub lux_threshold: u8,

    /// How often the sensor is polled.
    pub check_interval: Minutes,

    /// Consecutive confirming polls needed before the output flips.
    pub hysteresis_depth: u8,

    /// The output must have been on for strictly longer than this before it may turn off.
    pub min_on_period: Minutes,

    /// Nominal tick interrupt rate.
    ///
    /// [`LightSwitch`](crate::LightSwitch) only sees minutes, so this must be
    /// the rate the [`TickContext`](crate::TickContext) was built with. Build
    /// it with [`TickContext::from_thresholds`](crate::TickContext::from_thresholds)
    /// to keep the two in step.
    pub ticks_per_second: u32,
}

impl Thresholds {
    /// Reference tuning: 2ms tick, poll every 2 minutes, 8 confirmations,
    /// hold on for at least an hour.
    pub const REFERENCE: Thresholds = Thresholds {
        lux_threshold: 123,
        check_interval: Minutes(2),
        hysteresis_depth: 8,
        min_on_period: Minutes(60),
        ticks_per_second: 500,
    };

    /// Returns a copy with a different illuminance threshold.
    pub const fn with_lux_threshold(mut self, lux_threshold: u8) -> Self {
        self.lux_threshold = lux_threshold;
        self
    }

    /// Returns a copy with a different polling interval.
    pub const fn with_check_interval(mut self, check_interval: Minutes) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// Returns a copy with a different hysteresis depth.
    pub const fn with_hysteresis_depth(mut self, hysteresis_depth: u8) -> Self {
        self.hysteresis_depth = hysteresis_depth;
        self
    }

    /// Returns a copy with a different minimum on period.
    pub const fn with_min_on_period(mut self, min_on_period: Minutes) -> Self {
        self.min_on_period = min_on_period;
        self
    }

    /// Returns a copy with a different tick rate.
    pub const fn with_ticks_per_second(mut self, ticks_per_second: u32) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    /// Checks the thresholds for values the engine cannot work with.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.hysteresis_depth == 0 {
            return Err(ConfigError::ZeroHysteresisDepth);
        }
        if self.check_interval.as_u32() == 0 {
            return Err(ConfigError::ZeroCheckInterval);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(self)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Threshold validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Hysteresis depth of zero would flip the output on every poll.
    ZeroHysteresisDepth,

    /// Polling interval of zero would poll on every loop iteration.
    ZeroCheckInterval,

    /// Tick rate of zero makes elapsed minutes meaningless.
    ZeroTickRate,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroHysteresisDepth => {
                write!(f, "hysteresis depth must be at least one confirmation")
            }
            ConfigError::ZeroCheckInterval => {
                write!(f, "check interval must be at least one minute")
            }
            ConfigError::ZeroTickRate => {
                write!(f, "tick rate must be at least one tick per second")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        let t = Thresholds::default();
        assert_eq!(t.lux_threshold, 123);
        assert_eq!(t.check_interval, Minutes(2));
        assert_eq!(t.hysteresis_depth, 8);
        assert_eq!(t.min_on_period, Minutes(60));
        assert_eq!(t.ticks_per_second, 500);
        assert_eq!(t.validate(), Ok(t));
    }

    #[test]
    fn rejects_degenerate_values() {
        let t = Thresholds::REFERENCE;
        assert_eq!(
            t.with_hysteresis_depth(0).validate(),
            Err(ConfigError::ZeroHysteresisDepth)
        );
        assert_eq!(
            t.with_check_interval(Minutes(0)).validate(),
            Err(ConfigError::ZeroCheckInterval)
        );
        assert_eq!(
            t.with_ticks_per_second(0).validate(),
            Err(ConfigError::ZeroTickRate)
        );
    }

    #[test]
    fn zero_min_on_period_is_allowed() {
        let t = Thresholds::REFERENCE.with_min_on_period(Minutes::ZERO);
        assert!(t.validate().is_ok());
    }
}
