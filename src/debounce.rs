//! Shift-register debouncer for a single digital input.
//!
//! Every tick the newest raw sample is shifted into the low bit of an 8-bit
//! history. The input only counts as settled once all eight bits agree, which
//! at a 2ms tick is a 16ms window. Anything else is transitional and is never
//! reported as a decision.

use core::sync::atomic::{AtomicU8, Ordering};

/// History value of an input that has read closed for the whole window.
pub const SETTLED_CLOSED: u8 = 0xFF;

/// History value of an input that has read open for the whole window.
pub const SETTLED_OPEN: u8 = 0x00;

/// Classification of the debounce history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLevel {
    /// Closed for the whole window.
    Closed,
    /// Open for the whole window.
    Open,
    /// Mid-bounce or just changed; no decision.
    Transitional,
}

impl InputLevel {
    /// Classifies a raw history byte.
    #[inline]
    pub const fn from_history(history: u8) -> Self {
        match history {
            SETTLED_CLOSED => InputLevel::Closed,
            SETTLED_OPEN => InputLevel::Open,
            _ => InputLevel::Transitional,
        }
    }
}

/// Trait for an input the decision engine polls for the manual override.
pub trait SettledInput {
    /// Returns true only when the input has been closed for a full debounce window.
    fn is_settled_closed(&self) -> bool;
}

/// Debounced digital input sampled from the timer interrupt.
///
/// The interrupt handler is the only writer. It performs a plain load and
/// store, so no read-modify-write atomics are needed and the type works on
/// cores without compare-and-swap.
pub struct Debouncer {
    history: AtomicU8,
}

impl Debouncer {
    /// Creates a debouncer whose history reads as settled open.
    pub const fn new() -> Self {
        Self {
            history: AtomicU8::new(SETTLED_OPEN),
        }
    }

    /// Shifts one raw sample into the history. Call from the timer interrupt.
    ///
    /// `closed` is true when the input currently reads as closed (pressed).
    #[inline]
    pub fn on_tick(&self, closed: bool) {
        let shifted = (self.history.load(Ordering::Relaxed) << 1) | closed as u8;
        self.history.store(shifted, Ordering::Relaxed);
    }

    /// Returns the raw history byte, newest sample in bit 0.
    #[inline]
    pub fn history(&self) -> u8 {
        self.history.load(Ordering::Relaxed)
    }

    /// Returns the current classification of the history.
    #[inline]
    pub fn level(&self) -> InputLevel {
        InputLevel::from_history(self.history())
    }

    /// Returns true if the input has read closed for the whole window.
    #[inline]
    pub fn is_settled_closed(&self) -> bool {
        self.level() == InputLevel::Closed
    }

    /// Returns true if the input has read open for the whole window.
    #[inline]
    pub fn is_settled_open(&self) -> bool {
        self.level() == InputLevel::Open
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl SettledInput for Debouncer {
    fn is_settled_closed(&self) -> bool {
        Debouncer::is_settled_closed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_settled_open() {
        let input = Debouncer::new();
        assert_eq!(input.level(), InputLevel::Open);
        assert!(input.is_settled_open());
        assert!(!input.is_settled_closed());
    }

    #[test]
    fn newest_sample_lands_in_low_bit() {
        let input = Debouncer::new();
        input.on_tick(true);
        assert_eq!(input.history(), 0b0000_0001);
        input.on_tick(false);
        assert_eq!(input.history(), 0b0000_0010);
        assert_eq!(input.level(), InputLevel::Transitional);
    }

    #[test]
    fn oldest_sample_is_discarded() {
        let input = Debouncer::new();
        input.on_tick(true);
        for _ in 0..8 {
            input.on_tick(false);
        }
        assert_eq!(input.history(), SETTLED_OPEN);
    }
}
