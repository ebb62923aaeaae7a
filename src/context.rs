//! State written from the tick interrupt.
//!
//! [`TickContext`] groups the time base and the button debouncer so the
//! interrupt handler has a single entry point and the main loop only ever
//! sees read access. Put one in a `static` and hand `&'static` references to
//! the decision engine:
//!
//! ```
//! use lux_switch::{MinuteSource, Thresholds, TickContext};
//!
//! static TICKS: TickContext = TickContext::from_thresholds(&Thresholds::REFERENCE);
//!
//! // Inside the timer interrupt:
//! TICKS.on_tick(false);
//!
//! assert_eq!(TICKS.time_base().ticks(), 1);
//! assert_eq!(TICKS.elapsed_minutes().as_u32(), 0);
//! ```

use crate::config::Thresholds;
use crate::debounce::{Debouncer, SettledInput};
use crate::time::{MinutePeriod, MinuteSource, Minutes, TimeBase};

/// Interrupt-owned half of the controller state.
pub struct TickContext {
    time_base: TimeBase,
    button: Debouncer,
}

impl TickContext {
    /// Creates a context for a tick source firing `ticks_per_second` times a second.
    pub const fn new(ticks_per_second: u32) -> Self {
        Self {
            time_base: TimeBase::new(ticks_per_second),
            button: Debouncer::new(),
        }
    }

    /// Creates a context ticking at the rate the thresholds were tuned for.
    pub const fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self::new(thresholds.ticks_per_second)
    }

    /// Interrupt body: advance time, then shift in one button sample.
    ///
    /// `button_closed` is the raw, undebounced reading taken in the same interrupt.
    #[inline]
    pub fn on_tick(&self, button_closed: bool) {
        self.time_base.on_tick();
        self.button.on_tick(button_closed);
    }

    /// The tick counter.
    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    /// The debounced button.
    pub fn button(&self) -> &Debouncer {
        &self.button
    }
}

impl MinuteSource for TickContext {
    fn elapsed_minutes(&self) -> Minutes {
        self.time_base.elapsed_minutes()
    }

    fn minute_period(&self) -> MinutePeriod {
        self.time_base.minute_period()
    }
}

impl SettledInput for TickContext {
    fn is_settled_closed(&self) -> bool {
        self.button.is_settled_closed()
    }
}
