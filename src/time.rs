//! Coarse time base driven by a periodic tick interrupt.
//!
//! The tick counter is the only state shared between the interrupt handler and
//! the main loop. Reads go through a critical section so a multi-byte snapshot
//! can never be torn by an increment landing halfway through it.

use core::cell::Cell;
use critical_section::Mutex;

/// Approximate minutes since power-up.
///
/// Derived from the tick counter, so it inherits the counter's wraparound:
/// after the last minute the source can report, it starts over at zero.
/// Compare instants with [`Minutes::since`], never with plain `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Minutes(pub u32);

impl Minutes {
    /// Zero minutes.
    pub const ZERO: Self = Minutes(0);

    /// Returns the whole minute count.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Minutes elapsed since `earlier` on a clock that counts `0..period` and wraps.
    ///
    /// Both instants must come from the same source, i.e. be below `period`.
    #[inline]
    pub const fn since(self, earlier: Minutes, period: MinutePeriod) -> Minutes {
        let period = period.0;
        let diff = (self.0 as u64 % period + period - earlier.0 as u64 % period) % period;
        Minutes(diff as u32)
    }

    /// Minutes elapsed since `earlier` on a clock using the full `u32` range.
    #[inline]
    pub const fn wrapping_since(self, earlier: Minutes) -> Minutes {
        self.since(earlier, MinutePeriod::FULL)
    }

    /// Adds minutes, wrapping on overflow.
    #[inline]
    pub const fn wrapping_add(self, other: Minutes) -> Minutes {
        Minutes(self.0.wrapping_add(other.0))
    }
}

/// Number of distinct minute values a source reports before wrapping to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MinutePeriod(u64);

impl MinutePeriod {
    /// Minutes span the whole `u32` range.
    pub const FULL: Self = MinutePeriod(1 << 32);

    /// Period of minutes derived as `ticks / ticks_per_minute` from a wrapping `u32` tick counter.
    pub const fn of_tick_counter(ticks_per_minute: u32) -> Self {
        let per_minute = if ticks_per_minute == 0 { 1 } else { ticks_per_minute };
        MinutePeriod((u32::MAX / per_minute) as u64 + 1)
    }

    /// Returns the period as a minute count.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Trait for anything that can report approximate elapsed minutes.
///
/// [`TimeBase`] is the production implementation. Tests substitute a clock
/// they can advance by hand.
pub trait MinuteSource {
    /// Returns the current elapsed-minutes value.
    ///
    /// Must only be called from the main loop, never from interrupt context.
    fn elapsed_minutes(&self) -> Minutes;

    /// How many minute values the source reports before it wraps back to zero.
    fn minute_period(&self) -> MinutePeriod {
        MinutePeriod::FULL
    }
}

/// Free-running tick counter incremented from the timer interrupt.
///
/// The counter wraps after `u32::MAX` ticks (about 99 days at a 2ms tick).
/// Elapsed minutes then fall back to zero, so they count modulo
/// [`TimeBase::minute_period`]. The last minute before the wrap is shorter than
/// the others, which makes any interval spanning the wrap read up to one
/// minute long.
pub struct TimeBase {
    ticks: Mutex<Cell<u32>>,
    ticks_per_minute: u32,
}

impl TimeBase {
    /// Creates a time base for a tick source firing `ticks_per_second` times a second.
    ///
    /// A rate of zero is clamped to one tick per second.
    pub const fn new(ticks_per_second: u32) -> Self {
        let per_second = if ticks_per_second == 0 { 1 } else { ticks_per_second };
        Self {
            ticks: Mutex::new(Cell::new(0)),
            ticks_per_minute: per_second.saturating_mul(60),
        }
    }

    /// Advances the counter by one tick. Call from the timer interrupt.
    #[inline]
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Returns a consistent snapshot of the raw tick counter.
    #[inline]
    pub fn ticks(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Number of ticks that make up one minute.
    pub const fn ticks_per_minute(&self) -> u32 {
        self.ticks_per_minute
    }

    /// Minute values reported before the tick counter wraps.
    pub const fn minute_period(&self) -> MinutePeriod {
        MinutePeriod::of_tick_counter(self.ticks_per_minute)
    }
}

impl MinuteSource for TimeBase {
    fn elapsed_minutes(&self) -> Minutes {
        Minutes(self.ticks() / self.ticks_per_minute)
    }

    fn minute_period(&self) -> MinutePeriod {
        TimeBase::minute_period(self)
    }
}
