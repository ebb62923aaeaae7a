//! Shared test infrastructure for lux-switch integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use lux_switch::{
    LightSensor, LightSwitch, MinutePeriod, MinuteSource, Minutes, SettledInput, SwitchOutput,
    Thresholds,
};

// ============================================================================
// Mock Output
// ============================================================================

/// Mock output that records every write
pub struct MockOutput {
    energized: bool,
    history: heapless::Vec<bool, 64>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            energized: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl SwitchOutput for MockOutput {
    fn set_energized(&mut self, energized: bool) {
        self.energized = energized;
        let _ = self.history.push(energized);
    }
}

// ============================================================================
// Mock Sensor
// ============================================================================

/// Sensor returning a settable reading and counting conversions
pub struct MockSensor {
    reading: u8,
    reads: u32,
}

impl MockSensor {
    pub fn new(reading: u8) -> Self {
        Self { reading, reads: 0 }
    }

    pub fn set(&mut self, reading: u8) {
        self.reading = reading;
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl LightSensor for MockSensor {
    fn read_illuminance(&mut self) -> u8 {
        self.reads += 1;
        self.reading
    }
}

// ============================================================================
// Mock Tick Context
// ============================================================================

/// Tick context with hand-controlled minutes and button
pub struct MockTicks {
    minutes: Cell<u32>,
    held: Cell<bool>,
}

impl MockTicks {
    pub fn new() -> Self {
        Self {
            minutes: Cell::new(0),
            held: Cell::new(false),
        }
    }

    /// Advance time by the given number of minutes
    pub fn advance(&self, minutes: u32) {
        self.minutes.set(self.minutes.get().wrapping_add(minutes));
    }

    pub fn set_minutes(&self, minutes: u32) {
        self.minutes.set(minutes);
    }

    pub fn now(&self) -> u32 {
        self.minutes.get()
    }

    pub fn hold_button(&self, held: bool) {
        self.held.set(held);
    }
}

impl MinuteSource for MockTicks {
    fn elapsed_minutes(&self) -> Minutes {
        Minutes(self.minutes.get())
    }
}

impl SettledInput for MockTicks {
    fn is_settled_closed(&self) -> bool {
        self.held.get()
    }
}

// ============================================================================
// Wrapping Tick Counter
// ============================================================================

/// Ticks at the reference 2ms rate
pub const TICKS_PER_MINUTE: u32 = 30_000;

/// Tick context deriving minutes from a raw `u32` tick counter, like `TimeBase`,
/// but with the counter settable so tests can start right before the wrap.
/// The button is never held.
pub struct WrappingTicks {
    ticks: Cell<u32>,
}

impl WrappingTicks {
    /// Counter positioned at the start of the given minute
    pub fn at_minute(minute: u32) -> Self {
        Self {
            ticks: Cell::new(minute.wrapping_mul(TICKS_PER_MINUTE)),
        }
    }

    /// Advance the counter by whole minutes' worth of ticks, wrapping
    pub fn advance_minutes(&self, minutes: u32) {
        let ticks = self.ticks.get();
        self.ticks
            .set(ticks.wrapping_add(minutes.wrapping_mul(TICKS_PER_MINUTE)));
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }
}

impl MinuteSource for WrappingTicks {
    fn elapsed_minutes(&self) -> Minutes {
        Minutes(self.ticks.get() / TICKS_PER_MINUTE)
    }

    fn minute_period(&self) -> MinutePeriod {
        MinutePeriod::of_tick_counter(TICKS_PER_MINUTE)
    }
}

impl SettledInput for WrappingTicks {
    fn is_settled_closed(&self) -> bool {
        false
    }
}

/// Last minute the wrapping counter reports before starting over at zero
pub const LAST_MINUTE: u32 = u32::MAX / TICKS_PER_MINUTE;

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const DARK: u8 = 50;
pub const BRIGHT: u8 = 200;

pub type TestSwitch<'a> = LightSwitch<'a, MockOutput, MockSensor, MockTicks, 16>;

/// Switch with reference thresholds and the given initial reading
pub fn reference_switch(ticks: &MockTicks, reading: u8) -> TestSwitch<'_> {
    LightSwitch::new(
        MockOutput::new(),
        MockSensor::new(reading),
        ticks,
        Thresholds::REFERENCE,
    )
}

/// Advance one check interval and service once
pub fn poll_once(switch: &mut TestSwitch<'_>, ticks: &MockTicks, reading: u8) {
    switch.sensor_mut().set(reading);
    ticks.advance(switch.thresholds().check_interval.as_u32());
    switch.service();
}
