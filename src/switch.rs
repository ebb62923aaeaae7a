//! Light switch decision engine.
//!
//! Provides [`LightSwitch`], which turns a noisy illuminance reading into a
//! stable on/off decision using a hysteresis counter and a minimum on period,
//! and lets a debounced button take over the output while it is held. Also
//! defines the [`SwitchOutput`] and [`LightSensor`] traits for hardware abstraction.

use crate::config::Thresholds;
use crate::debounce::SettledInput;
use crate::event::{EventLog, SwitchEvent};
use crate::hysteresis::HysteresisCounter;
use crate::time::{MinuteSource, Minutes};

/// Trait for abstracting the switched output line (LED, relay driver, ...).
pub trait SwitchOutput {
    /// Energizes or de-energizes the output.
    ///
    /// Takes effect immediately. Handle any hardware errors internally - this
    /// method cannot fail.
    fn set_energized(&mut self, energized: bool);
}

/// Trait for abstracting the ambient light sensor.
pub trait LightSensor {
    /// Takes one reading, blocking until the conversion completes.
    ///
    /// Higher is brighter. The scale only needs to be monotonic with ambient
    /// light; it is compared against [`Thresholds::lux_threshold`].
    fn read_illuminance(&mut self) -> u8;
}

/// Whether the output is currently energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputState {
    #[default]
    Off,
    On,
}

impl OutputState {
    /// Returns true for [`OutputState::On`].
    #[inline]
    pub fn is_on(self) -> bool {
        self == OutputState::On
    }
}

/// What a call to [`LightSwitch::service`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceOutcome {
    /// No polling interval has elapsed; nothing was read or driven.
    Idle,

    /// The sensor was polled.
    ///
    /// `transition` holds the new state if this poll flipped the output.
    Polled {
        reading: u8,
        transition: Option<OutputState>,
    },

    /// The button is held; the output follows the override's dark check.
    Override { reading: u8, energized: bool },

    /// The button was just released. Output is off and hysteresis starts over.
    OverrideReleased,
}

/// Switches a single output from an ambient light sensor.
///
/// Each switch owns its output and sensor and reads time and the button
/// through a shared tick context, typically a `static` [`TickContext`] fed by
/// the timer interrupt.
///
/// # Type Parameters
/// * `'a` - Lifetime of the tick context reference
/// * `O` - Output implementation type
/// * `S` - Sensor implementation type
/// * `C` - Tick context providing elapsed minutes and the debounced button
/// * `E` - Capacity of the event log
///
/// [`TickContext`]: crate::TickContext
pub struct LightSwitch<'a, O, S, C, const E: usize>
where
    O: SwitchOutput,
    S: LightSensor,
    C: MinuteSource + SettledInput,
{
    output: O,
    sensor: S,
    ticks: &'a C,
    thresholds: Thresholds,
    state: OutputState,
    counter: HysteresisCounter,
    state_changed_at: Minutes,
    last_polled_at: Minutes,
    overridden: bool,
    events: EventLog<E>,
}

impl<'a, O, S, C, const E: usize> LightSwitch<'a, O, S, C, E>
where
    O: SwitchOutput,
    S: LightSensor,
    C: MinuteSource + SettledInput,
{
    /// Creates a switch in the off state and drives the output off.
    ///
    /// `thresholds` should have passed [`Thresholds::validate`]; a zero depth
    /// or interval is accepted but makes the switch follow every poll.
    pub fn new(mut output: O, sensor: S, ticks: &'a C, thresholds: Thresholds) -> Self {
        output.set_energized(false);

        Self {
            output,
            sensor,
            ticks,
            thresholds,
            state: OutputState::Off,
            counter: HysteresisCounter::new(thresholds.hysteresis_depth),
            state_changed_at: Minutes::ZERO,
            last_polled_at: Minutes::ZERO,
            overridden: false,
            events: EventLog::new(),
        }
    }

    /// Runs one main-loop iteration.
    ///
    /// The button override is checked first and preempts everything else.
    /// Otherwise the sensor is polled at most once per check interval.
    pub fn service(&mut self) -> ServiceOutcome {
        let now = self.ticks.elapsed_minutes();

        if self.ticks.is_settled_closed() {
            return self.service_override(now);
        }

        if self.overridden {
            return self.release_override(now);
        }

        if self.minutes_since(self.last_polled_at, now) < self.thresholds.check_interval {
            return ServiceOutcome::Idle;
        }

        self.poll(now)
    }

    fn service_override(&mut self, now: Minutes) -> ServiceOutcome {
        if !self.overridden {
            self.overridden = true;
            self.events.record(SwitchEvent::OverrideEngaged { at: now });

            #[cfg(feature = "defmt")]
            defmt::info!("override engaged at minute {}", now);
        }

        // Forced on, unless the room is already bright.
        let reading = self.sensor.read_illuminance();
        let energized = reading < self.thresholds.lux_threshold;
        self.output.set_energized(energized);
        self.state = if energized {
            OutputState::On
        } else {
            OutputState::Off
        };

        ServiceOutcome::Override { reading, energized }
    }

    fn release_override(&mut self, now: Minutes) -> ServiceOutcome {
        self.overridden = false;
        self.state = OutputState::Off;
        self.output.set_energized(false);
        self.counter.reset();
        self.state_changed_at = now;
        self.events.record(SwitchEvent::OverrideReleased { at: now });

        #[cfg(feature = "defmt")]
        defmt::info!("override released at minute {}", now);

        ServiceOutcome::OverrideReleased
    }

    fn poll(&mut self, now: Minutes) -> ServiceOutcome {
        let reading = self.sensor.read_illuminance();
        self.last_polled_at = now;

        let dark = reading < self.thresholds.lux_threshold;
        let transition = match self.state {
            OutputState::Off if dark => self.counter.confirm().then_some(OutputState::On),
            OutputState::On if !dark => {
                let full = self.counter.confirm();
                (full && self.min_on_elapsed(now)).then_some(OutputState::Off)
            }
            _ => {
                self.counter.retreat();
                None
            }
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "poll at minute {}: reading {}, counter {}",
            now,
            reading,
            self.counter.count()
        );

        if let Some(next) = transition {
            self.transition_to(next, now);
        }

        ServiceOutcome::Polled {
            reading,
            transition,
        }
    }

    fn min_on_elapsed(&self, now: Minutes) -> bool {
        self.minutes_since(self.state_changed_at, now) > self.thresholds.min_on_period
    }

    fn minutes_since(&self, earlier: Minutes, now: Minutes) -> Minutes {
        now.since(earlier, self.ticks.minute_period())
    }

    fn transition_to(&mut self, next: OutputState, now: Minutes) {
        self.state = next;
        self.state_changed_at = now;
        self.counter.reset();
        self.output.set_energized(next.is_on());

        let event = match next {
            OutputState::On => SwitchEvent::TurnedOn { at: now },
            OutputState::Off => SwitchEvent::TurnedOff { at: now },
        };
        self.events.record(event);

        #[cfg(feature = "defmt")]
        defmt::info!("output {} at minute {}", next, now);
    }

    /// Returns the current output state.
    pub fn state(&self) -> OutputState {
        self.state
    }

    /// Returns the current hysteresis count.
    pub fn counter(&self) -> u8 {
        self.counter.count()
    }

    /// Minute at which hysteresis last flipped the output, or the override was released.
    pub fn state_changed_at(&self) -> Minutes {
        self.state_changed_at
    }

    /// Minute of the most recent sensor poll.
    pub fn last_polled_at(&self) -> Minutes {
        self.last_polled_at
    }

    /// Returns true while the button override owns the output.
    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// Thresholds this switch was built with.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Journal of recent transitions.
    pub fn events(&self) -> &EventLog<E> {
        &self.events
    }

    /// Mutable access to the journal, e.g. to drain it.
    pub fn events_mut(&mut self) -> &mut EventLog<E> {
        &mut self.events
    }

    /// Returns a reference to the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Returns a mutable reference to the sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Consumes the switch and hands back the hardware.
    pub fn release(self) -> (O, S) {
        (self.output, self.sensor)
    }
}
