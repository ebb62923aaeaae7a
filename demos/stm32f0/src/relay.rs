use embedded_hal::digital::v2::OutputPin;
use lux_switch::SwitchOutput;

/// Relay or LED driven by a single push-pull GPIO
///
/// This wrapper implements the SwitchOutput trait required by the light switch,
/// handling active-low drivers (e.g. relay modules that pull in on a low input).
pub struct PinRelay<P: OutputPin> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> PinRelay<P> {
    /// Create a new relay output
    ///
    /// # Arguments
    /// * `pin` - GPIO configured as push-pull output
    /// * `active_low` - true if driving the pin low energizes the load
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl<P: OutputPin> SwitchOutput for PinRelay<P> {
    fn set_energized(&mut self, energized: bool) {
        // GPIO writes on this family are infallible
        let _ = if energized != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}
