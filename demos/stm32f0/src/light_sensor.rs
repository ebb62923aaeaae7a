use embedded_hal::adc::{Channel, OneShot};
use lux_switch::LightSensor;
use stm32f0xx_hal::adc::{Adc, AdcAlign, AdcPrecision};

/// Photoresistor divider read through the on-chip ADC
///
/// The ADC is set to 8-bit, right-aligned conversions so a reading maps
/// straight onto the 0-255 scale the light switch compares against.
/// Wire the divider so that more light gives a higher voltage.
pub struct AdcLightSensor<PIN> {
    adc: Adc,
    pin: PIN,
    last_reading: u8,
}

impl<PIN> AdcLightSensor<PIN>
where
    PIN: Channel<Adc, ID = u8>,
{
    pub fn new(mut adc: Adc, pin: PIN) -> Self {
        adc.set_align(AdcAlign::Right);
        adc.set_precision(AdcPrecision::B_8);

        Self {
            adc,
            pin,
            last_reading: 0,
        }
    }
}

impl<PIN> LightSensor for AdcLightSensor<PIN>
where
    PIN: Channel<Adc, ID = u8>,
{
    fn read_illuminance(&mut self) -> u8 {
        // The conversion blocks until complete; on the unlikely error keep the
        // previous value and let hysteresis absorb it
        let raw: Result<u16, _> = self.adc.read(&mut self.pin);
        if let Ok(value) = raw {
            self.last_reading = value.min(u8::MAX as u16) as u8;
        }
        self.last_reading
    }
}
