use cortex_m::peripheral::SYST;
use rtt_target::rprintln;
use stm32f0xx_hal::{
    adc::Adc,
    gpio::{Analog, Input, Output, PullUp, PushPull, gpioa, gpioc},
    pac,
    prelude::*,
};

use stm32f0_demos::light_sensor::AdcLightSensor;
use stm32f0_demos::relay::PinRelay;

/// Relay / LED on PA5 (onboard LED on Nucleo boards)
pub type Relay = PinRelay<gpioa::PA5<Output<PushPull>>>;

/// Photoresistor divider on PA0 (ADC_IN0)
pub type Sensor = AdcLightSensor<gpioa::PA0<Analog>>;

/// Override button (user button on PC13, closed = low)
pub type Button = gpioc::PC13<Input<PullUp>>;

/// Container for all initialized hardware peripherals
pub struct HardwareContext {
    pub relay: Relay,
    pub sensor: Sensor,
    pub button: Button,
    pub syst: SYST,
    pub sysclk_hz: u32,
}

/// Initialize all hardware peripherals
///
/// - System clock configuration
/// - Relay output, ADC light sensor and override button
///
/// SysTick is handed back unconfigured; call [`start_ticks`] once the button
/// has been moved to where the interrupt handler can reach it.
pub fn init_hardware() -> HardwareContext {
    let mut dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.configure().freeze(&mut dp.FLASH);
    let sysclk_hz = rcc.clocks.sysclk().0;
    rprintln!("System clock configured: {} Hz", sysclk_hz);

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpioc = dp.GPIOC.split(&mut rcc);

    let (relay_pin, sensor_pin, button) = cortex_m::interrupt::free(|cs| {
        (
            gpioa.pa5.into_push_pull_output(cs),
            gpioa.pa0.into_analog(cs),
            gpioc.pc13.into_pull_up_input(cs),
        )
    });

    let relay = PinRelay::new(relay_pin, false);
    let sensor = AdcLightSensor::new(Adc::new(dp.ADC, &mut rcc), sensor_pin);
    rprintln!("Relay on PA5, light sensor on PA0, button on PC13");

    HardwareContext {
        relay,
        sensor,
        button,
        syst: cp.SYST,
        sysclk_hz,
    }
}

/// Configure SysTick as the tick source for the time base and debouncer
pub fn start_ticks(syst: &mut SYST, sysclk_hz: u32, ticks_per_second: u32) {
    syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
    syst.set_reload((sysclk_hz / ticks_per_second) - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    rprintln!("SysTick configured for {} ticks per second", ticks_per_second);
}
