#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use critical_section::Mutex;
use embedded_hal::digital::v2::InputPin;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use lux_switch::{LightSwitch, ServiceOutcome, Thresholds, TickContext};

mod hardware_setup;

use hardware_setup::Button;

/// Thresholds for this board, checked at compile time
const THRESHOLDS: Thresholds = match Thresholds::REFERENCE.validate() {
    Ok(thresholds) => thresholds,
    Err(_) => panic!("invalid thresholds"),
};

/// Main loop pacing
const LOOP_PERIOD_MS: u32 = 100;

/// Tick counter and debounced button, written only by SysTick
static TICKS: TickContext = TickContext::from_thresholds(&THRESHOLDS);

/// Button pin, owned by the SysTick handler once the loop starts
static BUTTON: Mutex<RefCell<Option<Button>>> = Mutex::new(RefCell::new(None));

/// SysTick interrupt handler - called every 2ms
#[cortex_m_rt::exception]
fn SysTick() {
    let closed = critical_section::with(|cs| {
        BUTTON
            .borrow_ref(cs)
            .as_ref()
            .map(|button| button.is_low().unwrap_or(false))
            .unwrap_or(false)
    });
    TICKS.on_tick(closed);
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Ambient Light Switch ===");

    let mut hw = hardware_setup::init_hardware();
    critical_section::with(|cs| {
        BUTTON.borrow_ref_mut(cs).replace(hw.button);
    });
    hardware_setup::start_ticks(&mut hw.syst, hw.sysclk_hz, THRESHOLDS.ticks_per_second);

    let mut switch = LightSwitch::<_, _, _, 8>::new(hw.relay, hw.sensor, &TICKS, THRESHOLDS);
    let pacing_cycles = hw.sysclk_hz / 1_000 * LOOP_PERIOD_MS;

    rprintln!(
        "=== System Ready: threshold {}, polling every {} min ===",
        THRESHOLDS.lux_threshold,
        THRESHOLDS.check_interval.as_u32()
    );

    loop {
        if let ServiceOutcome::Polled { reading, .. } = switch.service() {
            rprintln!(
                "minute {}: reading {}, counter {}",
                switch.last_polled_at().as_u32(),
                reading,
                switch.counter()
            );
        }

        while let Some(event) = switch.events_mut().pop() {
            rprintln!("{:?}", event);
        }

        cortex_m::asm::delay(pacing_cycles);
    }
}
