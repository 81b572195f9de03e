use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use racer_lib::common::{Axes, Controls};

// Latched presses, set by the button tasks and taken by the game
pub static S1_SIGNAL: Signal<CriticalSectionRawMutex, bool> = Signal::new();
pub static S2_SIGNAL: Signal<CriticalSectionRawMutex, bool> = Signal::new();

const DEBOUNCE_MILLIS: u64 = 200;
// Reported when a conversion fails: a centred stick, a level board
const ADC_MID: u16 = 2048;

// Hardware button wrapper for running in tasks
pub struct ButtonHardware {
    button: Input<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, bool>,
}

impl ButtonHardware {
    pub fn new_s1(button: Input<'static>) -> Self {
        Self {
            button,
            signal: &S1_SIGNAL,
        }
    }

    pub fn new_s2(button: Input<'static>) -> Self {
        Self {
            button,
            signal: &S2_SIGNAL,
        }
    }

    pub async fn run(mut self) -> ! {
        loop {
            // Buttons pull the line low when pressed
            self.button.wait_for_falling_edge().await;
            self.signal.signal(true);
            embassy_time::Timer::after_millis(DEBOUNCE_MILLIS).await;
        }
    }
}

#[embassy_executor::task]
pub async fn s1_task(button_hardware: ButtonHardware) {
    button_hardware.run().await;
}

#[embassy_executor::task]
pub async fn s2_task(button_hardware: ButtonHardware) {
    button_hardware.run().await;
}

/// Analog joystick and two-axis accelerometer sharing the ADC.
pub struct BoosterControls<'a> {
    adc: Adc<'a, Async>,
    joystick_x: Channel<'a>,
    joystick_y: Channel<'a>,
    accel_x: Channel<'a>,
    accel_y: Channel<'a>,
}

impl<'a> BoosterControls<'a> {
    pub fn new(
        adc: Adc<'a, Async>,
        joystick_x: Channel<'a>,
        joystick_y: Channel<'a>,
        accel_x: Channel<'a>,
        accel_y: Channel<'a>,
    ) -> Self {
        Self {
            adc,
            joystick_x,
            joystick_y,
            accel_x,
            accel_y,
        }
    }

    async fn sample(adc: &mut Adc<'a, Async>, channel: &mut Channel<'a>) -> u16 {
        match adc.read(channel).await {
            Ok(value) => value,
            Err(e) => {
                defmt::warn!("adc read failed: {:?}", e);
                ADC_MID
            }
        }
    }

    /// Raw accelerometer reading, also used as entropy for the seed.
    pub async fn tilt_noise(&mut self) -> u16 {
        Self::sample(&mut self.adc, &mut self.accel_x).await
    }
}

impl Controls for BoosterControls<'_> {
    async fn read_joystick(&mut self) -> Axes {
        let x = Self::sample(&mut self.adc, &mut self.joystick_x).await;
        let y = Self::sample(&mut self.adc, &mut self.joystick_y).await;
        Axes::new(x, y)
    }

    async fn read_tilt(&mut self) -> Axes {
        let x = Self::sample(&mut self.adc, &mut self.accel_x).await;
        let y = Self::sample(&mut self.adc, &mut self.accel_y).await;
        Axes::new(x, y)
    }

    fn s1_was_pressed(&mut self) -> bool {
        S1_SIGNAL.try_take().unwrap_or(false)
    }

    fn s2_was_pressed(&mut self) -> bool {
        S2_SIGNAL.try_take().unwrap_or(false)
    }
}
