#![no_std]
#![no_main]

use crate::control::{s1_task, s2_task, BoosterControls, ButtonHardware};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::adc::{Adc, Channel, Config};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Instant, Timer as EmbassyTimer};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7735s;
use mipidsi::Builder;
use racer_lib::common::{Board, Buzzer, StatusLed, Timer};
use racer_lib::config::GameConfig;
use racer_lib::graphics::GraphicsScreen;
use racer_lib::machine::Machine;
use smart_leds::RGB8;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod control;

// Embedded timer implementation
pub struct EmbeddedTimer;

impl Timer for EmbeddedTimer {
    async fn sleep_millis(&self, millis: u64) {
        EmbassyTimer::after_millis(millis).await;
    }
}

// 125 MHz system clock through the /64 divider
const PWM_CLOCK_HZ: u32 = 125_000_000 / 64;

/// Piezo on a PWM output: square wave at 50% duty while a tone plays.
pub struct PwmBuzzer<'a> {
    pwm: Pwm<'a>,
    config: PwmConfig,
}

impl<'a> PwmBuzzer<'a> {
    pub fn new(pwm: Pwm<'a>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = 64u8.into();
        config.compare_a = 0;
        Self { pwm, config }
    }
}

impl Buzzer for PwmBuzzer<'_> {
    fn tone(&mut self, hz: u16) {
        if hz == 0 {
            self.silence();
            return;
        }
        let top = (PWM_CLOCK_HZ / hz as u32).min(u16::MAX as u32) as u16;
        self.config.top = top;
        self.config.compare_a = top / 2;
        self.pwm.set_config(&self.config);
    }

    fn silence(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}

// Wrapper type to implement StatusLed for a single PioWs2812 pixel
pub struct Ws2812Led<'a>(PioWs2812<'a, PIO0, 0, 1>);

impl StatusLed for Ws2812Led<'_> {
    async fn set(&mut self, color: RGB8) {
        self.0.write(&[color]).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting racer!");

    bind_interrupts!(struct Irqs {
        PIO0_IRQ_0 => InterruptHandler<PIO0>;
        ADC_IRQ_FIFO => AdcInterruptHandler;
    });

    let p = embassy_rp::init(Default::default());

    // Status LED on PIO
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_13, &program);
    let mut led = Ws2812Led(ws2812);

    // 128x128 ST7735s on SPI1
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 32_000_000;
    let spi_bus = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::High);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 512]> = StaticCell::new();
    let di = SpiInterface::new(spi_device, dc, DISPLAY_BUF.init([0u8; 512]));
    let display = Builder::new(ST7735s, di)
        .display_size(128, 128)
        .reset_pin(rst)
        .init(&mut Delay)
        .unwrap();
    let mut screen = GraphicsScreen::new(display);

    let mut buzzer = PwmBuzzer::new(Pwm::new_output_a(
        p.PWM_SLICE0,
        p.PIN_16,
        PwmConfig::default(),
    ));

    // Joystick on ADC0/1, accelerometer on ADC2/3
    let adc = Adc::new(p.ADC, Irqs, Config::default());
    let joystick_x = Channel::new_pin(p.PIN_26, Pull::None);
    let joystick_y = Channel::new_pin(p.PIN_27, Pull::None);
    let accel_x = Channel::new_pin(p.PIN_28, Pull::None);
    let accel_y = Channel::new_pin(p.PIN_29, Pull::None);
    let mut controls = BoosterControls::new(adc, joystick_x, joystick_y, accel_x, accel_y);

    let s1_hw = ButtonHardware::new_s1(Input::new(p.PIN_0, Pull::Up));
    let s2_hw = ButtonHardware::new_s2(Input::new(p.PIN_1, Pull::Up));
    spawner.spawn(s1_task(s1_hw)).unwrap();
    spawner.spawn(s2_task(s2_hw)).unwrap();

    let timer = EmbeddedTimer;
    let seed = Instant::now().as_ticks() as u32 ^ ((controls.tilt_noise().await as u32) << 16);
    info!("seed {}", seed);

    let board = Board::new(&mut screen, &mut controls, &mut buzzer, &mut led, &timer);
    let mut machine = Machine::new(board, GameConfig::default(), seed);
    machine.run().await
}
