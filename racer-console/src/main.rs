use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info};
use racer_lib::{
    common::{Board, Buzzer, StatusLed, Timer},
    config::GameConfig,
    machine::Machine,
};
use smart_leds::RGB8;

mod control;
mod display;

use control::{enable_raw_mode, restore_terminal, KeyboardControls};
use display::TerminalScreen;

// Console timer implementation
pub struct ConsoleTimer;

impl Timer for ConsoleTimer {
    async fn sleep_millis(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// No speaker: tones only show up in the log.
pub struct ConsoleBuzzer;

impl Buzzer for ConsoleBuzzer {
    fn tone(&mut self, hz: u16) {
        debug!("buzzer {} Hz", hz);
    }

    fn silence(&mut self) {
        debug!("buzzer off");
    }
}

pub struct ConsoleLed;

impl StatusLed for ConsoleLed {
    async fn set(&mut self, color: RGB8) {
        debug!("led {:?}", color);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr shares the terminal with the game; redirect it to read the log
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::default();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u32;
    info!("starting with seed {}", seed);

    // Set up Ctrl+C handler to restore terminal
    ctrlc::set_handler(move || {
        restore_terminal();
        println!("Terminal restored. Goodbye!");
        std::process::exit(0);
    })?;
    enable_raw_mode();

    let mut screen = TerminalScreen::new(
        config.geometry.width as usize,
        config.geometry.height as usize,
    );
    let mut controls = KeyboardControls::new(config.calibration);
    let mut buzzer = ConsoleBuzzer;
    let mut led = ConsoleLed;
    let timer = ConsoleTimer;

    let board = Board::new(&mut screen, &mut controls, &mut buzzer, &mut led, &timer);
    let mut machine = Machine::new(board, config, seed);
    machine.run().await
}
