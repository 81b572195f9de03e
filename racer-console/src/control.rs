use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::debug;
use racer_lib::{common::Axes, common::Controls, config::Calibration};

// Store original terminal state for restoration
static mut ORIGINAL_TERMIOS: Option<libc::termios> = None;

// Platform-specific raw terminal setup
#[cfg(unix)]
pub fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);

        ORIGINAL_TERMIOS = Some(termios);

        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);

        let flags = libc::fcntl(fd, libc::F_GETFL);
        libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
    }
    // hide the cursor while the game owns the terminal
    print!("\x1b[?25l\x1b[2J");
}

#[cfg(unix)]
pub fn restore_terminal() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        if let Some(original) = ORIGINAL_TERMIOS {
            let fd = io::stdin().as_raw_fd();
            libc::tcsetattr(fd, libc::TCSANOW, &original);

            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK);
        }
    }
    print!("\x1b[0m\x1b[?25h\n");
}

#[cfg(not(unix))]
pub fn enable_raw_mode() {
    // No-op for non-Unix systems
}

#[cfg(not(unix))]
pub fn restore_terminal() {
    // No-op for non-Unix systems
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyEvent {
    StickLeft,
    StickRight,
    StickUp,
    StickDown,
    TiltLeft,
    TiltRight,
    TiltForward,
    TiltBack,
    S1,
    S2,
    Quit,
    None,
}

const ADC_CENTER: i32 = 2048;
const TILT_STEP: i32 = 100;

/// Everything the keyboard thread writes and the game reads.
struct Panel {
    stick_x: i32,
    stick_y: i32,
    tilt_x: i32,
    tilt_y: i32,
    s1: bool,
    s2: bool,
}

impl Panel {
    fn new() -> Self {
        Self {
            stick_x: ADC_CENTER,
            stick_y: ADC_CENTER,
            tilt_x: ADC_CENTER,
            tilt_y: ADC_CENTER,
            s1: false,
            s2: false,
        }
    }

    fn apply(&mut self, key: KeyEvent, cal: &Calibration) {
        let full = cal.joystick_max - 1;
        let (low, high) = (cal.tilt_low, cal.tilt_high);
        match key {
            KeyEvent::StickLeft => self.stick_x = cal.joystick_min,
            KeyEvent::StickRight => self.stick_x = full,
            // stick up reads high on the vertical axis
            KeyEvent::StickUp => self.stick_y = full,
            KeyEvent::StickDown => self.stick_y = cal.joystick_min,
            KeyEvent::TiltLeft => self.tilt_x = (self.tilt_x - TILT_STEP).clamp(low, high),
            KeyEvent::TiltRight => self.tilt_x = (self.tilt_x + TILT_STEP).clamp(low, high),
            KeyEvent::TiltForward => self.tilt_y = (self.tilt_y + TILT_STEP).clamp(low, high),
            KeyEvent::TiltBack => self.tilt_y = (self.tilt_y - TILT_STEP).clamp(low, high),
            KeyEvent::S1 => self.s1 = true,
            KeyEvent::S2 => self.s2 = true,
            KeyEvent::Quit | KeyEvent::None => {}
        }
    }

    /// The stick springs back: every read returns the current deflection and
    /// halves it towards the centre.
    fn sample_stick(&mut self) -> Axes {
        let axes = Axes::new(self.stick_x as u16, self.stick_y as u16);
        self.stick_x = (self.stick_x + ADC_CENTER) / 2;
        self.stick_y = (self.stick_y + ADC_CENTER) / 2;
        axes
    }
}

/// Keyboard stand-in for the joystick, accelerometer and S1/S2.
pub struct KeyboardControls {
    panel: Arc<Mutex<Panel>>,
    _input_thread: std::thread::JoinHandle<()>,
}

impl KeyboardControls {
    pub fn new(calibration: Calibration) -> Self {
        let panel = Arc::new(Mutex::new(Panel::new()));
        let panel_clone = panel.clone();

        let input_thread = std::thread::spawn(move || loop {
            let key = Self::read_key();
            if key == KeyEvent::Quit {
                restore_terminal();
                println!("Terminal restored. Goodbye!");
                std::process::exit(0);
            }
            if key != KeyEvent::None {
                debug!("key {:?}", key);
                lock(&panel_clone).apply(key, &calibration);
            }
            std::thread::sleep(Duration::from_millis(10));
        });

        Self {
            panel,
            _input_thread: input_thread,
        }
    }

    fn read_key() -> KeyEvent {
        let mut buffer = [0; 1];
        let mut stdin = io::stdin();

        match stdin.read(&mut buffer) {
            Ok(1) => match buffer[0] {
                27 => {
                    let mut seq = [0; 2];
                    if stdin.read(&mut seq).unwrap_or(0) == 2 {
                        match seq {
                            [91, 65] => KeyEvent::StickUp,    // [A
                            [91, 66] => KeyEvent::StickDown,  // [B
                            [91, 67] => KeyEvent::StickRight, // [C
                            [91, 68] => KeyEvent::StickLeft,  // [D
                            _ => KeyEvent::None,
                        }
                    } else {
                        KeyEvent::None
                    }
                }
                b'w' | b'W' => KeyEvent::StickUp,
                b's' | b'S' => KeyEvent::StickDown,
                b'a' | b'A' => KeyEvent::StickLeft,
                b'd' | b'D' => KeyEvent::StickRight,
                b'i' | b'I' => KeyEvent::TiltForward,
                b'k' | b'K' => KeyEvent::TiltBack,
                b'j' | b'J' => KeyEvent::TiltLeft,
                b'l' | b'L' => KeyEvent::TiltRight,
                b'z' | b'Z' | b'1' => KeyEvent::S1,
                b'x' | b'X' | b'2' | b' ' | b'\n' | b'\r' => KeyEvent::S2,
                b'q' | b'Q' => KeyEvent::Quit,
                _ => KeyEvent::None,
            },
            _ => KeyEvent::None,
        }
    }
}

fn lock(panel: &Mutex<Panel>) -> MutexGuard<'_, Panel> {
    panel.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Controls for KeyboardControls {
    async fn read_joystick(&mut self) -> Axes {
        lock(&self.panel).sample_stick()
    }

    async fn read_tilt(&mut self) -> Axes {
        let panel = lock(&self.panel);
        Axes::new(panel.tilt_x as u16, panel.tilt_y as u16)
    }

    fn s1_was_pressed(&mut self) -> bool {
        std::mem::take(&mut lock(&self.panel).s1)
    }

    fn s2_was_pressed(&mut self) -> bool {
        std::mem::take(&mut lock(&self.panel).s2)
    }
}
