use smart_leds::RGB8;

use crate::config::{BUTTON_POLL_MILLIS, SPEEDUP_PULSE_MILLIS};
use crate::log::debug;
use crate::sound::NOTE_A5;

// BoosterPack LCD palette, full 8-bit channels
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);
pub const WHITE: RGB8 = RGB8::new(255, 255, 255);
pub const RED: RGB8 = RGB8::new(255, 0, 0);
pub const GREEN: RGB8 = RGB8::new(0, 255, 0);
pub const BLUE: RGB8 = RGB8::new(0, 0, 255);
pub const YELLOW: RGB8 = RGB8::new(255, 255, 0);
pub const GREY: RGB8 = RGB8::new(128, 128, 128);
pub const ORANGE: RGB8 = RGB8::new(255, 128, 0);
pub const CYAN: RGB8 = RGB8::new(0, 255, 255);
pub const MAGENTA: RGB8 = RGB8::new(255, 0, 255);
pub const VIOLET: RGB8 = RGB8::new(138, 43, 226);
pub const PINK: RGB8 = RGB8::new(245, 185, 185);
pub const SPRING_GREEN: RGB8 = RGB8::new(0, 255, 127);
pub const DEEP_PINK: RGB8 = RGB8::new(255, 20, 147);
pub const TURQUOISE: RGB8 = RGB8::new(0, 206, 209);
pub const DARK_GREEN: RGB8 = RGB8::new(0, 100, 0);
pub const PEACH_PUFF: RGB8 = RGB8::new(255, 218, 155);

/// Obstacle colours, indexed by pool slot.
pub const OBSTACLE_COLORS: [RGB8; 10] = [
    CYAN,
    MAGENTA,
    VIOLET,
    PINK,
    YELLOW,
    SPRING_GREEN,
    DEEP_PINK,
    TURQUOISE,
    DARK_GREEN,
    PEACH_PUFF,
];

// Screen coordinates, origin at the top-left corner
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Dot {
    pub x: i16,
    pub y: i16,
}

impl Dot {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap test with inclusive edges: boxes that merely touch count.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}

// Simple PRNG implementation
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as u16
    }

    /// Uniform value in `0..max`.
    pub fn next_range(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }

    /// Uniform value in `min..=max`.
    pub fn between(&mut self, min: i16, max: i16) -> i16 {
        if max <= min {
            return min;
        }
        let span = (max as i32 - min as i32 + 1).min(u16::MAX as i32) as u16;
        (min as i32 + self.next_range(span) as i32) as i16
    }
}

/// Linear re-scaling with integer arithmetic, truncating toward zero.
/// Values outside the input range extrapolate; callers clamp.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Button {
    /// Back / alternate action.
    S1,
    /// Next / confirm / restart.
    S2,
}

/// Raw analog sample of a two-axis sensor, in ADC counts.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Axes {
    pub x: u16,
    pub y: u16,
}

impl Axes {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub fg: RGB8,
    pub bg: Option<RGB8>,
    pub scale: u8,
}

impl TextStyle {
    pub const fn new(fg: RGB8) -> Self {
        Self {
            fg,
            bg: None,
            scale: 1,
        }
    }

    pub const fn on(mut self, bg: RGB8) -> Self {
        self.bg = Some(bg);
        self
    }

    pub const fn scaled(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }
}

// Timer abstraction trait
pub trait Timer {
    async fn sleep_millis(&self, millis: u64);
}

/// Drawing primitives of the LCD. Erasing is painting with the background
/// colour, so callers only ever touch the pixels that changed.
pub trait Screen {
    fn clear(&mut self, color: RGB8);
    fn fill_rect(&mut self, rect: Rect, color: RGB8);
    fn draw_text(&mut self, x: i16, y: i16, text: &str, style: TextStyle);

    /// End of a visible frame. Panels that draw immediately ignore it.
    fn flush(&mut self) {}
}

/// Joystick, accelerometer and the two push buttons.
///
/// Button methods report a latched press and clear it; debouncing is the
/// platform's job.
pub trait Controls {
    async fn read_joystick(&mut self) -> Axes;
    async fn read_tilt(&mut self) -> Axes;
    fn s1_was_pressed(&mut self) -> bool;
    fn s2_was_pressed(&mut self) -> bool;
}

pub trait Buzzer {
    fn tone(&mut self, hz: u16);
    fn silence(&mut self);
}

pub trait StatusLed {
    async fn set(&mut self, color: RGB8);
}

/// Everything the game talks to, borrowed for the lifetime of the run.
pub struct Board<'a, S, C, B, L, T> {
    pub screen: &'a mut S,
    pub controls: &'a mut C,
    pub buzzer: &'a mut B,
    pub led: &'a mut L,
    pub timer: &'a T,
}

impl<'a, S: Screen, C: Controls, B: Buzzer, L: StatusLed, T: Timer> Board<'a, S, C, B, L, T> {
    pub fn new(
        screen: &'a mut S,
        controls: &'a mut C,
        buzzer: &'a mut B,
        led: &'a mut L,
        timer: &'a T,
    ) -> Self {
        Self {
            screen,
            controls,
            buzzer,
            led,
            timer,
        }
    }

    /// Present what was drawn so far, then sleep.
    pub async fn pause(&mut self, millis: u64) {
        self.screen.flush();
        self.timer.sleep_millis(millis).await;
    }

    pub async fn beep(&mut self, hz: u16, millis: u64) {
        self.buzzer.tone(hz);
        self.pause(millis).await;
        self.buzzer.silence();
    }

    /// Block until either button is pressed. S1 wins a tie.
    pub async fn wait_for_button(&mut self) -> Button {
        loop {
            if self.controls.s1_was_pressed() {
                return Button::S1;
            }
            if self.controls.s2_was_pressed() {
                return Button::S2;
            }
            self.pause(BUTTON_POLL_MILLIS).await;
        }
    }

    /// Drops presses latched while no handler was listening.
    pub fn discard_presses(&mut self) {
        let s1 = self.controls.s1_was_pressed();
        let s2 = self.controls.s2_was_pressed();
        if s1 || s2 {
            debug!("discarded presses s1={} s2={}", s1, s2);
        }
    }

    pub async fn wait_for(&mut self, button: Button) {
        while self.wait_for_button().await != button {}
    }

    /// Speedup feedback: red LED and a short high beep.
    pub async fn pulse(&mut self) {
        self.led.set(RED).await;
        self.buzzer.tone(NOTE_A5);
        self.timer.sleep_millis(SPEEDUP_PULSE_MILLIS).await;
        self.buzzer.silence();
        self.led.set(BLACK).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_matches_integer_map() {
        assert_eq!(map_range(0, 0, 4096, 0, 128), 0);
        assert_eq!(map_range(2048, 0, 4096, 0, 128), 64);
        assert_eq!(map_range(4095, 0, 4096, 0, 100), 99);
        // inverted output range
        assert_eq!(map_range(0, 0, 4096, 128, 0), 128);
        assert_eq!(map_range(4096, 0, 4096, 128, 0), 0);
        // extrapolates outside the input range
        assert_eq!(map_range(1000, 1250, 2850, 0, 128), -20);
    }

    #[test]
    fn map_range_degenerate_input() {
        assert_eq!(map_range(7, 3, 3, 10, 20), 10);
    }

    #[test]
    fn prng_between_stays_in_bounds() {
        let mut prng = Prng::new(42);
        for _ in 0..10_000 {
            let v = prng.between(15, 103);
            assert!((15..=103).contains(&v), "{} out of range", v);
        }
        assert_eq!(prng.between(5, 5), 5);
        assert_eq!(prng.between(9, 2), 9);
    }

    #[test]
    fn prng_is_deterministic() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_range(100), b.next_range(100));
        }
    }

    #[test]
    fn rect_touching_edges_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.touches(&Rect::new(10, 10, 5, 5)));
        assert!(!a.touches(&Rect::new(11, 0, 5, 5)));
        assert!(!a.touches(&Rect::new(0, 11, 5, 5)));
    }
}
