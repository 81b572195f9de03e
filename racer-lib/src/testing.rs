//! Recording and scripted fakes of the board, for unit tests.

use std::{cell::RefCell, collections::VecDeque, string::String, vec::Vec};

use smart_leds::RGB8;

use crate::common::{
    Axes, Board, Button, Buzzer, Controls, Rect, Screen, StatusLed, TextStyle, Timer,
};

#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    Clear(RGB8),
    Rect(Rect, RGB8),
    Text {
        x: i16,
        y: i16,
        text: String,
        style: TextStyle,
    },
    Flush,
}

impl DrawOp {
    pub fn text(x: i16, y: i16, text: &str, style: TextStyle) -> Self {
        DrawOp::Text {
            x,
            y,
            text: text.into(),
            style,
        }
    }
}

#[derive(Default)]
pub struct RecordingScreen {
    ops: Vec<DrawOp>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn rects(&self) -> Vec<(Rect, RGB8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect(r, c) => Some((*r, *c)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(String, TextStyle)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, style, .. } => Some((text.clone(), *style)),
                _ => None,
            })
            .collect()
    }

    pub fn shows(&self, needle: &str) -> bool {
        self.texts().iter().any(|(t, _)| t == needle)
    }
}

impl Screen for RecordingScreen {
    fn clear(&mut self, color: RGB8) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: RGB8) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, style: TextStyle) {
        self.ops.push(DrawOp::text(x, y, text, style));
    }

    fn flush(&mut self) {
        self.ops.push(DrawOp::Flush);
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Frame {
    /// One poll in which neither button is down.
    Idle,
    Press(Button),
}

const IDLE_AXES: Axes = Axes::new(2048, 2048);
const POLL_BUDGET: u32 = 100_000;

/// Analog readings come from queues that fall back to a centred stick and a
/// level board. Button presses are consumed in order; S2 polls also consume
/// idle frames so a script can delay a press by a number of polls.
#[derive(Default)]
pub struct ScriptedControls {
    joystick: VecDeque<Axes>,
    tilt: VecDeque<Axes>,
    buttons: VecDeque<Frame>,
    idle_polls: u32,
}

impl ScriptedControls {
    pub fn joystick(&mut self, x: u16, y: u16) {
        self.joystick.push_back(Axes::new(x, y));
    }

    pub fn tilt(&mut self, x: u16, y: u16) {
        self.tilt.push_back(Axes::new(x, y));
    }

    pub fn press(&mut self, button: Button) {
        self.buttons.push_back(Frame::Press(button));
    }

    pub fn idle_frames(&mut self, n: usize) {
        self.buttons.extend(core::iter::repeat(Frame::Idle).take(n));
    }

    /// True once every scripted frame has been consumed.
    pub fn is_drained(&self) -> bool {
        self.buttons.is_empty()
    }

    fn take(&mut self, button: Button) -> bool {
        match self.buttons.front() {
            Some(Frame::Press(b)) if *b == button => {
                self.buttons.pop_front();
                true
            }
            Some(_) => false,
            None => {
                self.idle_polls += 1;
                assert!(self.idle_polls < POLL_BUDGET, "button script exhausted");
                false
            }
        }
    }
}

impl Controls for ScriptedControls {
    async fn read_joystick(&mut self) -> Axes {
        self.joystick.pop_front().unwrap_or(IDLE_AXES)
    }

    async fn read_tilt(&mut self) -> Axes {
        self.tilt.pop_front().unwrap_or(IDLE_AXES)
    }

    fn s1_was_pressed(&mut self) -> bool {
        self.take(Button::S1)
    }

    fn s2_was_pressed(&mut self) -> bool {
        if self.buttons.front() == Some(&Frame::Idle) {
            self.buttons.pop_front();
            return false;
        }
        self.take(Button::S2)
    }
}

#[derive(Default)]
pub struct RecordingBuzzer {
    pub tones: Vec<u16>,
    pub playing: bool,
}

impl Buzzer for RecordingBuzzer {
    fn tone(&mut self, hz: u16) {
        self.tones.push(hz);
        self.playing = true;
    }

    fn silence(&mut self) {
        self.playing = false;
    }
}

#[derive(Default)]
pub struct RecordingLed {
    pub colors: Vec<RGB8>,
}

impl StatusLed for RecordingLed {
    async fn set(&mut self, color: RGB8) {
        self.colors.push(color);
    }
}

/// Returns immediately and remembers how long it was asked to sleep.
#[derive(Default)]
pub struct InstantTimer {
    sleeps: RefCell<Vec<u64>>,
}

impl InstantTimer {
    pub fn sleeps(&self) -> Vec<u64> {
        self.sleeps.borrow().clone()
    }
}

impl Timer for InstantTimer {
    async fn sleep_millis(&self, millis: u64) {
        self.sleeps.borrow_mut().push(millis);
    }
}

pub type TestBoard<'a> =
    Board<'a, RecordingScreen, ScriptedControls, RecordingBuzzer, RecordingLed, InstantTimer>;

/// Owns one of each fake; `board()` lends them out for a call.
#[derive(Default)]
pub struct Rig {
    pub screen: RecordingScreen,
    pub controls: ScriptedControls,
    pub buzzer: RecordingBuzzer,
    pub led: RecordingLed,
    pub timer: InstantTimer,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&mut self) -> TestBoard<'_> {
        Board::new(
            &mut self.screen,
            &mut self.controls,
            &mut self.buzzer,
            &mut self.led,
            &self.timer,
        )
    }
}
