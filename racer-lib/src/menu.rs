use crate::{
    common::{map_range, Board, Buzzer, Controls, Screen, StatusLed, Timer},
    config::{GameConfig, MENU_AXIS_DOWN, MENU_AXIS_UP, MENU_POLL_MILLIS},
    log::debug,
    screens::{self, Label},
};

/// Clamped position in a list of `len` options.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cursor {
    position: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Stick up (reading above the band) moves towards the first option,
    /// stick down towards the last. No wraparound.
    pub fn step(&mut self, percent: i32) {
        if percent < MENU_AXIS_DOWN {
            if self.position + 1 < self.len {
                self.position += 1;
            }
        } else if percent > MENU_AXIS_UP {
            self.position = self.position.saturating_sub(1);
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MenuOutcome {
    Back,
    Confirm(usize),
}

/// One settings screen: a prompt and a list of options picked with the
/// joystick's vertical axis.
pub struct SelectionMenu<'l> {
    pub prompt: &'l str,
    pub labels: &'l [&'l str],
    /// Draw the prompt on a yellow band.
    pub highlight_prompt: bool,
}

impl<'l> SelectionMenu<'l> {
    pub const fn new(prompt: &'l str, labels: &'l [&'l str]) -> Self {
        Self {
            prompt,
            labels,
            highlight_prompt: false,
        }
    }

    pub const fn highlighted(mut self) -> Self {
        self.highlight_prompt = true;
        self
    }

    /// Polls until S1 or S2. The cursor always starts on the first option.
    pub async fn run<S, C, B, L, T>(
        &self,
        board: &mut Board<'_, S, C, B, L, T>,
        config: &GameConfig,
    ) -> MenuOutcome
    where
        S: Screen,
        C: Controls,
        B: Buzzer,
        L: StatusLed,
        T: Timer,
    {
        let g = &config.geometry;
        let cal = &config.calibration;
        screens::selection_frame(board.screen, self.prompt, self.highlight_prompt, g);
        let mut cursor = Cursor::new(self.labels.len());

        loop {
            let axes = board.controls.read_joystick().await;
            let percent = map_range(axes.y as i32, cal.joystick_min, cal.joystick_max, 0, 100);
            cursor.step(percent);
            screens::options(board.screen, self.labels, cursor.position());

            if board.controls.s1_was_pressed() {
                screens::label(board.screen, Label::Back, true, g);
                board.screen.flush();
                return MenuOutcome::Back;
            }
            if board.controls.s2_was_pressed() {
                screens::label(board.screen, Label::Next, true, g);
                board.screen.flush();
                debug!("option {} confirmed", cursor.position());
                return MenuOutcome::Confirm(cursor.position());
            }
            board.pause(MENU_POLL_MILLIS).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{Button, YELLOW},
        testing::Rig,
    };

    const LABELS: [&str; 3] = ["- a", "- b", "- c"];

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut cursor = Cursor::new(3);
        for _ in 0..10 {
            cursor.step(95);
        }
        assert_eq!(cursor.position(), 0);
        for _ in 0..10 {
            cursor.step(5);
        }
        assert_eq!(cursor.position(), 2);
        cursor.step(50);
        assert_eq!(cursor.position(), 2);
        cursor.step(81);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn band_edges_do_not_move() {
        let mut cursor = Cursor::new(3);
        cursor.step(20);
        assert_eq!(cursor.position(), 0);
        cursor.step(19);
        cursor.step(80);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn confirm_reports_cursor() {
        let mut rig = Rig::new();
        // two pushes down, then one poll at rest before confirming
        rig.controls.joystick(2048, 100);
        rig.controls.joystick(2048, 100);
        rig.controls.idle_frames(2);
        rig.controls.press(Button::S2);

        let menu = SelectionMenu::new("Pick:", &LABELS);
        let outcome = pollster::block_on(menu.run(&mut rig.board(), &GameConfig::default()));

        assert_eq!(outcome, MenuOutcome::Confirm(2));
        let highlighted: Vec<String> = rig
            .screen
            .texts()
            .into_iter()
            .filter(|(_, style)| style.bg == Some(YELLOW))
            .map(|(text, _)| text)
            .collect();
        assert_eq!(highlighted.first().map(String::as_str), Some("Pick:"));
        assert_eq!(highlighted.last().map(String::as_str), Some("Next"));
    }

    #[test]
    fn back_wins_over_next() {
        let mut rig = Rig::new();
        rig.controls.press(Button::S1);
        rig.controls.press(Button::S2);

        let menu = SelectionMenu::new("Pick:", &LABELS);
        let outcome = pollster::block_on(menu.run(&mut rig.board(), &GameConfig::default()));
        assert_eq!(outcome, MenuOutcome::Back);
    }
}
