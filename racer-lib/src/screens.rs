//! Static screens and the fixed parts of the playfield.

use no_std_strings::{str16, str_format};

use crate::{
    common::{
        Board, Buzzer, Controls, Rect, Screen, StatusLed, TextStyle, Timer, BLACK, GREEN, RED,
        WHITE, YELLOW,
    },
    config::Geometry,
    sound::{NOTE_D4, NOTE_G4},
};

const TITLE: TextStyle = TextStyle::new(RED).on(WHITE).scaled(2);
const BODY: TextStyle = TextStyle::new(BLACK);

/// Bottom-corner button captions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Label {
    Back,
    Next,
    Play,
}

impl Label {
    fn text(self) -> &'static str {
        match self {
            Label::Back => "Back",
            Label::Next => "Next",
            Label::Play => "PLAY",
        }
    }

    fn origin(self, g: &Geometry) -> (i16, i16) {
        match self {
            Label::Back => (2, g.height - 10),
            Label::Next => (g.width - 26, g.height - 10),
            Label::Play => (g.width / 2 + 13, g.height - 20),
        }
    }

    fn style(self, pressed: bool) -> TextStyle {
        match (self, pressed) {
            (Label::Play, false) => BODY.on(YELLOW).scaled(2),
            (Label::Play, true) => BODY.on(RED).scaled(2),
            (_, false) => BODY,
            (_, true) => BODY.on(YELLOW),
        }
    }
}

pub fn label<S: Screen>(screen: &mut S, label: Label, pressed: bool, g: &Geometry) {
    let (x, y) = label.origin(g);
    screen.draw_text(x, y, label.text(), label.style(pressed));
}

pub fn splash<S: Screen>(screen: &mut S, g: &Geometry) {
    screen.clear(BLACK);
    screen.fill_rect(Rect::new(0, 0, g.grass_width, g.height), GREEN);
    screen.fill_rect(Rect::new(g.width - g.grass_width, 0, g.grass_width, g.height), GREEN);
    let style = TextStyle::new(RED).scaled(3);
    screen.draw_text(20, 30, "RACE", style);
    screen.draw_text(20, 62, "GAME", style);
}

pub fn menu_commands<S: Screen>(screen: &mut S, g: &Geometry) {
    screen.clear(WHITE);
    screen.draw_text(10, 15, "Menu Cmds", TITLE);
    for (y, line) in [
        (45, "- Move the analog to"),
        (55, "  select the option."),
        (70, "- Press S1 to go to"),
        (80, "  previous page."),
        (95, "- Press S2 to go to"),
        (105, "  next page."),
    ] {
        screen.draw_text(1, y, line, BODY);
    }
    label(screen, Label::Next, false, g);
}

pub fn game_commands<S: Screen>(screen: &mut S, g: &Geometry) {
    screen.clear(WHITE);
    screen.draw_text(10, 15, "Game Cmds", TITLE);
    for (x, y, line) in [
        (7, 45, "Avoid the obstacles"),
        (15, 55, "and earn as many"),
        (10, 65, "points as you can!"),
        (1, 85, "S1: switch drive mode"),
        (1, 95, "S2: restart race"),
    ] {
        screen.draw_text(x, y, line, BODY);
    }
    label(screen, Label::Back, false, g);
    label(screen, Label::Play, false, g);
}

/// Title, prompt and the two navigation labels of a settings screen.
pub fn selection_frame<S: Screen>(screen: &mut S, prompt: &str, highlight: bool, g: &Geometry) {
    screen.clear(WHITE);
    screen.draw_text(15, 15, "SETTINGS", TITLE);
    let style = if highlight { BODY.on(YELLOW) } else { BODY };
    screen.draw_text(1, 45, prompt, style);
    label(screen, Label::Back, false, g);
    label(screen, Label::Next, false, g);
}

pub const OPTION_X: i16 = 5;
pub const OPTION_TOP: i16 = 60;
pub const OPTION_SPACING: i16 = 15;

/// Repaints the whole option list with the cursor line highlighted.
pub fn options<S: Screen>(screen: &mut S, labels: &[&str], cursor: usize) {
    for (idx, text) in labels.iter().enumerate() {
        let bg = if idx == cursor { YELLOW } else { WHITE };
        let y = OPTION_TOP + OPTION_SPACING * idx as i16;
        screen.draw_text(OPTION_X, y, text, BODY.on(bg));
    }
}

/// 3-2-1-GO with beeps, then a black road between the grass strips.
pub async fn countdown<S, C, B, L, T>(board: &mut Board<'_, S, C, B, L, T>, g: &Geometry)
where
    S: Screen,
    C: Controls,
    B: Buzzer,
    L: StatusLed,
    T: Timer,
{
    let big = TextStyle::new(RED).on(WHITE).scaled(7);
    board.screen.clear(WHITE);
    for digit in ["3", "2", "1"] {
        board
            .screen
            .draw_text(g.width / 2 - 25, g.height / 2 - 25, digit, big);
        board.beep(NOTE_D4, 500).await;
        board.pause(500).await;
        board.screen.clear(WHITE);
    }
    board.screen.draw_text(2, g.height / 2 - 25, "GO!", big);
    board.beep(NOTE_G4, 1000).await;
    board.screen.clear(BLACK);
    background(board.screen, g);
}

pub fn background<S: Screen>(screen: &mut S, g: &Geometry) {
    screen.fill_rect(Rect::new(0, 0, g.grass_width, g.height), GREEN);
    screen.fill_rect(
        Rect::new(g.width - g.grass_width, 0, g.grass_width, g.height),
        GREEN,
    );
}

pub fn draw_score<S: Screen>(screen: &mut S, score: u16, g: &Geometry) {
    screen.fill_rect(Rect::new(0, 0, g.grass_width, g.grass_width), GREEN);
    let text = str_format!(str16, "{}", score);
    screen.draw_text(1, 2, text.as_str(), TextStyle::new(RED).on(GREEN));
}

/// Drawn over the frozen playfield.
pub fn game_over<S: Screen>(screen: &mut S, score: u16, record: u16, g: &Geometry) {
    let big = TextStyle::new(RED).scaled(3);
    screen.draw_text(28, 10, "GAME", big);
    screen.draw_text(28, 40, "OVER", big);

    let small = TextStyle::new(RED).scaled(2);
    let line = str_format!(str16, "Score:{}", score);
    screen.draw_text(10, g.height / 2 + 10, line.as_str(), small);
    let line = str_format!(str16, "Record:{}", record);
    screen.draw_text(4, g.height / 2 + 32, line.as_str(), small);
}
