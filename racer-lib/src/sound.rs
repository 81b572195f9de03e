use crate::{
    common::{Board, Buzzer, Controls, Screen, StatusLed, Timer},
    log::debug,
};

pub const NOTE_A3: u16 = 220;
pub const NOTE_B3: u16 = 247;
pub const NOTE_C4: u16 = 262;
pub const NOTE_D4: u16 = 294;
pub const NOTE_E4: u16 = 330;
pub const NOTE_F4: u16 = 349;
pub const NOTE_G4: u16 = 392;
pub const NOTE_A4: u16 = 440;
pub const NOTE_AS4: u16 = 466;
pub const NOTE_C5: u16 = 523;
pub const NOTE_A5: u16 = 880;

// (frequency, note divisor): a note lasts 1000 / divisor ms
pub const INTRO: [(u16, u16); 36] = [
    (NOTE_D4, 3),
    (NOTE_D4, 3),
    (NOTE_E4, 4),
    (NOTE_F4, 4),
    (NOTE_D4, 2),
    (NOTE_C4, 2),
    (NOTE_C4, 2),
    (NOTE_A3, 2),
    (NOTE_B3, 1),
    (NOTE_D4, 3),
    (NOTE_D4, 3),
    (NOTE_E4, 4),
    (NOTE_F4, 4),
    (NOTE_D4, 2),
    (NOTE_C4, 2),
    (NOTE_C4, 2),
    (NOTE_F4, 2),
    (NOTE_G4, 1),
    (NOTE_G4, 3),
    (NOTE_G4, 3),
    (NOTE_A4, 4),
    (NOTE_AS4, 4),
    (NOTE_G4, 2),
    (NOTE_F4, 2),
    (NOTE_F4, 2),
    (NOTE_D4, 2),
    (NOTE_E4, 1),
    (NOTE_G4, 3),
    (NOTE_G4, 3),
    (NOTE_A4, 4),
    (NOTE_AS4, 4),
    (NOTE_G4, 2),
    (NOTE_F4, 2),
    (NOTE_F4, 2),
    (NOTE_AS4, 2),
    (NOTE_C5, 1),
];

/// Gap added after every note so consecutive equal notes stay distinct.
pub const NOTE_GAP_MILLIS: u64 = 50;

pub fn note_millis(divisor: u16) -> u64 {
    1000 / divisor.max(1) as u64
}

pub async fn play_intro<S, C, B, L, T>(board: &mut Board<'_, S, C, B, L, T>)
where
    S: Screen,
    C: Controls,
    B: Buzzer,
    L: StatusLed,
    T: Timer,
{
    debug!("intro melody, {} notes", INTRO.len());
    for (hz, divisor) in INTRO {
        board.buzzer.tone(hz);
        board.pause(note_millis(divisor) + NOTE_GAP_MILLIS).await;
        board.buzzer.silence();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Rig;

    #[test]
    fn note_lengths() {
        assert_eq!(note_millis(1), 1000);
        assert_eq!(note_millis(3), 333);
        assert_eq!(note_millis(4), 250);
        assert_eq!(note_millis(0), 1000);
    }

    #[test]
    fn intro_plays_every_note_then_silences() {
        let mut rig = Rig::new();
        pollster::block_on(play_intro(&mut rig.board()));

        assert_eq!(rig.buzzer.tones.len(), INTRO.len());
        assert_eq!(rig.buzzer.tones[0], NOTE_D4);
        assert_eq!(rig.buzzer.tones[35], NOTE_C5);
        assert!(!rig.buzzer.playing);

        let sleeps = rig.timer.sleeps();
        assert_eq!(sleeps.len(), INTRO.len());
        assert_eq!(sleeps[0], 333 + NOTE_GAP_MILLIS);
        assert_eq!(sleeps[8], 1000 + NOTE_GAP_MILLIS);
    }
}
