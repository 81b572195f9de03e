use smart_leds::RGB8;

use crate::common::{BLUE, ORANGE, RED};

/// Spawn, speed and scoring parameters of one difficulty level.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct DifficultyProfile {
    pub initial_velocity: u16,
    /// Ticks between two spawn attempts.
    pub spawn_wait_ticks: u32,
    /// A spawn attempt succeeds when a roll in `0..100` exceeds this.
    pub spawn_threshold: u16,
    pub points_per_speedup: u16,
    pub max_obstacles: usize,
}

impl DifficultyProfile {
    pub const ROOKIE: DifficultyProfile = DifficultyProfile {
        initial_velocity: 1,
        spawn_wait_ticks: 40,
        spawn_threshold: 30,
        points_per_speedup: 5,
        max_obstacles: 5,
    };

    pub const CHAMPION: DifficultyProfile = DifficultyProfile {
        initial_velocity: 2,
        spawn_wait_ticks: 35,
        spawn_threshold: 30,
        points_per_speedup: 6,
        max_obstacles: 7,
    };

    pub const LEGEND: DifficultyProfile = DifficultyProfile {
        initial_velocity: 3,
        spawn_wait_ticks: 35,
        spawn_threshold: 40,
        points_per_speedup: 5,
        max_obstacles: 7,
    };
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum ControlMode {
    Joystick,
    Accelerometer,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Joystick => ControlMode::Accelerometer,
            ControlMode::Accelerometer => ControlMode::Joystick,
        }
    }
}

pub const CAR_LABELS: [&str; 3] = ["- Ferrari", "- RedBull", "- McLaren"];
pub const DIFFICULTY_LABELS: [&str; 3] = ["- Rookie", "- Champion", "- Legend"];
pub const MODE_LABELS: [&str; 2] = ["- Joystick", "- Accelerometer"];

// Cursor -> committed value. Anything past the end picks the last option.

pub fn car_color(cursor: usize) -> RGB8 {
    match cursor {
        0 => RED,
        1 => BLUE,
        _ => ORANGE,
    }
}

pub fn difficulty(cursor: usize) -> DifficultyProfile {
    match cursor {
        0 => DifficultyProfile::ROOKIE,
        1 => DifficultyProfile::CHAMPION,
        _ => DifficultyProfile::LEGEND,
    }
}

pub fn control_mode(cursor: usize) -> ControlMode {
    match cursor {
        0 => ControlMode::Joystick,
        _ => ControlMode::Accelerometer,
    }
}

/// What the three settings screens produce and a race consumes.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Settings {
    pub car_color: RGB8,
    pub difficulty: DifficultyProfile,
    pub mode: ControlMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            car_color: RED,
            difficulty: DifficultyProfile::ROOKIE,
            mode: ControlMode::Joystick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_BLOCKS;

    #[test]
    fn cursor_lookups() {
        assert_eq!(car_color(0), RED);
        assert_eq!(car_color(1), BLUE);
        assert_eq!(car_color(2), ORANGE);
        assert_eq!(difficulty(0), DifficultyProfile::ROOKIE);
        assert_eq!(difficulty(1), DifficultyProfile::CHAMPION);
        assert_eq!(difficulty(2), DifficultyProfile::LEGEND);
        assert_eq!(control_mode(0), ControlMode::Joystick);
        assert_eq!(control_mode(1), ControlMode::Accelerometer);
    }

    #[test]
    fn rookie_preset() {
        let p = DifficultyProfile::ROOKIE;
        assert_eq!(
            (
                p.initial_velocity,
                p.spawn_wait_ticks,
                p.spawn_threshold,
                p.points_per_speedup,
                p.max_obstacles
            ),
            (1, 40, 30, 5, 5)
        );
    }

    #[test]
    fn presets_fit_the_pool() {
        for p in [
            DifficultyProfile::ROOKIE,
            DifficultyProfile::CHAMPION,
            DifficultyProfile::LEGEND,
        ] {
            assert!(p.max_obstacles <= MAX_BLOCKS);
            assert!(p.spawn_wait_ticks > 0);
        }
    }

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(ControlMode::Joystick.toggled(), ControlMode::Accelerometer);
        assert_eq!(ControlMode::Joystick.toggled().toggled(), ControlMode::Joystick);
    }
}
