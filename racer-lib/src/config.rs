//! Board constants: playfield geometry, analog calibration and timing.
//!
//! Everything here is fixed at build time. [`GameConfig`] bundles the parts a
//! different panel or sensor would change so they can be passed in instead of
//! baked into the game logic.

/// Playfield and sprite dimensions, in pixels.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Geometry {
    pub width: i16,
    pub height: i16,
    /// Grass strip on each side of the road.
    pub grass_width: i16,
    pub car_width: i16,
    pub car_length: i16,
    /// Tyres are square and stick out on both sides of the body.
    pub tyre: i16,
    /// Obstacles are `block × block` squares.
    pub block: i16,
    /// Added to the joystick Y mapping so the car sits above the bottom edge.
    pub vertical_offset: i16,
}

impl Geometry {
    /// 128×128 LCD of the educational BoosterPack.
    pub const BOOSTERPACK: Geometry = Geometry {
        width: 128,
        height: 128,
        grass_width: 15,
        car_width: 10,
        car_length: 22,
        tyre: 5,
        block: 10,
        vertical_offset: 30,
    };

    /// Leftmost body x: the left tyres touch the grass.
    pub fn lane_min_x(&self) -> i16 {
        self.grass_width + self.tyre
    }

    /// Rightmost body x: the right tyres touch the grass.
    pub fn lane_max_x(&self) -> i16 {
        self.width - self.grass_width - self.car_width - self.tyre
    }

    pub fn max_car_y(&self) -> i16 {
        self.height - self.car_length
    }

    pub fn block_min_x(&self) -> i16 {
        self.grass_width
    }

    pub fn block_max_x(&self) -> i16 {
        self.width - self.grass_width - self.block
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::BOOSTERPACK
    }
}

/// ADC ranges of the steering sensors.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Calibration {
    pub joystick_min: i32,
    pub joystick_max: i32,
    /// Accelerometer reading at full left / full forward tilt.
    pub tilt_low: i32,
    /// Accelerometer reading at full right / full backward tilt.
    pub tilt_high: i32,
}

impl Calibration {
    pub const BOOSTERPACK: Calibration = Calibration {
        joystick_min: 0,
        joystick_max: 4096,
        tilt_low: 1250,
        tilt_high: 2850,
    };
}

impl Default for Calibration {
    fn default() -> Self {
        Self::BOOSTERPACK
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct GameConfig {
    pub geometry: Geometry,
    pub calibration: Calibration,
}

/// Fixed pool capacity; difficulty presets choose how many slots are used.
pub const MAX_BLOCKS: usize = 7;

pub const FRAME_MILLIS: u64 = 100;
pub const MENU_POLL_MILLIS: u64 = 100;
pub const BUTTON_POLL_MILLIS: u64 = 20;
pub const SPEEDUP_PULSE_MILLIS: u64 = 100;

// Selection menus move the cursor when the stick leaves this band (percent)
pub const MENU_AXIS_UP: i32 = 80;
pub const MENU_AXIS_DOWN: i32 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boosterpack_lane_bounds() {
        let g = Geometry::BOOSTERPACK;
        assert_eq!(g.lane_min_x(), 20);
        assert_eq!(g.lane_max_x(), 98);
        assert_eq!(g.max_car_y(), 106);
        assert_eq!(g.block_min_x(), 15);
        assert_eq!(g.block_max_x(), 103);
    }
}
