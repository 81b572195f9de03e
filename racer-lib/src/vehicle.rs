use smart_leds::RGB8;

use crate::{
    common::{map_range, Axes, Dot, Rect, Screen, BLACK, GREY},
    config::{Calibration, Geometry},
};

/// Raw joystick sample to an unclamped body position. Pushing the stick up
/// moves the car up; the vertical offset keeps it near the bottom at rest.
pub fn joystick_target(axes: Axes, geometry: &Geometry, calibration: &Calibration) -> (i32, i32) {
    let x = map_range(
        axes.x as i32,
        calibration.joystick_min,
        calibration.joystick_max,
        0,
        geometry.width as i32,
    );
    let y = map_range(
        axes.y as i32,
        calibration.joystick_min,
        calibration.joystick_max,
        geometry.height as i32,
        0,
    ) + geometry.vertical_offset as i32;
    (x, y)
}

/// Raw accelerometer sample to an unclamped body position.
pub fn tilt_target(axes: Axes, geometry: &Geometry, calibration: &Calibration) -> (i32, i32) {
    let x = map_range(
        axes.x as i32,
        calibration.tilt_low,
        calibration.tilt_high,
        0,
        geometry.width as i32,
    );
    let y = map_range(
        axes.y as i32,
        calibration.tilt_high,
        calibration.tilt_low,
        0,
        geometry.height as i32,
    );
    (x, y)
}

/// Keep the body, tyres included, on the road and fully on screen.
pub fn clamp_to_lane(x: i32, y: i32, geometry: &Geometry) -> Dot {
    let x = x.clamp(geometry.lane_min_x() as i32, geometry.lane_max_x() as i32);
    let y = y.clamp(0, geometry.max_car_y() as i32);
    Dot::new(x as i16, y as i16)
}

pub struct Vehicle {
    pos: Dot,
    drawn: Option<Dot>,
    color: RGB8,
}

impl Vehicle {
    pub fn new(color: RGB8, geometry: &Geometry) -> Self {
        let start = clamp_to_lane(
            (geometry.width / 2) as i32,
            (geometry.height - geometry.vertical_offset) as i32,
            geometry,
        );
        Self {
            pos: start,
            drawn: None,
            color,
        }
    }

    pub fn pos(&self) -> Dot {
        self.pos
    }

    pub fn drawn(&self) -> Option<Dot> {
        self.drawn
    }

    pub fn steer(&mut self, x: i32, y: i32, geometry: &Geometry) {
        self.pos = clamp_to_lane(x, y, geometry);
    }

    pub fn moved(&self) -> bool {
        self.drawn != Some(self.pos)
    }

    /// Erase the sprite where it was last drawn and paint it at the current
    /// position. Only the five rectangles of the old sprite are touched.
    pub fn redraw<S: Screen>(&mut self, screen: &mut S, geometry: &Geometry) {
        if let Some(old) = self.drawn {
            paint(screen, old, BLACK, BLACK, geometry);
        }
        paint(screen, self.pos, self.color, GREY, geometry);
        self.drawn = Some(self.pos);
    }

    /// Body plus the tyres sticking out on both sides, over the full length.
    pub fn hitbox(&self, geometry: &Geometry) -> Rect {
        let at = self.drawn.unwrap_or(self.pos);
        Rect::new(
            at.x - geometry.tyre,
            at.y,
            geometry.car_width + 2 * geometry.tyre,
            geometry.car_length,
        )
    }
}

fn paint<S: Screen>(screen: &mut S, at: Dot, body: RGB8, tyres: RGB8, g: &Geometry) {
    let rear = at.y + g.car_length - g.tyre;
    screen.fill_rect(Rect::new(at.x, at.y, g.car_width, g.car_length), body);
    for (x, y) in [
        (at.x - g.tyre, at.y),
        (at.x - g.tyre, rear),
        (at.x + g.car_width, at.y),
        (at.x + g.car_width, rear),
    ] {
        screen.fill_rect(Rect::new(x, y, g.tyre, g.tyre), tyres);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::RED,
        testing::{DrawOp, RecordingScreen},
    };

    const G: Geometry = Geometry::BOOSTERPACK;
    const C: Calibration = Calibration::BOOSTERPACK;

    #[test]
    fn joystick_center_maps_to_middle() {
        assert_eq!(joystick_target(Axes::new(2048, 2048), &G, &C), (64, 94));
        assert_eq!(joystick_target(Axes::new(0, 4096), &G, &C), (0, 30));
    }

    #[test]
    fn tilt_maps_calibrated_range() {
        assert_eq!(tilt_target(Axes::new(1250, 2850), &G, &C), (0, 0));
        assert_eq!(tilt_target(Axes::new(2850, 1250), &G, &C), (128, 128));
        assert_eq!(tilt_target(Axes::new(2050, 2050), &G, &C), (64, 64));
    }

    #[test]
    fn clamp_holds_for_any_input() {
        for x in [-5000, -1, 0, 19, 20, 64, 98, 99, 128, 5000] {
            for y in [-5000, -1, 0, 50, 106, 107, 158, 5000] {
                let p = clamp_to_lane(x, y, &G);
                assert!((G.lane_min_x()..=G.lane_max_x()).contains(&p.x));
                assert!((0..=G.max_car_y()).contains(&p.y));
            }
        }
    }

    #[test]
    fn pushing_past_left_bound_stays_on_bound() {
        let mut car = Vehicle::new(RED, &G);
        car.steer(G.lane_min_x() as i32, 50, &G);
        let mut screen = RecordingScreen::new();
        car.redraw(&mut screen, &G);

        let (x, _) = joystick_target(Axes::new(0, 2048), &G, &C);
        car.steer(x - 40, 50, &G);
        assert_eq!(car.pos().x, G.lane_min_x());
        assert!(!car.moved());

        // leftmost pixel ever painted is the tyre touching the grass
        for op in screen.ops() {
            if let DrawOp::Rect(r, _) = op {
                assert!(r.x >= G.grass_width);
                assert!(r.x + r.width <= G.width - G.grass_width);
            }
        }
    }

    #[test]
    fn redraw_erases_previous_sprite() {
        let mut car = Vehicle::new(RED, &G);
        let mut screen = RecordingScreen::new();
        car.redraw(&mut screen, &G);
        assert_eq!(screen.rects().len(), 5);

        car.steer(40, 60, &G);
        assert!(car.moved());
        screen.reset();
        car.redraw(&mut screen, &G);
        let rects = screen.rects();
        assert_eq!(rects.len(), 10);
        assert!(rects[..5].iter().all(|(_, c)| *c == BLACK));
        assert_eq!(rects[5], (Rect::new(40, 60, 10, 22), RED));
        assert!(rects[6..].iter().all(|(_, c)| *c == GREY));
        assert!(!car.moved());
    }

    #[test]
    fn hitbox_includes_tyres() {
        let mut car = Vehicle::new(RED, &G);
        car.steer(50, 80, &G);
        let mut screen = RecordingScreen::new();
        car.redraw(&mut screen, &G);
        assert_eq!(car.hitbox(&G), Rect::new(45, 80, 20, 22));
    }
}
