use crate::{
    common::{Board, Buzzer, Controls, Prng, Rect, Screen, StatusLed, Timer, BLACK},
    config::{Calibration, GameConfig, Geometry, FRAME_MILLIS},
    log::{debug, info},
    obstacles::{collides, ObstaclePool, Spawner},
    screens,
    settings::{ControlMode, DifficultyProfile, Settings},
    vehicle::{joystick_target, tilt_target, Vehicle},
};

/// Score and speed of one race.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    pub score: u16,
    /// Points collected since the last speedup.
    pub tmp_score: u16,
    pub velocity: u16,
    pub collided: bool,
}

impl GameState {
    pub fn new(initial_velocity: u16) -> Self {
        Self {
            score: 0,
            tmp_score: 0,
            velocity: initial_velocity,
            collided: false,
        }
    }

    /// Count one block leaving the road. Returns true when this point
    /// triggers a speedup: the threshold grows with the current velocity and
    /// is matched exactly.
    pub fn register_recycle(&mut self, points_per_speedup: u16) -> bool {
        self.score = self.score.saturating_add(1);
        self.tmp_score = self.tmp_score.saturating_add(1);
        if self.tmp_score == points_per_speedup + self.velocity {
            self.velocity += 1;
            self.tmp_score = 0;
            return true;
        }
        false
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum TickOutcome {
    Running,
    /// S2 was pressed: start over with the same settings.
    Restart,
    Crashed,
}

/// A race in progress: car, blocks and score. Created fresh on every
/// (re)start.
pub struct Race {
    pub(crate) state: GameState,
    pub(crate) vehicle: Vehicle,
    pub(crate) pool: ObstaclePool,
    pub(crate) spawner: Spawner,
    pub(crate) profile: DifficultyProfile,
    pub(crate) mode: ControlMode,
    geometry: Geometry,
    calibration: Calibration,
}

impl Race {
    pub fn new(settings: &Settings, config: &GameConfig, prng: &mut Prng) -> Self {
        let geometry = config.geometry;
        let profile = settings.difficulty;
        Self {
            state: GameState::new(profile.initial_velocity),
            vehicle: Vehicle::new(settings.car_color, &geometry),
            pool: ObstaclePool::new(profile.max_obstacles, &geometry, prng),
            spawner: Spawner::new(),
            profile,
            mode: settings.mode,
            geometry,
            calibration: config.calibration,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// One frame of the race. Blocks for the frame interval unless the
    /// frame is cut short by a restart or a crash.
    pub async fn tick<S, C, B, L, T>(
        &mut self,
        board: &mut Board<'_, S, C, B, L, T>,
        prng: &mut Prng,
    ) -> TickOutcome
    where
        S: Screen,
        C: Controls,
        B: Buzzer,
        L: StatusLed,
        T: Timer,
    {
        if self.state.collided {
            return TickOutcome::Crashed;
        }
        let g = self.geometry;

        if board.controls.s1_was_pressed() {
            self.mode = self.mode.toggled();
            info!("drive mode switched to {:?}", self.mode);
        }
        if board.controls.s2_was_pressed() {
            info!("race restarted at score {}", self.state.score);
            return TickOutcome::Restart;
        }

        let (x, y) = match self.mode {
            ControlMode::Joystick => {
                let axes = board.controls.read_joystick().await;
                joystick_target(axes, &g, &self.calibration)
            }
            ControlMode::Accelerometer => {
                let axes = board.controls.read_tilt().await;
                tilt_target(axes, &g, &self.calibration)
            }
        };
        self.vehicle.steer(x, y, &g);
        if self.vehicle.moved() {
            self.vehicle.redraw(board.screen, &g);
        }

        self.spawner.tick(&mut self.pool, &self.profile, prng);

        for idx in 0..self.pool.active() {
            let velocity = self.state.velocity as i16;
            let block = self.pool.advance(idx, velocity);
            // only the band the block just left needs clearing
            board.screen.fill_rect(
                Rect::new(block.pos.x, block.pos.y - velocity, g.block, velocity),
                BLACK,
            );
            board.screen.fill_rect(block.bounds(&g), block.color);

            if block.pos.y >= g.height {
                self.pool.recycle(idx, &g, prng);
                if self.state.register_recycle(self.profile.points_per_speedup) {
                    debug!("speedup, velocity now {}", self.state.velocity);
                    board.pulse().await;
                }
            }

            if collides(self.pool.get(idx), &self.vehicle.hitbox(&g), &g) {
                self.state.collided = true;
                info!("crashed into block {} at score {}", idx, self.state.score);
                return TickOutcome::Crashed;
            }
        }

        screens::draw_score(board.screen, self.state.score, &g);
        board.pause(FRAME_MILLIS).await;
        TickOutcome::Running
    }
}
