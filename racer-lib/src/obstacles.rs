use smart_leds::RGB8;

use crate::{
    common::{Dot, Prng, Rect, OBSTACLE_COLORS},
    config::{Geometry, MAX_BLOCKS},
    log::trace,
    settings::DifficultyProfile,
};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Obstacle {
    pub pos: Dot,
    pub color: RGB8,
}

impl Obstacle {
    pub fn bounds(&self, geometry: &Geometry) -> Rect {
        Rect::new(self.pos.x, self.pos.y, geometry.block, geometry.block)
    }
}

pub fn random_lane_x(geometry: &Geometry, prng: &mut Prng) -> i16 {
    prng.between(geometry.block_min_x(), geometry.block_max_x())
}

/// Fixed set of falling blocks. Slots `0..active` are on the road; the rest
/// wait, already positioned, to be switched on by the spawner. Blocks are
/// never removed, only sent back to the top.
pub struct ObstaclePool {
    slots: [Obstacle; MAX_BLOCKS],
    limit: usize,
    active: usize,
}

impl ObstaclePool {
    pub fn new(limit: usize, geometry: &Geometry, prng: &mut Prng) -> Self {
        let limit = limit.min(MAX_BLOCKS);
        let mut slots = [Obstacle {
            pos: Dot::new(0, 0),
            color: OBSTACLE_COLORS[0],
        }; MAX_BLOCKS];
        for (idx, slot) in slots.iter_mut().enumerate() {
            slot.color = OBSTACLE_COLORS[idx % OBSTACLE_COLORS.len()];
            if idx < limit {
                slot.pos = Dot::new(random_lane_x(geometry, prng), 0);
            }
        }
        Self {
            slots,
            limit,
            active: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_spawn(&self) -> bool {
        self.active < self.limit
    }

    pub fn activate_next(&mut self) -> bool {
        if !self.can_spawn() {
            return false;
        }
        self.active += 1;
        true
    }

    pub fn get(&self, idx: usize) -> &Obstacle {
        &self.slots[idx]
    }

    pub fn active_slots(&self) -> &[Obstacle] {
        &self.slots[..self.active]
    }

    /// Move one block down and return its new state.
    pub fn advance(&mut self, idx: usize, velocity: i16) -> Obstacle {
        let slot = &mut self.slots[idx];
        slot.pos.y = slot.pos.y.saturating_add(velocity);
        *slot
    }

    pub fn recycle(&mut self, idx: usize, geometry: &Geometry, prng: &mut Prng) {
        let slot = &mut self.slots[idx];
        slot.pos = Dot::new(random_lane_x(geometry, prng), 0);
        trace!("block {} recycled at x={}", idx, slot.pos.x);
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, idx: usize, pos: Dot) {
        self.slots[idx].pos = pos;
    }
}

/// Gate for switching on pool slots: one random roll every
/// `spawn_wait_ticks` ticks while free slots remain.
#[derive(Default)]
pub struct Spawner {
    pub(crate) timer: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self { timer: 0 }
    }

    pub fn tick(
        &mut self,
        pool: &mut ObstaclePool,
        profile: &DifficultyProfile,
        prng: &mut Prng,
    ) -> bool {
        let mut spawned = false;
        if pool.can_spawn() && self.timer % profile.spawn_wait_ticks.max(1) == 0 {
            if prng.next_range(100) > profile.spawn_threshold {
                pool.activate_next();
                self.timer = 0;
                spawned = true;
                trace!("block spawned, {} on road", pool.active());
            }
        }
        self.timer = self.timer.wrapping_add(1);
        spawned
    }
}

/// Block against the car, tyres included on both sides.
pub fn collides(obstacle: &Obstacle, hitbox: &Rect, geometry: &Geometry) -> bool {
    obstacle.bounds(geometry).touches(hitbox)
}
