//! Distance-driven enemy spawning.
//!
//! There is no spawn timer: the director tracks how far the world has
//! scrolled and releases a wave every `interval` world units.

use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::entities::{Enemy, EnemyKind, Viewport};
use crate::registry::{Registry, Spawn};

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnDirector {
    pub world_distance: f32,
    pub last_spawn_distance: f32,
    /// Background scroll offset, advanced in step with the world.
    pub background_offset: f32,
    pub interval: f32,
}

/// Enemies released per wave.
pub fn wave_size(level: u32) -> usize {
    if level < 3 {
        1
    } else {
        2
    }
}

impl SpawnDirector {
    pub fn new(interval: f32) -> Self {
        SpawnDirector {
            world_distance: 0.0,
            last_spawn_distance: 0.0,
            background_offset: 0.0,
            interval,
        }
    }

    pub fn advance(&mut self, scroll_speed: f32) {
        self.world_distance += scroll_speed;
        self.background_offset += scroll_speed;
    }

    pub fn wave_due(&self) -> bool {
        self.world_distance - self.last_spawn_distance > self.interval
    }

    /// Scroll one tick and, if a wave is due, queue it into `registry`.
    /// Returns the number of enemies queued.
    pub fn step(
        &mut self,
        registry: &mut Registry,
        level: u32,
        scroll_speed: f32,
        viewport: Viewport,
        now: u64,
        rng: &mut impl Rng,
    ) -> usize {
        self.advance(scroll_speed);
        if !self.wave_due() {
            return 0;
        }
        self.last_spawn_distance = self.world_distance;

        let count = wave_size(level);
        let x_max = (viewport.width as i32 - ENEMY_SPAWN_X_MARGIN).max(ENEMY_SPAWN_X_MIN);
        for _ in 0..count {
            let x = rng.gen_range(ENEMY_SPAWN_X_MIN..=x_max);
            let y = rng.gen_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX);
            let kind = EnemyKind::random(rng);
            registry.spawn(Spawn::Enemy(Enemy::new(x as f32, y as f32, kind, scroll_speed, now)));
        }
        debug!(
            "Wave of {} at distance {} (level {})",
            count, self.world_distance, level
        );
        count
    }

    /// Offsets of the two background tiles that together cover the viewport.
    pub fn background_tiles(&self, height: f32) -> [f32; 2] {
        let first = self.background_offset.rem_euclid(height);
        [first, first - height]
    }
}
