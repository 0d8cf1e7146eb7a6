//! The player ship: movement, firing, buffs, and the invulnerability window.

use log::debug;

use crate::constants::*;
use crate::entities::{Bullet, PowerKind, Rect, Viewport};
use crate::powers::PowerLedger;

/// Current key/button state, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub alive: bool,
    pub lives: u32,
    pub powers: PowerLedger,
    pub invulnerable_until: u64,
    pub last_shot_time: u64,
    pub shoot_cooldown_ms: u64,
    /// Set while "up" is held; drawn as an engine flame.
    pub thrusting: bool,
}

impl Player {
    /// A fresh ship, bottom-centre anchored just above the viewport bottom.
    pub fn new(viewport: Viewport, lives: u32, shoot_cooldown_ms: u64) -> Self {
        Player {
            rect: Rect::from_midbottom(
                viewport.width / 2.0,
                viewport.height - PLAYER_BOTTOM_MARGIN,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            alive: true,
            lives,
            powers: PowerLedger::new(),
            invulnerable_until: 0,
            last_shot_time: 0,
            shoot_cooldown_ms,
            thrusting: false,
        }
    }

    /// Muzzle point: horizontal centre of the top edge.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.rect.x + self.rect.w / 2.0, self.rect.y)
    }

    /// Translate by `speed` along each held direction, then clamp into the
    /// lower half of the viewport.
    pub fn handle_input(&mut self, input: &InputState, speed: f32, viewport: Viewport) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.left {
            dx -= speed;
        }
        if input.right {
            dx += speed;
        }
        if input.up {
            dy -= speed;
        }
        if input.down {
            dy += speed;
        }
        self.thrusting = input.up;

        let max_x = (viewport.width - self.rect.w).max(0.0);
        let min_y = viewport.height / 2.0;
        let max_y = (viewport.height - self.rect.h).max(min_y);
        self.rect.x = (self.rect.x + dx).clamp(0.0, max_x);
        self.rect.y = (self.rect.y + dy).clamp(min_y, max_y);
    }

    pub fn effective_cooldown(&self, now: u64) -> u64 {
        if self.powers.is_active(PowerKind::FastFire, now) {
            (self.shoot_cooldown_ms * FAST_FIRE_PERCENT / 100).max(MIN_COOLDOWN_MS)
        } else {
            self.shoot_cooldown_ms
        }
    }

    pub fn can_fire(&self, now: u64) -> bool {
        now.saturating_sub(self.last_shot_time) >= self.effective_cooldown(now)
    }

    /// Fire if the cooldown has elapsed.  Returns the new bullets (none when
    /// the request is rejected).
    pub fn try_fire(&mut self, now: u64, bullet_speed: f32) -> Vec<Bullet> {
        if !self.can_fire(now) {
            return Vec::new();
        }
        self.last_shot_time = now;

        let (cx, top) = self.muzzle();
        if self.powers.is_active(PowerKind::MultiShot, now) {
            MULTI_SHOT_OFFSETS
                .iter()
                .map(|off| Bullet::fired_from(cx + off, top, bullet_speed))
                .collect()
        } else {
            vec![Bullet::fired_from(cx, top, bullet_speed)]
        }
    }

    pub fn sweep_expired_powers(&mut self, now: u64) {
        for power in self.powers.sweep(now) {
            debug!("Power {} expired at {}", power.name(), now);
        }
    }

    pub fn is_invulnerable(&self, now: u64) -> bool {
        now < self.invulnerable_until
    }

    pub fn grant_invulnerability(&mut self, now: u64, duration_ms: u64) {
        self.invulnerable_until = now + duration_ms;
    }

    /// Deduct `count` lives, saturating at zero.  Returns `true` once the
    /// ship is out of lives.
    pub fn lose_lives(&mut self, count: u32) -> bool {
        self.lives = self.lives.saturating_sub(count);
        if self.lives == 0 {
            self.alive = false;
        }
        !self.alive
    }

    pub fn gain_life(&mut self, max_lives: u32) {
        self.lives = (self.lives + 1).min(max_lives);
        self.alive = self.lives > 0;
    }

    /// Opacity for the current frame: flickers while invulnerable.
    pub fn opacity(&self, now: u64) -> u8 {
        if self.is_invulnerable(now) && (now / FLICKER_PERIOD_MS) % 2 == 0 {
            FLICKER_ALPHA
        } else {
            255
        }
    }
}
