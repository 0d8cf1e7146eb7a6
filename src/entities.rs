//! Simulated objects: geometry, kinds, and each entity's per-tick rule.
//!
//! Positions are world units (the viewport is 640×800 by default) with the
//! origin at the top-left and `y` growing downward.

use rand::Rng;

use crate::constants::*;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Anchor the rectangle by the middle of its bottom edge.
    pub fn from_midbottom(cx: f32, bottom: f32, w: f32, h: f32) -> Self {
        Rect::new(cx - w / 2.0, bottom - h, w, h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

// ── Per-tick contract ─────────────────────────────────────────────────────────

/// What an entity asks of its registry after updating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Ran out of time or left the viewport harmlessly.
    Expired,
    /// Crossed the bottom edge; costs the player a life.
    Escaped,
}

pub trait Entity {
    fn rect(&self) -> Rect;

    fn update(&mut self, now: u64, viewport: Viewport) -> Fate;
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Straight,
    Zigzag,
    Fast,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Straight, EnemyKind::Zigzag, EnemyKind::Fast];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn vertical_speed(self, scroll_speed: f32) -> f32 {
        match self {
            EnemyKind::Fast => scroll_speed + FAST_ENEMY_BONUS_SPEED,
            EnemyKind::Straight | EnemyKind::Zigzag => scroll_speed,
        }
    }
}

/// Displacement applied to an enemy of `kind` on a tick `elapsed_ms` after it
/// spawned.
pub fn motion_delta(kind: EnemyKind, elapsed_ms: u64, scroll_speed: f32) -> (f32, f32) {
    let dx = match kind {
        EnemyKind::Zigzag => {
            let t = elapsed_ms as f32 / ZIGZAG_PERIOD_MS;
            (t.sin() * ZIGZAG_AMPLITUDE).round()
        }
        EnemyKind::Straight | EnemyKind::Fast => 0.0,
    };
    (dx, kind.vertical_speed(scroll_speed))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    /// Scroll speed in effect when the enemy spawned.
    pub base_speed: f32,
    pub spawn_time: u64,
    pub hp: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind, base_speed: f32, now: u64) -> Self {
        Enemy {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            kind,
            base_speed,
            spawn_time: now,
            hp: 1,
        }
    }
}

impl Entity for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, now: u64, viewport: Viewport) -> Fate {
        let elapsed = now.saturating_sub(self.spawn_time);
        let (dx, dy) = motion_delta(self.kind, elapsed, self.base_speed);
        self.rect.x += dx;
        self.rect.y += dy;
        if self.rect.y > viewport.height {
            Fate::Escaped
        } else {
            Fate::Alive
        }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical velocity per tick (negative = upward).
    pub vy: f32,
}

impl Bullet {
    /// A bullet whose bottom-centre sits on the muzzle point.
    pub fn fired_from(cx: f32, top: f32, vy: f32) -> Self {
        Bullet {
            rect: Rect::from_midbottom(cx, top, BULLET_WIDTH, BULLET_HEIGHT),
            vy,
        }
    }
}

impl Entity for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _now: u64, _viewport: Viewport) -> Fate {
        self.rect.y += self.vy;
        if self.rect.bottom() < 0.0 {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

/// Timed buffs held in the player's power ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PowerKind {
    FastFire,
    MultiShot,
}

impl PowerKind {
    pub fn name(self) -> &'static str {
        match self {
            PowerKind::FastFire => "fast_fire",
            PowerKind::MultiShot => "multi_shot",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerKind::FastFire => "FastFire",
            PowerKind::MultiShot => "MultiShot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Health,
    FastFire,
    MultiShot,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Health, ItemKind::FastFire, ItemKind::MultiShot];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// The buff granted on pickup, if this item is a power-up.
    pub fn power(self) -> Option<PowerKind> {
        match self {
            ItemKind::Health => None,
            ItemKind::FastFire => Some(PowerKind::FastFire),
            ItemKind::MultiShot => Some(PowerKind::MultiShot),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub rect: Rect,
    pub kind: ItemKind,
    pub vy: f32,
    pub spawn_time: u64,
    pub lifetime_ms: u64,
}

impl Item {
    pub fn new(cx: f32, cy: f32, kind: ItemKind, now: u64, lifetime_ms: u64) -> Self {
        Item {
            rect: Rect::from_center(cx, cy, ITEM_SIZE, ITEM_SIZE),
            kind,
            vy: ITEM_DRIFT_SPEED,
            spawn_time: now,
            lifetime_ms,
        }
    }
}

impl Entity for Item {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, now: u64, viewport: Viewport) -> Fate {
        self.rect.y += self.vy;
        let aged_out = now.saturating_sub(self.spawn_time) > self.lifetime_ms;
        let left_view = self.rect.y > viewport.height + ITEM_EXIT_MARGIN;
        if aged_out || left_view {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks to display.
    pub timer: u32,
}

impl Explosion {
    pub fn at(cx: f32, cy: f32) -> Self {
        Explosion {
            rect: Rect::from_center(cx, cy, EXPLOSION_SIZE, EXPLOSION_SIZE),
            timer: EXPLOSION_TICKS,
        }
    }
}

impl Entity for Explosion {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _now: u64, _viewport: Viewport) -> Fate {
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}
