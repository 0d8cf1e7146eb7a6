//! Compile-time defaults.  `GameConfig::default()` mirrors these, and the
//! sprite geometry below is fixed regardless of configuration.

// ── World ─────────────────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: f32 = 640.0;
pub const VIEWPORT_HEIGHT: f32 = 800.0;
pub const FPS: u32 = 60;

pub const SCROLL_SPEED: f32 = 2.0;
pub const ENEMY_SPAWN_INTERVAL: f32 = 150.0; // world units, not ms

// ── Progression ───────────────────────────────────────────────────────────────

pub const MAX_LEVEL: u32 = 5;
pub const MAX_LIVES: u32 = 5;
pub const LEVEL_TRANSITION_MS: u64 = 2000;

/// Kill quota for a level: 5 + level × 3.
pub const fn enemies_required(level: u32) -> u32 {
    5 + level * 3
}

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 100.0;
pub const PLAYER_HEIGHT: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Distance between the ship's bottom edge and the viewport bottom at spawn.
pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;
pub const SHOOT_COOLDOWN_MS: u64 = 180;
/// Fast-fire cooldown as a percentage of the base cooldown.
pub const FAST_FIRE_PERCENT: u64 = 60;
pub const MIN_COOLDOWN_MS: u64 = 20;
pub const MULTI_SHOT_OFFSETS: [f32; 3] = [-28.0, 0.0, 28.0];
pub const INVULNERABILITY_MS: u64 = 1200;
pub const FLICKER_PERIOD_MS: u64 = 100;
pub const FLICKER_ALPHA: u8 = 120;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 50.0;
pub const FAST_ENEMY_BONUS_SPEED: f32 = 2.0;
pub const ZIGZAG_PERIOD_MS: f32 = 200.0;
pub const ZIGZAG_AMPLITUDE: f32 = 2.0;
pub const ENEMY_SPAWN_X_MIN: i32 = 20;
/// Right edge of the spawn band, measured from the viewport's right side.
pub const ENEMY_SPAWN_X_MARGIN: i32 = 70;
pub const ENEMY_SPAWN_Y_MIN: i32 = -300;
pub const ENEMY_SPAWN_Y_MAX: i32 = -30;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 12.0;
pub const BULLET_HEIGHT: f32 = 28.0;
pub const BULLET_SPEED: f32 = -10.0;

// ── Items & powers ────────────────────────────────────────────────────────────

pub const ITEM_SIZE: f32 = 32.0;
pub const ITEM_DRIFT_SPEED: f32 = 2.4;
pub const ITEM_LIFETIME_MS: u64 = 10_000;
/// Items are culled once their top passes this far below the viewport.
pub const ITEM_EXIT_MARGIN: f32 = 20.0;
pub const ITEM_DROP_CHANCE: f64 = 0.30;
pub const POWER_DURATION_MIN_MS: u64 = 8000;
pub const POWER_DURATION_MAX_MS: u64 = 10_000;

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: f32 = 50.0;
pub const EXPLOSION_TICKS: u32 = 12;

// ── Menu & game-over widgets ──────────────────────────────────────────────────

pub const START_BUTTON_WIDTH: f32 = 150.0;
pub const START_BUTTON_HEIGHT: f32 = 50.0;
pub const RESTART_ICON_RADIUS: f32 = 25.0;
/// Vertical offset of the restart icon below the viewport centre.
pub const RESTART_ICON_OFFSET_Y: f32 = 60.0;
