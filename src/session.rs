//! The game session: owns every piece of mutable state and advances it one
//! tick at a time.
//!
//! All randomness comes through the `rng` argument of [`tick`] so callers
//! control determinism (tests use a seeded `StdRng`).

use log::info;
use rand::Rng;

use crate::audio::{SoundEvent, SoundQueue};
use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{Rect, Viewport};
use crate::player::{InputState, Player};
use crate::registry::{Registry, Spawn};
use crate::spawn::SpawnDirector;
use crate::state::{GameStatus, LevelState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

/// What a point-click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    None,
    Started,
    Restarted,
}

/// Per-tick summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bullets_fired: usize,
    pub enemies_escaped: u32,
    pub enemies_spawned: usize,
    pub collisions: CollisionReport,
}

// ── Menu & game-over widgets ──────────────────────────────────────────────────

pub fn start_button(viewport: Viewport) -> Rect {
    Rect::new(
        viewport.width / 2.0 - START_BUTTON_WIDTH / 2.0,
        viewport.height / 2.0,
        START_BUTTON_WIDTH,
        START_BUTTON_HEIGHT,
    )
}

/// Centre and radius of the circular restart icon.
pub fn restart_icon(viewport: Viewport) -> (f32, f32, f32) {
    (
        viewport.width / 2.0,
        viewport.height / 2.0 + RESTART_ICON_OFFSET_Y,
        RESTART_ICON_RADIUS,
    )
}

pub fn restart_icon_contains(viewport: Viewport, x: f32, y: f32) -> bool {
    let (cx, cy, r) = restart_icon(viewport);
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub screen: Screen,
    pub player: Player,
    pub level: LevelState,
    pub registry: Registry,
    pub director: SpawnDirector,
    pub sounds: SoundQueue,
    pub running: bool,
    pub frame: u64,
}

impl GameSession {
    /// A session sitting on the menu screen.
    pub fn new(config: GameConfig) -> Self {
        let viewport = Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
        };
        GameSession {
            viewport,
            screen: Screen::Menu,
            player: Player::new(viewport, config.max_lives, config.shoot_cooldown_ms),
            level: LevelState::new(config.max_level, config.level_transition_ms),
            registry: Registry::new(),
            director: SpawnDirector::new(config.enemy_spawn_interval),
            sounds: SoundQueue::default(),
            running: true,
            frame: 0,
            config,
        }
    }

    /// A session already past the menu.
    pub fn new_playing(config: GameConfig) -> Self {
        let mut session = Self::new(config);
        session.screen = Screen::Game;
        session
    }

    pub fn status(&self) -> GameStatus {
        self.level.status()
    }

    /// Leave the menu and begin play.
    pub fn start(&mut self) {
        if self.screen == Screen::Menu {
            info!("Game started");
            self.screen = Screen::Game;
            self.sounds.push(SoundEvent::MusicStart);
        }
    }

    /// Reinitialise everything to its starting values.
    pub fn restart(&mut self) {
        info!("Restarting at level 1");
        self.player = Player::new(
            self.viewport,
            self.config.max_lives,
            self.config.shoot_cooldown_ms,
        );
        self.level = LevelState::new(self.config.max_level, self.config.level_transition_ms);
        self.registry.clear();
        self.director = SpawnDirector::new(self.config.enemy_spawn_interval);
        self.sounds.clear();
        self.frame = 0;
        self.screen = Screen::Game;
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.running = false;
    }

    /// Hit-test a click in world coordinates against whatever widget the
    /// current screen shows.
    pub fn click(&mut self, x: f32, y: f32) -> ClickAction {
        match self.screen {
            Screen::Menu if start_button(self.viewport).contains_point(x, y) => {
                self.start();
                ClickAction::Started
            }
            Screen::Game
                if self.status() == GameStatus::GameOver
                    && restart_icon_contains(self.viewport, x, y) =>
            {
                self.restart();
                ClickAction::Restarted
            }
            _ => ClickAction::None,
        }
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        self.sounds.drain()
    }

    fn lose_lives(&mut self, count: u32) {
        if count > 0 && self.player.lose_lives(count) {
            self.level.mark_game_over();
        }
    }
}

/// Advance the simulation by one tick at time `now` (ms).
///
/// Order: player, entity updates, spawning, collisions, level transition.
/// Nothing happens on the menu or once the game is over or won.
pub fn tick(
    session: &mut GameSession,
    input: &InputState,
    now: u64,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();
    if session.screen != Screen::Game || session.level.is_terminal() {
        return report;
    }
    session.frame += 1;
    let viewport = session.viewport;

    // ── 1. Player ────────────────────────────────────────────────────────────
    session
        .player
        .handle_input(input, session.config.player_speed, viewport);
    if input.fire {
        let shots = session.player.try_fire(now, session.config.bullet_speed);
        if !shots.is_empty() {
            session.sounds.push(SoundEvent::Shot);
        }
        report.bullets_fired = shots.len();
        for bullet in shots {
            session.registry.spawn(Spawn::Bullet(bullet));
        }
    }
    session.player.sweep_expired_powers(now);
    session.registry.flush();

    // ── 2. Entities ──────────────────────────────────────────────────────────
    let updated = session.registry.update_all(now, viewport);
    report.enemies_escaped = updated.escaped_enemies;
    session.lose_lives(updated.escaped_enemies);
    if session.level.is_terminal() {
        return report;
    }

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    report.enemies_spawned = session.director.step(
        &mut session.registry,
        session.level.level,
        session.config.scroll_speed,
        viewport,
        now,
        rng,
    );
    session.registry.flush();

    // ── 4. Collisions & scoring ──────────────────────────────────────────────
    report.collisions = collision::resolve(
        &mut session.registry,
        &mut session.player,
        &mut session.level,
        &session.config,
        now,
        rng,
        &mut session.sounds,
    );
    session.registry.flush();

    // ── 5. Level transition ──────────────────────────────────────────────────
    if session.level.update_transition(now) {
        session.sounds.push(SoundEvent::Fanfare);
    }

    report
}
