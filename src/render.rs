//! The render pass: decides what to draw this tick and in which order, and
//! hands the result to a drawing backend as a plain draw list.

use crate::entities::{EnemyKind, Entity, ItemKind, PowerKind, Rect};
use crate::session::{restart_icon, start_button, GameSession, Screen};
use crate::state::GameStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player { thrusting: bool },
    Enemy(EnemyKind),
    Bullet,
    Item(ItemKind),
    Explosion,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub opacity: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub level: u32,
    pub lives: u32,
    pub enemies_destroyed: u32,
    pub enemies_required: u32,
    /// Whole seconds left on each active power.
    pub powers: Vec<(PowerKind, u64)>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    Menu { start_button: Rect },
    LevelBanner { level: u32, opacity: u8 },
    GameOver { restart_center: (f32, f32), restart_radius: f32 },
    Win,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Vertical offsets of the two wrapping background tiles.
    pub background: [f32; 2],
    /// Back to front.
    pub sprites: Vec<Sprite>,
    pub hud: Option<Hud>,
    pub overlay: Option<Overlay>,
}

fn sprite(kind: SpriteKind, entity: &impl Entity) -> Sprite {
    Sprite {
        kind,
        rect: entity.rect(),
        opacity: 255,
    }
}

/// Build the draw list for the session at time `now`.
pub fn build_frame(session: &GameSession, now: u64) -> Frame {
    let background = session.director.background_tiles(session.viewport.height);

    if session.screen == Screen::Menu {
        return Frame {
            background,
            sprites: Vec::new(),
            hud: None,
            overlay: Some(Overlay::Menu {
                start_button: start_button(session.viewport),
            }),
        };
    }

    let status = session.status();
    let overlay = match status {
        GameStatus::GameWin => Some(Overlay::Win),
        GameStatus::GameOver => {
            let (cx, cy, r) = restart_icon(session.viewport);
            Some(Overlay::GameOver {
                restart_center: (cx, cy),
                restart_radius: r,
            })
        }
        GameStatus::LevelTransition => {
            session
                .level
                .transition_opacity(now)
                .map(|opacity| Overlay::LevelBanner {
                    level: session.level.level,
                    opacity,
                })
        }
        GameStatus::Playing => None,
    };

    // The finished screens show only the background and their message.
    if matches!(status, GameStatus::GameOver | GameStatus::GameWin) {
        return Frame {
            background,
            sprites: Vec::new(),
            hud: None,
            overlay,
        };
    }

    let reg = &session.registry;
    let mut sprites = Vec::with_capacity(reg.total() + 1);
    sprites.extend(reg.enemies.iter().map(|e| sprite(SpriteKind::Enemy(e.kind), e)));
    sprites.extend(reg.explosions.iter().map(|x| sprite(SpriteKind::Explosion, x)));
    sprites.push(Sprite {
        kind: SpriteKind::Player {
            thrusting: session.player.thrusting,
        },
        rect: session.player.rect,
        opacity: session.player.opacity(now),
    });
    sprites.extend(reg.items.iter().map(|i| sprite(SpriteKind::Item(i.kind), i)));
    sprites.extend(reg.bullets.iter().map(|b| sprite(SpriteKind::Bullet, b)));

    let hud = Hud {
        level: session.level.level,
        lives: session.player.lives,
        enemies_destroyed: session.level.enemies_destroyed,
        enemies_required: session.level.enemies_required,
        powers: session.player.powers.remaining_seconds(now),
    };

    Frame {
        background,
        sprites,
        hud: Some(hud),
        overlay,
    }
}
