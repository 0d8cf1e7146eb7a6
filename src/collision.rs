//! The per-tick collision & scoring pass.
//!
//! Runs in a fixed order: bullets against enemies, enemies against the
//! player, then item pickups.  Spawns it causes (explosions, dropped items)
//! are queued on the registry and appear after the session flushes it.

use log::{debug, info};
use rand::Rng;

use crate::audio::{SoundEvent, SoundQueue};
use crate::config::GameConfig;
use crate::entities::{Entity, Explosion, Item, ItemKind};
use crate::player::Player;
use crate::registry::{overlapping_pairs, Group, Registry, Spawn};
use crate::state::{KillOutcome, LevelState};

/// Summary of one pass, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub enemies_rammed: u32,
    pub items_collected: u32,
}

/// Every enemy touched by a live bullet dies along with the bullets touching
/// it.  A bullet spent on one enemy cannot also hit another.
pub fn bullets_vs_enemies(
    registry: &mut Registry,
    level: &mut LevelState,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
    sounds: &mut SoundQueue,
) -> u32 {
    let mut dead_enemies = vec![false; registry.enemies.len()];
    let mut spent_bullets = vec![false; registry.bullets.len()];

    for (ei, bi) in overlapping_pairs(&registry.enemies, &registry.bullets) {
        if spent_bullets[bi] {
            continue;
        }
        spent_bullets[bi] = true;
        dead_enemies[ei] = true;
    }

    let mut kills = 0;
    for (ei, _) in dead_enemies.iter().enumerate().filter(|&(_, &dead)| dead) {
        let (cx, cy) = registry.enemies[ei].rect().center();
        sounds.push(SoundEvent::EnemyDestroyed);
        registry.spawn(Spawn::Explosion(Explosion::at(cx, cy)));
        kills += 1;

        if rng.gen_bool(config.item_drop_chance) {
            let kind = ItemKind::random(rng);
            debug!("Enemy dropped {:?} at ({cx}, {cy})", kind);
            registry.spawn(Spawn::Item(Item::new(cx, cy, kind, now, config.item_lifetime_ms)));
        }

        match level.record_kill(now) {
            KillOutcome::Counted => {}
            KillOutcome::LevelUp(n) => debug!("Kill at {now} advanced to level {n}"),
            KillOutcome::Won => sounds.push(SoundEvent::Fanfare),
        }
    }

    registry.remove_marked(Group::Enemies, &dead_enemies);
    registry.remove_marked(Group::Bullets, &spent_bullets);
    kills
}

/// Ramming: each enemy overlapping the ship is destroyed and costs a life.
/// Ignored entirely while the ship is invulnerable.
pub fn player_vs_enemies(
    registry: &mut Registry,
    player: &mut Player,
    level: &mut LevelState,
    config: &GameConfig,
    now: u64,
) -> u32 {
    if player.is_invulnerable(now) {
        return 0;
    }
    let hull = player.rect;
    let marks: Vec<bool> = registry
        .enemies
        .iter()
        .map(|e| e.rect().intersects(&hull))
        .collect();
    let hits = registry.remove_marked(Group::Enemies, &marks) as u32;
    if hits == 0 {
        return 0;
    }

    player.grant_invulnerability(now, config.invulnerability_ms);
    let depleted = player.lose_lives(hits);
    info!("Player rammed by {} enemies; {} lives left", hits, player.lives);
    if depleted {
        level.mark_game_over();
    }
    hits
}

/// Pick up every item overlapping the ship.
pub fn player_vs_items(
    registry: &mut Registry,
    player: &mut Player,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
    sounds: &mut SoundQueue,
) -> u32 {
    let hull = player.rect;
    let marks: Vec<bool> = registry
        .items
        .iter()
        .map(|i| i.rect().intersects(&hull))
        .collect();

    let mut collected = 0;
    for (item, _) in registry.items.iter().zip(&marks).filter(|&(_, &hit)| hit) {
        sounds.push(SoundEvent::ItemPickup);
        collected += 1;
        match item.kind.power() {
            None => player.gain_life(config.max_lives),
            Some(power) => {
                let duration =
                    rng.gen_range(config.power_duration_min_ms..=config.power_duration_max_ms);
                player.powers.grant(power, now + duration);
                debug!("Picked up {} for {} ms", power.name(), duration);
            }
        }
    }

    registry.remove_marked(Group::Items, &marks);
    collected
}

/// Run the full pass in order.  A stage that ends the game skips the rest,
/// so a lost game cannot also be won and a won game cannot be lost.
pub fn resolve(
    registry: &mut Registry,
    player: &mut Player,
    level: &mut LevelState,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
    sounds: &mut SoundQueue,
) -> CollisionReport {
    let mut report = CollisionReport {
        enemies_shot: bullets_vs_enemies(registry, level, config, now, rng, sounds),
        ..CollisionReport::default()
    };
    if level.is_terminal() {
        return report;
    }
    report.enemies_rammed = player_vs_enemies(registry, player, level, config, now);
    if level.is_terminal() {
        return report;
    }
    report.items_collected = player_vs_items(registry, player, config, now, rng, sounds);
    report
}
