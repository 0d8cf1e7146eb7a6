use scroll_shooter::audio::{SoundEvent, SoundQueue};
use scroll_shooter::collision::*;
use scroll_shooter::config::GameConfig;
use scroll_shooter::constants::*;
use scroll_shooter::entities::*;
use scroll_shooter::player::Player;
use scroll_shooter::registry::Registry;
use scroll_shooter::state::{GameStatus, LevelState};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(drop_chance: f64) -> GameConfig {
    GameConfig {
        item_drop_chance: drop_chance,
        ..GameConfig::default()
    }
}

fn player() -> Player {
    Player::new(Viewport { width: 640.0, height: 800.0 }, MAX_LIVES, SHOOT_COOLDOWN_MS)
}

fn level() -> LevelState {
    LevelState::new(MAX_LEVEL, LEVEL_TRANSITION_MS)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(x, y, EnemyKind::Straight, 2.0, 0)
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet { rect: Rect::new(x, y, 12.0, 28.0), vy: -10.0 }
}

/// An item centred on the player's hull.
fn item_on_player(kind: ItemKind) -> Item {
    Item::new(320.0, 700.0, kind, 0, ITEM_LIFETIME_MS)
}

// ── Bullets vs enemies ────────────────────────────────────────────────────────

#[test]
fn bullet_kills_enemy_and_leaves_explosion() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));

    let kills = bullets_vs_enemies(&mut reg, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(kills, 1);
    assert!(reg.enemies.is_empty());
    assert!(reg.bullets.is_empty());
    assert_eq!(lvl.enemies_destroyed, 1);
    assert_eq!(sounds.peek(), &[SoundEvent::EnemyDestroyed]);

    assert_eq!(reg.pending_len(), 1);
    reg.flush();
    assert_eq!(reg.explosions[0].rect.center(), (125.0, 125.0));
    assert!(reg.items.is_empty());
}

#[test]
fn one_bullet_cannot_kill_two_enemies() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.enemies.push(enemy_at(120.0, 100.0));
    reg.bullets.push(bullet_at(125.0, 110.0));

    let kills = bullets_vs_enemies(&mut reg, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(kills, 1);
    assert_eq!(reg.enemies.len(), 1);
    assert_eq!(reg.enemies[0].rect.x, 120.0);
    assert!(reg.bullets.is_empty());
}

#[test]
fn two_bullets_on_one_enemy_count_once() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(105.0, 110.0));
    reg.bullets.push(bullet_at(130.0, 110.0));

    let kills = bullets_vs_enemies(&mut reg, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(kills, 1);
    assert_eq!(lvl.enemies_destroyed, 1);
    assert!(reg.bullets.is_empty());
}

#[test]
fn certain_drop_leaves_item_at_enemy_centre() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));

    bullets_vs_enemies(&mut reg, &mut lvl, &config(1.0), 1000, &mut rng, &mut sounds);
    reg.flush();
    assert_eq!(reg.items.len(), 1);
    assert_eq!(reg.items[0].rect.center(), (125.0, 125.0));
    assert_eq!(reg.items[0].spawn_time, 1000);
}

#[test]
fn quota_kill_advances_level() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    lvl.enemies_destroyed = 7;
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));

    bullets_vs_enemies(&mut reg, &mut lvl, &config(0.0), 4000, &mut rng, &mut sounds);
    assert_eq!(lvl.level, 2);
    assert_eq!(lvl.enemies_destroyed, 0);
    assert_eq!(lvl.enemies_required, 11);
    assert_eq!(lvl.transition_start, 4000);
    assert_eq!(lvl.status(), GameStatus::LevelTransition);
}

#[test]
fn final_quota_kill_wins() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut reg = Registry::new();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    lvl.level = MAX_LEVEL;
    lvl.enemies_required = enemies_required(MAX_LEVEL);
    lvl.enemies_destroyed = 19;
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));

    bullets_vs_enemies(&mut reg, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(lvl.status(), GameStatus::GameWin);
    assert_eq!(lvl.level, MAX_LEVEL);
    assert_eq!(sounds.peek(), &[SoundEvent::EnemyDestroyed, SoundEvent::Fanfare]);
}

// ── Enemies vs player ─────────────────────────────────────────────────────────

#[test]
fn ramming_costs_a_life_and_grants_invulnerability() {
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    reg.enemies.push(enemy_at(300.0, 660.0));
    reg.enemies.push(enemy_at(20.0, 20.0));

    assert_eq!(player_vs_enemies(&mut reg, &mut p, &mut lvl, &config(0.0), 1000), 1);
    assert_eq!(p.lives, MAX_LIVES - 1);
    assert_eq!(p.invulnerable_until, 1000 + INVULNERABILITY_MS);
    assert_eq!(reg.enemies.len(), 1);
}

#[test]
fn invulnerable_player_ignores_contact() {
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    p.grant_invulnerability(900, 200);
    reg.enemies.push(enemy_at(300.0, 660.0));

    assert_eq!(player_vs_enemies(&mut reg, &mut p, &mut lvl, &config(0.0), 1000), 0);
    assert_eq!(p.lives, MAX_LIVES);
    assert_eq!(reg.enemies.len(), 1);
}

#[test]
fn simultaneous_contacts_each_cost_a_life() {
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    p.lives = 1;
    reg.enemies.push(enemy_at(280.0, 660.0));
    reg.enemies.push(enemy_at(330.0, 690.0));

    assert_eq!(player_vs_enemies(&mut reg, &mut p, &mut lvl, &config(0.0), 1000), 2);
    assert_eq!(p.lives, 0);
    assert!(!p.alive);
    assert_eq!(lvl.status(), GameStatus::GameOver);
}

// ── Items vs player ───────────────────────────────────────────────────────────

#[test]
fn health_pickup_is_capped_at_max_lives() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut reg = Registry::new();
    let mut p = player();
    let mut sounds = SoundQueue::default();
    reg.items.push(item_on_player(ItemKind::Health));

    assert_eq!(player_vs_items(&mut reg, &mut p, &config(0.0), 1000, &mut rng, &mut sounds), 1);
    assert_eq!(p.lives, MAX_LIVES);
    assert!(reg.items.is_empty());
    assert_eq!(sounds.peek(), &[SoundEvent::ItemPickup]);
}

#[test]
fn health_pickup_restores_a_life() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut reg = Registry::new();
    let mut p = player();
    let mut sounds = SoundQueue::default();
    p.lives = 2;
    reg.items.push(item_on_player(ItemKind::Health));

    player_vs_items(&mut reg, &mut p, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(p.lives, 3);
}

#[test]
fn repeated_power_pickups_keep_one_entry() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut reg = Registry::new();
    let mut p = player();
    let mut sounds = SoundQueue::default();
    reg.items.push(item_on_player(ItemKind::FastFire));
    reg.items.push(item_on_player(ItemKind::FastFire));

    assert_eq!(player_vs_items(&mut reg, &mut p, &config(0.0), 1000, &mut rng, &mut sounds), 2);
    assert_eq!(p.powers.len(), 1);
    let expiry = p.powers.expiry(PowerKind::FastFire).unwrap_or_default();
    assert!((9000..=11_000).contains(&expiry), "expiry = {}", expiry);
}

#[test]
fn distant_items_stay_put() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut reg = Registry::new();
    let mut p = player();
    let mut sounds = SoundQueue::default();
    reg.items.push(Item::new(50.0, 50.0, ItemKind::MultiShot, 0, ITEM_LIFETIME_MS));

    assert_eq!(player_vs_items(&mut reg, &mut p, &config(0.0), 1000, &mut rng, &mut sounds), 0);
    assert_eq!(reg.items.len(), 1);
    assert!(sounds.peek().is_empty());
}

// ── Full pass ─────────────────────────────────────────────────────────────────

#[test]
fn resolve_reports_each_stage() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));
    reg.enemies.push(enemy_at(300.0, 660.0));
    reg.items.push(item_on_player(ItemKind::MultiShot));

    let report = resolve(&mut reg, &mut p, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(
        report,
        CollisionReport {
            enemies_shot: 1,
            enemies_rammed: 1,
            items_collected: 1,
        }
    );
    assert!(p.powers.is_active(PowerKind::MultiShot, 1000));
}

#[test]
fn winning_kill_ends_the_pass() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    lvl.level = MAX_LEVEL;
    lvl.enemies_required = enemies_required(MAX_LEVEL);
    lvl.enemies_destroyed = 19;
    reg.enemies.push(enemy_at(100.0, 100.0));
    reg.bullets.push(bullet_at(110.0, 110.0));
    reg.enemies.push(enemy_at(300.0, 660.0));
    reg.items.push(item_on_player(ItemKind::FastFire));

    let report = resolve(&mut reg, &mut p, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(report.enemies_shot, 1);
    assert_eq!(report.enemies_rammed, 0);
    assert_eq!(report.items_collected, 0);
    assert_eq!(p.lives, MAX_LIVES);
    assert_eq!(lvl.status(), GameStatus::GameWin);
}

#[test]
fn fatal_ram_ends_the_pass() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut reg = Registry::new();
    let mut p = player();
    let mut lvl = level();
    let mut sounds = SoundQueue::default();
    p.lives = 1;
    reg.enemies.push(enemy_at(300.0, 660.0));
    reg.items.push(item_on_player(ItemKind::Health));

    let report = resolve(&mut reg, &mut p, &mut lvl, &config(0.0), 1000, &mut rng, &mut sounds);
    assert_eq!(report.enemies_rammed, 1);
    assert_eq!(report.items_collected, 0);
    assert_eq!(p.lives, 0);
    assert_eq!(lvl.status(), GameStatus::GameOver);
}
