use scroll_shooter::constants::*;
use scroll_shooter::entities::Viewport;
use scroll_shooter::registry::Registry;
use scroll_shooter::spawn::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewport() -> Viewport {
    Viewport { width: 640.0, height: 800.0 }
}

#[test]
fn first_wave_after_interval_is_exceeded() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut reg = Registry::new();
    let mut director = SpawnDirector::new(ENEMY_SPAWN_INTERVAL);

    for _ in 0..75 {
        assert_eq!(director.step(&mut reg, 1, 2.0, viewport(), 0, &mut rng), 0);
    }
    assert_eq!(director.world_distance, 150.0);
    assert_eq!(director.step(&mut reg, 1, 2.0, viewport(), 0, &mut rng), 1);
    assert_eq!(director.last_spawn_distance, 152.0);
    assert_eq!(reg.pending_len(), 1);
    assert_eq!(reg.total(), 0);
}

#[test]
fn waves_repeat_every_interval() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut reg = Registry::new();
    let mut director = SpawnDirector::new(ENEMY_SPAWN_INTERVAL);

    let spawned: usize = (0..760)
        .map(|_| director.step(&mut reg, 1, 2.0, viewport(), 0, &mut rng))
        .sum();
    assert_eq!(spawned, 10);
}

#[test]
fn wave_size_grows_from_level_three() {
    assert_eq!(wave_size(1), 1);
    assert_eq!(wave_size(2), 1);
    assert_eq!(wave_size(3), 2);
    assert_eq!(wave_size(5), 2);
}

#[test]
fn enemies_spawn_above_view_within_band() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut reg = Registry::new();
    let mut director = SpawnDirector::new(0.0);

    for n in 0..300 {
        director.step(&mut reg, 4, 2.0, viewport(), n, &mut rng);
    }
    reg.flush();
    assert_eq!(reg.enemies.len(), 600);
    for e in &reg.enemies {
        assert!((20.0..=570.0).contains(&e.rect.x), "x = {}", e.rect.x);
        assert!((-300.0..=-30.0).contains(&e.rect.y), "y = {}", e.rect.y);
        assert_eq!(e.base_speed, 2.0);
        assert_eq!(e.hp, 1);
    }
}

#[test]
fn background_tiles_wrap() {
    let mut director = SpawnDirector::new(ENEMY_SPAWN_INTERVAL);
    assert_eq!(director.background_tiles(800.0), [0.0, -800.0]);
    for _ in 0..10 {
        director.advance(100.0);
    }
    assert_eq!(director.background_tiles(800.0), [200.0, -600.0]);
}
