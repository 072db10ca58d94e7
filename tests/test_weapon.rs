use approx::assert_relative_eq;
use glam::Vec2;
use laser_defense::config::Upgrades;
use laser_defense::entities::{Asteroid, AsteroidSize, EntityId, Player, Target};
use laser_defense::events::{EventQueue, GameEvent};
use laser_defense::geometry::{clip_beam, Arena};
use laser_defense::weapon::WeaponSystem;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player_with_lasers(count: u32) -> Player {
    let upgrades = Upgrades {
        attack_count: count.saturating_sub(1),
        ..Upgrades::default()
    };
    Player::new(Arena::default().center(), &upgrades)
}

/// Stationary asteroids at `offsets` from the arena centre.
fn rocks(offsets: &[Vec2], size: AsteroidSize) -> Vec<Asteroid> {
    let mut rng = seeded_rng();
    let center = Arena::default().center();
    offsets
        .iter()
        .enumerate()
        .map(|(i, off)| Asteroid::new(EntityId::Asteroid(i as u32), size, center + *off, Vec2::ZERO, &mut rng))
        .collect()
}

fn fire(weapon: &mut WeaponSystem, player: &Player, rocks: &mut [Asteroid], events: &mut EventQueue) {
    let candidates: Vec<&mut dyn Target> = rocks.iter_mut().map(|a| a as &mut dyn Target).collect();
    weapon.update(player, candidates, &Arena::default(), events);
}

// ── Target selection ──────────────────────────────────────────────────────────

#[test]
fn locks_onto_closest_up_to_attack_count() {
    let player = player_with_lasers(2);
    let mut field = rocks(
        &[Vec2::new(100.0, 0.0), Vec2::new(0.0, 50.0), Vec2::new(-150.0, 0.0)],
        AsteroidSize::Small,
    );
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    fire(&mut weapon, &player, &mut field, &mut events);

    assert_eq!(weapon.targets(), &[EntityId::Asteroid(1), EntityId::Asteroid(0)]);
    assert_eq!(weapon.beams().len(), 2);
    assert_eq!(field[2].vitals.health(), field[2].vitals.max_health());
}

#[test]
fn equal_distances_keep_supplied_order() {
    let player = player_with_lasers(1);
    let mut field = rocks(&[Vec2::new(0.0, 80.0), Vec2::new(80.0, 0.0)], AsteroidSize::Small);
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    fire(&mut weapon, &player, &mut field, &mut events);
    assert_eq!(weapon.targets(), &[EntityId::Asteroid(0)]);
}

#[test]
fn dying_targets_are_skipped() {
    let player = player_with_lasers(1);
    let mut field = rocks(&[Vec2::new(10.0, 0.0), Vec2::new(90.0, 0.0)], AsteroidSize::Small);
    let mut events = EventQueue::new();
    field[0].die(&mut events);

    let mut weapon = WeaponSystem::new();
    fire(&mut weapon, &player, &mut field, &mut events);
    assert_eq!(weapon.targets(), &[EntityId::Asteroid(1)]);
}

#[test]
fn no_candidates_clears_lock() {
    let player = player_with_lasers(1);
    let mut field = rocks(&[Vec2::new(10.0, 0.0)], AsteroidSize::Small);
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    fire(&mut weapon, &player, &mut field, &mut events);
    assert_eq!(weapon.targets().len(), 1);

    weapon.update(&player, Vec::new(), &Arena::default(), &mut events);
    assert!(weapon.targets().is_empty());
    assert!(weapon.beams().is_empty());
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn three_seconds_of_laser_deals_sixty() {
    let player = player_with_lasers(1); // 20 dps
    let mut field = rocks(&[Vec2::new(60.0, 0.0)], AsteroidSize::Large);
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    for _ in 0..180 {
        fire(&mut weapon, &player, &mut field, &mut events);
    }
    assert_relative_eq!(field[0].vitals.health(), 140.0, epsilon = 1e-2);
    assert!(field[0].is_alive());
}

#[test]
fn destruction_is_reported_once() {
    let player = player_with_lasers(1);
    let mut field = rocks(&[Vec2::new(60.0, 0.0)], AsteroidSize::Small); // 50 hp
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    for _ in 0..300 {
        fire(&mut weapon, &player, &mut field, &mut events);
    }
    let destroyed = events
        .drain()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::AsteroidDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert!(!field[0].is_alive());
    assert!(weapon.targets().is_empty());
}

// ── Beams ─────────────────────────────────────────────────────────────────────

#[test]
fn beam_to_offscreen_target_stops_at_edge() {
    let player = player_with_lasers(1);
    let mut rng = seeded_rng();
    let mut field = vec![Asteroid::new(
        EntityId::Asteroid(0),
        AsteroidSize::Small,
        Vec2::new(-50.0, 333.5),
        Vec2::ZERO,
        &mut rng,
    )];
    let mut weapon = WeaponSystem::new();
    let mut events = EventQueue::new();
    fire(&mut weapon, &player, &mut field, &mut events);

    let beam = weapon.beams()[0];
    assert_eq!(beam.from, player.position);
    assert_relative_eq!(beam.to.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(beam.to.y, 333.5, epsilon = 1e-3);
}

#[rstest]
#[case(Vec2::new(250.0, 400.0), Vec2::new(250.0, 400.0))]
#[case(Vec2::new(500.0, 333.5), Vec2::new(375.0, 333.5))]
#[case(Vec2::new(187.5, -100.0), Vec2::new(187.5, 0.0))]
#[case(Vec2::new(187.5, 800.0), Vec2::new(187.5, 667.0))]
#[case(Vec2::new(-212.5, -66.5), Vec2::new(0.0, 146.0))]
fn clip_beam_truncates_at_first_boundary(#[case] target: Vec2, #[case] expected: Vec2) {
    let origin = Vec2::new(187.5, 333.5);
    let end = clip_beam(origin, target, &Arena::default());
    assert_relative_eq!(end.x, expected.x, epsilon = 1e-3);
    assert_relative_eq!(end.y, expected.y, epsilon = 1e-3);
}

#[test]
fn clip_beam_with_coincident_points() {
    let p = Vec2::new(10.0, 10.0);
    assert_eq!(clip_beam(p, p, &Arena::default()), p);
}
