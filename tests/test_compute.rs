use approx::assert_relative_eq;
use glam::Vec2;
use laser_defense::compute::*;
use laser_defense::config::{
    AsteroidConfig, GameSettings, LevelConfig, RewardConfig, SizeRatio, Upgrades,
};
use laser_defense::director::SpawnDirector;
use laser_defense::events::{EndReason, GameEvent};

use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// No enemies, no asteroids and a boss far beyond the clock.
fn quiet_level(base_time: f64) -> LevelConfig {
    LevelConfig {
        base_time,
        boss_spawn_time: 1000.0,
        enemies: Vec::new(),
        boss: None,
        asteroids: Some(AsteroidConfig {
            spawn_interval: 1.0e9,
            initial_count: 0,
            size_ratio: SizeRatio {
                small: 1,
                medium: 1,
                large: 1,
            },
        }),
        rewards: RewardConfig {
            completion: 50,
            time_bonus: 2.0,
        },
    }
}

fn make_state(config: LevelConfig) -> GameState {
    init_state(1, config, Upgrades::default(), GameSettings::default())
}

fn finished_events(events: &[GameEvent]) -> Vec<(bool, EndReason)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LevelFinished { victory, reason } => Some((*victory, *reason)),
            _ => None,
        })
        .collect()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_sets_clock_and_player() {
    let upgrades = Upgrades {
        initial_time: 2,
        ..Upgrades::default()
    };
    let s = init_state(1, LevelConfig::builtin(1), upgrades, GameSettings::default());
    assert_relative_eq!(s.remaining_time, 40.0); // 30 + 2 × 5
    assert_eq!(s.player.position, GameSettings::default().arena.center());
    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.result.is_none());
    assert_eq!(s.coins, 0);
    assert!(s.enemies.is_spawning());
    assert!(s.asteroids.is_spawning());
    assert!(s.power_ups.is_spawning());
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn non_positive_delta_is_ignored() {
    let mut s = make_state(quiet_level(10.0));
    let mut rng = seeded_rng();
    assert!(tick(&mut s, Vec2::X, 0.0, &mut rng).is_empty());
    assert!(tick(&mut s, Vec2::X, -5.0, &mut rng).is_empty());
    assert_eq!(s.elapsed_ms, 0.0);
    assert_relative_eq!(s.remaining_time, 10.0);
}

#[test]
fn clock_runs_out_into_defeat() {
    let mut s = make_state(quiet_level(1.0));
    let mut rng = seeded_rng();
    let mut finished = Vec::new();
    let mut frames = 0;
    while s.is_playing() && frames < 200 {
        let events = tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng);
        finished.extend(finished_events(&events));
        frames += 1;
    }
    assert!((60..=61).contains(&frames), "took {frames} frames");
    assert_eq!(s.status, GameStatus::Defeat);
    assert_eq!(finished, vec![(false, EndReason::TimeUp)]);

    let result = s.result.clone().expect("settled");
    assert_eq!(result.reason, EndReason::TimeUp);
    assert_eq!(result.remaining_time, 0.0);
    assert_eq!(result.final_reward, result.coins_earned);
    assert_eq!(result.completion_reward, 0);

    // nothing moves after the end
    assert!(tick(&mut s, Vec2::X, FRAME_MS, &mut rng).is_empty());
    assert!(!s.enemies.is_spawning());
}

#[test]
fn pause_freezes_the_level() {
    let mut s = make_state(quiet_level(10.0));
    let mut rng = seeded_rng();
    toggle_pause(&mut s);
    assert!(s.paused);

    let before = s.player.position;
    assert!(tick(&mut s, Vec2::X, 500.0, &mut rng).is_empty());
    assert_eq!(s.player.position, before);
    assert_relative_eq!(s.remaining_time, 10.0);

    toggle_pause(&mut s);
    tick(&mut s, Vec2::X, 500.0, &mut rng);
    assert!(s.player.position.x > before.x);
    assert_relative_eq!(s.remaining_time, 9.5);
}

#[test]
fn pause_is_ignored_once_over() {
    let mut s = make_state(quiet_level(10.0));
    finish(&mut s, false, EndReason::TimeUp);
    toggle_pause(&mut s);
    assert!(!s.paused);
}

#[test]
fn health_depletion_ends_in_defeat() {
    let mut s = make_state(quiet_level(10.0));
    let mut rng = seeded_rng();
    s.player.take_damage(3.0);
    let events = tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng);
    assert_eq!(finished_events(&events), vec![(false, EndReason::HealthDepleted)]);
    assert_eq!(s.status, GameStatus::Defeat);
}

// ── Settlement ────────────────────────────────────────────────────────────────

#[test]
fn victory_settlement_applies_time_bonus_and_multiplier() {
    let upgrades = Upgrades {
        coin_multiplier: 3,
        ..Upgrades::default()
    };
    let mut s = init_state(1, LevelConfig::builtin(1), upgrades, GameSettings::default());
    s.coins = 100;
    s.remaining_time = 10.5;

    finish(&mut s, true, EndReason::BossDefeated);
    assert_eq!(s.status, GameStatus::Victory);
    let r = s.result.clone().expect("settled");
    assert!(r.victory);
    assert_eq!(r.completion_reward, 50);
    assert_eq!(r.time_reward, 21); // floor(10.5 × 2)
    assert_relative_eq!(r.multiplier, 1.3);
    assert_eq!(r.final_reward, 222); // floor(171 × 1.3)
    assert_eq!(r.coins_earned, 100);
}

#[test]
fn defeat_banks_only_kill_coins() {
    let upgrades = Upgrades {
        coin_multiplier: 5,
        ..Upgrades::default()
    };
    let mut s = init_state(2, LevelConfig::builtin(2), upgrades, GameSettings::default());
    s.coins = 37;
    finish(&mut s, false, EndReason::HealthDepleted);
    let r = s.result.clone().expect("settled");
    assert_eq!(r.level_id, 2);
    assert_eq!(r.final_reward, 37);
    assert_eq!(r.time_reward, 0);
}

#[test]
fn finish_only_counts_once() {
    let mut s = make_state(quiet_level(10.0));
    s.coins = 10;
    finish(&mut s, true, EndReason::BossDefeated);
    let first = s.result.clone();
    s.coins = 999;
    finish(&mut s, false, EndReason::TimeUp);

    assert_eq!(s.status, GameStatus::Victory);
    assert_eq!(s.result, first);
    let queued: Vec<GameEvent> = s.events.drain();
    assert_eq!(finished_events(&queued), vec![(true, EndReason::BossDefeated)]);
}

#[test]
fn result_serializes_in_camel_case() {
    let mut s = make_state(quiet_level(10.0));
    finish(&mut s, false, EndReason::TimeUp);
    let json = serde_json::to_value(s.result.expect("settled")).expect("serializable");
    assert_eq!(json["levelId"], 1);
    assert_eq!(json["finalReward"], 0);
    assert_eq!(json["reason"], "TimeUp");
}

// ── Full-level scenarios ──────────────────────────────────────────────────────

/// A level-one run with a player who cannot die.
fn tough_level_one() -> GameState {
    let mut s = make_state(LevelConfig::builtin(1));
    s.player.max_health = 1000.0;
    s.player.health = 1000.0;
    s
}

#[test]
fn boss_arrives_on_frame_900() {
    let mut s = tough_level_one();
    let mut rng = seeded_rng();
    let mut spawned_on = Vec::new();
    for frame in 1..=900 {
        let events = tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng);
        if events.iter().any(|e| matches!(e, GameEvent::BossSpawned { .. })) {
            spawned_on.push(frame);
        }
    }
    assert_eq!(spawned_on, vec![900]);
    assert!(s.enemies.boss_spawned());
    assert!(s.is_playing());
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut s = tough_level_one();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut log = Vec::new();
        for frame in 0..1200u32 {
            let movement = match (frame / 120) % 4 {
                0 => Vec2::new(1.0, 0.0),
                1 => Vec2::new(0.0, 1.0),
                2 => Vec2::new(-1.0, 0.0),
                _ => Vec2::new(0.0, -1.0),
            };
            log.extend(tick(&mut s, movement, FRAME_MS, &mut rng));
        }
        (log, s.player.position, s.coins, s.kills, s.remaining_time)
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn coins_match_reported_rewards() {
    let upgrades = Upgrades {
        attack_damage: 10,
        attack_count: 2,
        ..Upgrades::default()
    };
    let mut s = init_state(2, LevelConfig::builtin(2), upgrades, GameSettings::default());
    s.player.max_health = 1000.0;
    s.player.health = 1000.0;
    let mut rng = seeded_rng();

    let mut rewards = 0;
    let mut kills = 0;
    for _ in 0..2000 {
        if !s.is_playing() {
            break;
        }
        for event in tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng) {
            match event {
                GameEvent::EnemyKilled { reward, .. } | GameEvent::AsteroidDestroyed { reward, .. } => {
                    rewards += reward;
                    kills += 1;
                }
                _ => {}
            }
        }
    }
    assert!(kills > 0);
    assert_eq!(s.coins, rewards);
    assert_eq!(s.kills, kills);
    assert!(s.is_over());
    assert_eq!(s.result.as_ref().map(|r| r.coins_earned), Some(rewards));
}

#[test]
fn time_pickup_extends_the_clock() {
    let mut s = make_state(quiet_level(60.0));
    let mut rng = seeded_rng();
    // pickups spawn at least 100 u from every edge, out of reach from here
    s.player.position = Vec2::new(30.0, 30.0);
    for _ in 0..1600 {
        tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng);
        if !s.power_ups.live().is_empty() {
            break;
        }
    }
    assert_eq!(s.power_ups.live().len(), 1);
    assert!(s.power_ups.live()[0].active);

    let player = s.player.position;
    s.power_ups.live_mut()[0].position = player;
    let before = s.remaining_time;
    let events = tick(&mut s, Vec2::ZERO, FRAME_MS, &mut rng);

    assert_relative_eq!(s.remaining_time, before - FRAME_MS / 1000.0 + 15.0, epsilon = 1e-9);
    assert_eq!(s.power_ups_collected, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PowerUpCollected { value, .. } if *value == 15.0)));
}
