use laser_defense::config::*;
use laser_defense::geometry::Arena;

use rstest::rstest;

use std::path::{Path, PathBuf};

/// Write `contents` to a fresh file under the system temp dir.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("laser_defense_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).expect("temp file is writable");
    path
}

const FULL_LEVEL: &str = r#"{
    "baseTime": 45,
    "bossSpawnTime": 20,
    "enemies": [
        { "type": "basic", "spawnRate": 2000, "speed": 90, "health": 50, "reward": 10, "damage": 1 },
        { "type": "pattern-boss", "spawnRate": 30000, "bossType": 2, "health": 900 }
    ],
    "boss": { "type": "ultimate-boss", "bossType": 4, "health": 3000, "reward": 600 },
    "asteroids": {
        "spawnInterval": 1200,
        "initialCount": 3,
        "sizeRatio": { "small": 1, "medium": 1, "large": 2 }
    },
    "rewards": { "completion": 200, "timeBonus": 5 }
}"#;

// ── Built-in levels ───────────────────────────────────────────────────────────

#[rstest]
#[case(1, 1, 50, 2.0)]
#[case(2, 2, 80, 3.0)]
#[case(3, 2, 120, 4.0)]
fn builtin_levels(
    #[case] level: u32,
    #[case] schedules: usize,
    #[case] completion: u32,
    #[case] time_bonus: f64,
) {
    let config = LevelConfig::builtin(level);
    assert_eq!(config.base_time, 30.0);
    assert_eq!(config.boss_spawn_time, 15.0);
    assert_eq!(config.enemies.len(), schedules);
    assert_eq!(config.rewards.completion, completion);
    assert_eq!(config.rewards.time_bonus, time_bonus);
    assert!(config.validate().is_ok());
}

#[test]
fn builtin_level_three_brings_tanks() {
    let config = LevelConfig::builtin(3);
    let tank = &config.enemies[1];
    assert_eq!(tank.kind, EnemyType::Tank);
    assert_eq!(tank.spawn_rate, 4500.0);
    assert_eq!(tank.health, Some(150.0));
    assert_eq!(tank.reward, Some(25));
}

#[test]
fn unknown_level_falls_back_to_level_one() {
    assert_eq!(LevelConfig::builtin(0), LevelConfig::builtin(1));
    assert_eq!(LevelConfig::builtin(BUILTIN_LEVELS + 1), LevelConfig::builtin(1));
}

#[test]
fn missing_asteroid_section_uses_defaults() {
    let a = LevelConfig::builtin(1).asteroid_config();
    assert_eq!(a, AsteroidConfig::default());
    assert_eq!(a.spawn_interval, 1500.0);
    assert_eq!(a.initial_count, 6);
    assert_eq!(
        a.size_ratio,
        SizeRatio {
            small: 4,
            medium: 2,
            large: 1
        }
    );
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[test]
fn parses_full_level_file() {
    let config = LevelConfig::from_json(FULL_LEVEL).expect("valid level");
    assert_eq!(config.base_time, 45.0);
    assert_eq!(config.enemies[0].kind, EnemyType::Basic);
    assert_eq!(config.enemies[0].speed, Some(90.0));

    let pattern = &config.enemies[1];
    assert_eq!(pattern.kind, EnemyType::PatternBoss);
    assert_eq!(pattern.boss_type, Some(2));
    assert_eq!(pattern.reward, None);

    let boss = config.boss.as_ref().expect("boss section");
    assert_eq!(boss.style, BossStyle::UltimateBoss);
    assert_eq!(boss.boss_type, Some(4));
    assert_eq!(boss.speed, None);

    assert_eq!(config.asteroid_config().size_ratio.large, 2);
    assert_eq!(config.rewards.time_bonus, 5.0);
}

#[rstest]
#[case(r#"{ "type": "boss" }"#, BossStyle::Classic)]
#[case(r#"{ "type": "classic" }"#, BossStyle::Classic)]
#[case(r#"{ "type": "pattern-boss" }"#, BossStyle::PatternBoss)]
#[case(r#"{}"#, BossStyle::Classic)]
fn boss_style_names(#[case] json: &str, #[case] style: BossStyle) {
    let boss: BossConfig = serde_json::from_str(json).expect("valid boss");
    assert_eq!(boss.style, style);
}

#[test]
fn serializes_back_to_the_same_shape() {
    let config = LevelConfig::from_json(FULL_LEVEL).expect("valid level");
    let json = serde_json::to_string(&config).expect("serializable");
    assert!(json.contains("\"bossSpawnTime\""));
    assert!(json.contains("\"pattern-boss\""));
    assert!(!json.contains("\"speed\":null"));
    assert_eq!(LevelConfig::from_json(&json).expect("round trip"), config);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = LevelConfig::from_json("{ \"baseTime\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_enemy_type_is_a_parse_error() {
    let json = FULL_LEVEL.replace("\"basic\"", "\"dragon\"");
    assert!(matches!(LevelConfig::from_json(&json), Err(ConfigError::Parse(_))));
}

// ── Validation ────────────────────────────────────────────────────────────────

#[rstest]
#[case("\"baseTime\": 45", "\"baseTime\": 0", "baseTime")]
#[case("\"bossSpawnTime\": 20", "\"bossSpawnTime\": -1", "bossSpawnTime")]
#[case("\"spawnRate\": 2000", "\"spawnRate\": 0", "spawnRate")]
#[case("\"bossType\": 2", "\"bossType\": 0", "bossType")]
#[case("\"bossType\": 2", "\"bossType\": 13", "enemies[1].bossType")]
#[case("\"bossType\": 4", "\"bossType\": 50000000", "boss.bossType")]
#[case("\"spawnInterval\": 1200", "\"spawnInterval\": -5", "spawnInterval")]
#[case(
    "{ \"small\": 1, \"medium\": 1, \"large\": 2 }",
    "{ \"small\": 0, \"medium\": 0, \"large\": 0 }",
    "sizeRatio"
)]
#[case(
    "{ \"small\": 1, \"medium\": 1, \"large\": 2 }",
    "{ \"small\": 4294967295, \"medium\": 1, \"large\": 0 }",
    "sizeRatio"
)]
fn invalid_values_are_rejected(#[case] from: &str, #[case] to: &str, #[case] field: &str) {
    let json = FULL_LEVEL.replace(from, to);
    match LevelConfig::from_json(&json) {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains(field), "{msg}"),
        other => panic!("expected an invalid-config error, got {other:?}"),
    }
}

// ── Files ─────────────────────────────────────────────────────────────────────

#[test]
fn load_reads_a_level_file() {
    let path = temp_file("level.json", FULL_LEVEL);
    let config = LevelConfig::load(&path).expect("valid level file");
    assert_eq!(config.base_time, 45.0);
    let _ = std::fs::remove_file(path);
}

#[test]
fn load_reports_the_missing_path() {
    let path = Path::new("/definitely/not/here/level.json");
    match LevelConfig::load(path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn load_or_builtin_falls_back() {
    let missing = Path::new("/definitely/not/here/level.json");
    assert_eq!(LevelConfig::load_or_builtin(missing, 2), LevelConfig::builtin(2));

    let broken = temp_file("broken.json", "not json");
    assert_eq!(LevelConfig::load_or_builtin(&broken, 3), LevelConfig::builtin(3));
    let _ = std::fs::remove_file(broken);
}

#[test]
fn load_or_builtin_falls_back_on_out_of_range_values() {
    let json = FULL_LEVEL.replace(
        "{ \"small\": 1, \"medium\": 1, \"large\": 2 }",
        "{ \"small\": 4294967295, \"medium\": 4294967295, \"large\": 2 }",
    );
    let path = temp_file("overflow.json", &json);
    assert_eq!(LevelConfig::load_or_builtin(&path, 2), LevelConfig::builtin(2));
    let _ = std::fs::remove_file(path);
}

// ── Upgrades and settings ─────────────────────────────────────────────────────

#[test]
fn partial_upgrades_default_the_rest() {
    let u = Upgrades::from_json(r#"{ "attackCount": 2, "coinMultiplier": 1 }"#).expect("valid");
    assert_eq!(u.attack_count, 2);
    assert_eq!(u.coin_multiplier, 1);
    assert_eq!(u.move_speed, 0);
    assert_eq!(u.initial_time, 0);
}

#[test]
fn upgrades_load_from_file() {
    let path = temp_file("upgrades.json", r#"{ "maxHealth": 3 }"#);
    let u = Upgrades::load(&path).expect("valid upgrades file");
    assert_eq!(u.max_health, 3);
    let _ = std::fs::remove_file(path);
}

#[test]
fn settings_default_to_standard_arena_without_enemy_contact() {
    let s = GameSettings::default();
    assert_eq!(s.arena, Arena::new(375.0, 667.0));
    assert!(!s.enemy_contact_damage);

    let s: GameSettings = serde_json::from_str(r#"{ "enemyContactDamage": true }"#).expect("valid");
    assert!(s.enemy_contact_damage);
    assert_eq!(s.arena, Arena::default());
}
