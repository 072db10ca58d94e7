//! Level configuration, upgrade levels and engine settings.
//!
//! Level files use the same camelCase JSON shape as the built-in level
//! tables.  A missing or malformed file never stops a level from starting:
//! [`LevelConfig::load_or_builtin`] logs the problem and falls back to the
//! baked-in table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::BOSS_MAX_TIER;
use crate::geometry::Arena;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid level configuration: {0}")]
    Invalid(String),
}

// ── Level ─────────────────────────────────────────────────────────────────────

/// Which archetype a spawn schedule produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyType {
    Basic,
    Fast,
    Tank,
    /// A boss-archetype enemy on a regular schedule.
    Boss,
    /// A full pattern boss on a regular schedule.
    PatternBoss,
}

/// One recurring enemy spawn.  Unset stats fall back to the archetype table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemySchedule {
    #[serde(rename = "type")]
    pub kind: EnemyType,
    /// Milliseconds between spawns.
    pub spawn_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
    /// Tier for `pattern-boss` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_type: Option<u32>,
}

impl EnemySchedule {
    pub fn new(kind: EnemyType, spawn_rate: f64) -> Self {
        Self {
            kind,
            spawn_rate,
            speed: None,
            health: None,
            reward: None,
            damage: None,
            boss_type: None,
        }
    }

    fn with_stats(mut self, speed: f32, health: f32, reward: u32, damage: f32) -> Self {
        self.speed = Some(speed);
        self.health = Some(health);
        self.reward = Some(reward);
        self.damage = Some(damage);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BossStyle {
    /// A boss-archetype enemy: wanders and shoots like any other enemy.
    #[default]
    #[serde(alias = "boss")]
    Classic,
    /// Cycles through attack modes.
    PatternBoss,
    /// Randomized bulk volleys (normally paired with tier ≥ 4).
    UltimateBoss,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossConfig {
    #[serde(rename = "type", default)]
    pub style: BossStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
}

/// Relative weights of the three asteroid sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRatio {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidConfig {
    pub spawn_interval: f64,
    pub initial_count: u32,
    pub size_ratio: SizeRatio,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1500.0,
            initial_count: 6,
            size_ratio: SizeRatio {
                small: 4,
                medium: 2,
                large: 1,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardConfig {
    /// Flat coins for clearing the level.
    pub completion: u32,
    /// Coins per remaining second on victory.
    pub time_bonus: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Seconds on the clock before upgrades.
    pub base_time: f64,
    /// Seconds into the level at which the boss arrives.
    pub boss_spawn_time: f64,
    pub enemies: Vec<EnemySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asteroids: Option<AsteroidConfig>,
    pub rewards: RewardConfig,
}

/// Number of levels with a built-in table.
pub const BUILTIN_LEVELS: u32 = 3;

impl LevelConfig {
    /// The baked-in table for `level`.  Unknown ids get level 1.
    pub fn builtin(level: u32) -> Self {
        match level {
            2 => LevelConfig {
                base_time: 30.0,
                boss_spawn_time: 15.0,
                enemies: vec![
                    EnemySchedule::new(EnemyType::Basic, 2000.0).with_stats(90.0, 50.0, 10, 1.0),
                    EnemySchedule::new(EnemyType::Fast, 3500.0).with_stats(140.0, 30.0, 15, 1.0),
                ],
                boss: None,
                asteroids: None,
                rewards: RewardConfig {
                    completion: 80,
                    time_bonus: 3.0,
                },
            },
            3 => LevelConfig {
                base_time: 30.0,
                boss_spawn_time: 15.0,
                enemies: vec![
                    EnemySchedule::new(EnemyType::Basic, 1800.0).with_stats(100.0, 60.0, 12, 1.0),
                    EnemySchedule::new(EnemyType::Tank, 4500.0).with_stats(50.0, 150.0, 25, 1.0),
                ],
                boss: None,
                asteroids: None,
                rewards: RewardConfig {
                    completion: 120,
                    time_bonus: 4.0,
                },
            },
            _ => LevelConfig {
                base_time: 30.0,
                boss_spawn_time: 15.0,
                enemies: vec![
                    EnemySchedule::new(EnemyType::Basic, 2500.0).with_stats(80.0, 40.0, 8, 1.0),
                ],
                boss: None,
                asteroids: None,
                rewards: RewardConfig {
                    completion: 50,
                    time_bonus: 2.0,
                },
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load `path`, or fall back to built-in `level` if that fails.
    pub fn load_or_builtin(path: &Path, level: u32) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using built-in level {level}");
                Self::builtin(level)
            }
        }
    }

    /// The asteroid settings, with the defaults filled in.
    pub fn asteroid_config(&self) -> AsteroidConfig {
        self.asteroids.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "baseTime must be positive, got {}",
                self.base_time
            )));
        }
        if !(self.boss_spawn_time >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bossSpawnTime must not be negative, got {}",
                self.boss_spawn_time
            )));
        }
        for (i, schedule) in self.enemies.iter().enumerate() {
            if !(schedule.spawn_rate > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "enemies[{i}].spawnRate must be positive, got {}",
                    schedule.spawn_rate
                )));
            }
            if let Some(tier) = schedule.boss_type {
                if !(1..=BOSS_MAX_TIER).contains(&tier) {
                    return Err(ConfigError::Invalid(format!(
                        "enemies[{i}].bossType must be within 1..={BOSS_MAX_TIER}, got {tier}"
                    )));
                }
            }
        }
        if let Some(boss) = &self.boss {
            if let Some(tier) = boss.boss_type {
                if !(1..=BOSS_MAX_TIER).contains(&tier) {
                    return Err(ConfigError::Invalid(format!(
                        "boss.bossType must be within 1..={BOSS_MAX_TIER}, got {tier}"
                    )));
                }
            }
        }
        if let Some(asteroids) = &self.asteroids {
            if !(asteroids.spawn_interval > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "asteroids.spawnInterval must be positive, got {}",
                    asteroids.spawn_interval
                )));
            }
            let ratio = asteroids.size_ratio;
            match ratio
                .small
                .checked_add(ratio.medium)
                .and_then(|sum| sum.checked_add(ratio.large))
            {
                Some(0) => {
                    return Err(ConfigError::Invalid(
                        "asteroids.sizeRatio needs at least one non-zero weight".into(),
                    ))
                }
                None => {
                    return Err(ConfigError::Invalid(
                        "asteroids.sizeRatio weights add up past u32::MAX".into(),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

// ── Upgrades ──────────────────────────────────────────────────────────────────

/// Purchased upgrade levels, as kept by the save-data collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Upgrades {
    pub move_speed: u32,
    pub attack_range: u32,
    pub attack_count: u32,
    pub attack_damage: u32,
    pub max_health: u32,
    pub initial_time: u32,
    pub coin_multiplier: u32,
}

impl Upgrades {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

// ── Engine settings ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub arena: Arena,
    /// Whether touching an enemy hurts the player.  Off by default: only
    /// asteroids and bullets deal contact damage.
    pub enemy_contact_damage: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            enemy_contact_damage: false,
        }
    }
}
