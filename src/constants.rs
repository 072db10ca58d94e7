//! Tuning constants shared across the simulation.
//!
//! Per-archetype tables (enemy kinds, asteroid sizes, power-up kinds) live
//! next to their enums and are looked up with `match`.

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 375.0;
pub const ARENA_HEIGHT: f32 = 667.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_BASE_SPEED: f32 = 180.0;
pub const PLAYER_BASE_ATTACK_RANGE: f32 = 180.0;
pub const PLAYER_BASE_ATTACK_COUNT: usize = 1;
/// Damage per second of a single laser.
pub const PLAYER_BASE_ATTACK_DAMAGE: f32 = 20.0;
pub const PLAYER_BASE_MAX_HEALTH: f32 = 3.0;
pub const PLAYER_SIZE: f32 = 24.0;
/// Length of the blink shown after the player is hit (3 × 100 ms yoyo).
pub const PLAYER_HIT_FLASH_MS: f64 = 600.0;

// ── Upgrades (value added per purchased level) ────────────────────────────────

pub const UPGRADE_MOVE_SPEED_PER_LEVEL: f32 = 15.0;
pub const UPGRADE_ATTACK_RANGE_PER_LEVEL: f32 = 25.0;
pub const UPGRADE_ATTACK_COUNT_PER_LEVEL: usize = 1;
pub const UPGRADE_ATTACK_DAMAGE_PER_LEVEL: f32 = 8.0;
pub const UPGRADE_MAX_HEALTH_PER_LEVEL: f32 = 1.0;
/// Seconds added to the level clock per level.
pub const UPGRADE_INITIAL_TIME_PER_LEVEL: f64 = 5.0;
/// Fraction added to the coin multiplier per level.
pub const UPGRADE_COIN_MULTIPLIER_PER_LEVEL: f64 = 0.1;

// ── Hostiles ──────────────────────────────────────────────────────────────────

pub const MAX_ENEMIES: usize = 50;
/// Distance outside the arena at which regular enemies appear.
pub const SPAWN_EDGE_PADDING: f32 = 50.0;
/// Inset of the rectangle enemies pick wander targets from.
pub const ENEMY_WANDER_MARGIN: f32 = 50.0;
pub const ENEMY_WANDER_MIN_MS: u32 = 2000;
pub const ENEMY_WANDER_MAX_MS: u32 = 5000;
/// Enemies hold position once this close to their wander target.
pub const ENEMY_ARRIVE_DISTANCE: f32 = 30.0;
pub const ENEMY_DEATH_ANIMATION_MS: f64 = 200.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_SPEED: f32 = 40.0;
pub const BOSS_SIZE: f32 = 60.0;
pub const BOSS_DAMAGE: f32 = 1.0;
pub const BOSS_BASE_HEALTH: f32 = 500.0;
pub const BOSS_HEALTH_PER_TIER: f32 = 300.0;
pub const BOSS_BASE_REWARD: u32 = 200;
pub const BOSS_REWARD_PER_TIER: u32 = 100;
pub const BOSS_ATTACK_MODE_DURATION_MS: f64 = 5000.0;
pub const BOSS_BASE_ATTACK_INTERVAL_MS: f64 = 800.0;
pub const BOSS_ATTACK_INTERVAL_STEP_MS: f64 = 100.0;
pub const BOSS_MIN_ATTACK_INTERVAL_MS: f64 = 100.0;
/// Tier from which a boss switches to randomized bulk volleys.
pub const BOSS_ULTIMATE_TIER: u32 = 4;
pub const BOSS_MAX_TIER: u32 = 12;
pub const BOSS_WANDER_MIN_MS: u32 = 3000;
pub const BOSS_WANDER_MAX_MS: u32 = 6000;
pub const BOSS_ARRIVE_DISTANCE: f32 = 10.0;
/// Lower edge of the band the boss picks wander targets in, as a fraction
/// of the arena height.
pub const BOSS_WANDER_BAND: f32 = 0.4;
/// Lowest point the boss may ever reach, as a fraction of the arena height.
pub const BOSS_CLAMP_BAND: f32 = 0.5;
pub const BOSS_SPAWN_Y: f32 = -100.0;
pub const BOSS_DEATH_ANIMATION_MS: f64 = 500.0;
/// Tier used when a schedule entry spawns a pattern boss without one.
pub const PATTERN_BOSS_DEFAULT_TIER: u32 = 3;

/// Stats of the classic boss (a boss-archetype enemy) when the level does
/// not override them.
pub const CLASSIC_BOSS_SPEED: f32 = 50.0;
pub const CLASSIC_BOSS_HEALTH: f32 = 400.0;
pub const CLASSIC_BOSS_REWARD: u32 = 100;
pub const CLASSIC_BOSS_DAMAGE: f32 = 1.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

pub const ASTEROID_DAMAGE: f32 = 1.0;
pub const ASTEROID_DESPAWN_MARGIN: f32 = 100.0;
pub const ASTEROID_SPAWN_PADDING: f32 = 50.0;
pub const ASTEROID_MAX_ROTATION_SPEED: f32 = 2.0;
/// Velocity range along the edge an asteroid spawns on.
pub const ASTEROID_DRIFT_SPEED: f32 = 25.0;
/// Velocity range pointing into the arena.
pub const ASTEROID_INWARD_MIN_SPEED: f32 = 25.0;
pub const ASTEROID_INWARD_MAX_SPEED: f32 = 60.0;
/// Gap between the asteroids of the initial burst.
pub const ASTEROID_BURST_SPACING_MS: f64 = 300.0;
pub const ASTEROID_DEATH_ANIMATION_MS: f64 = 200.0;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 200.0;
pub const BULLET_SIZE: f32 = 8.0;
pub const BULLET_LIFETIME_MS: f64 = 3000.0;
pub const BULLET_DESPAWN_MARGIN: f32 = 50.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWERUP_SPAWN_INTERVAL_MS: f64 = 25_000.0;
pub const POWERUP_SPAWN_PADDING: f32 = 100.0;
/// Half-period of the expiry blink.
pub const POWERUP_BLINK_HALF_PERIOD_MS: f64 = 200.0;
pub const POWERUP_PICKUP_DISTANCE: f32 = 40.0;

// ── Combat ────────────────────────────────────────────────────────────────────

/// Laser damage is applied as `dps / DAMAGE_TICK_RATE` every frame,
/// independent of the real frame delta.
pub const DAMAGE_TICK_RATE: f32 = 60.0;
pub const COLLISION_DAMAGE_COOLDOWN_MS: f64 = 1000.0;
