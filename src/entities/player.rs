//! The player ship.

use glam::Vec2;
use serde::Serialize;

use crate::config::Upgrades;
use crate::constants::{
    PLAYER_BASE_ATTACK_COUNT, PLAYER_BASE_ATTACK_DAMAGE, PLAYER_BASE_ATTACK_RANGE,
    PLAYER_BASE_MAX_HEALTH, PLAYER_BASE_SPEED, PLAYER_HIT_FLASH_MS, PLAYER_SIZE,
    UPGRADE_ATTACK_COUNT_PER_LEVEL, UPGRADE_ATTACK_DAMAGE_PER_LEVEL,
    UPGRADE_ATTACK_RANGE_PER_LEVEL, UPGRADE_MAX_HEALTH_PER_LEVEL, UPGRADE_MOVE_SPEED_PER_LEVEL,
};
use crate::geometry::Arena;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub position: Vec2,
    /// Units per second.
    pub move_speed: f32,
    pub attack_range: f32,
    /// How many targets the laser can hold at once.
    pub attack_count: usize,
    /// Damage per second against each target.
    pub attack_damage: f32,
    pub max_health: f32,
    pub health: f32,
    pub size: f32,
    /// Heading in radians, updated while moving.
    pub facing: f32,
    /// Simulation time (ms) of the last contact damage.
    pub last_damage_at: Option<f64>,
    /// Remaining hit-blink time for the presentation layer.
    pub hit_flash: f64,
}

impl Player {
    /// Stats are fixed at construction: `base + level × per_level`.
    pub fn new(position: Vec2, upgrades: &Upgrades) -> Self {
        let max_health =
            PLAYER_BASE_MAX_HEALTH + upgrades.max_health as f32 * UPGRADE_MAX_HEALTH_PER_LEVEL;
        Self {
            position,
            move_speed: PLAYER_BASE_SPEED
                + upgrades.move_speed as f32 * UPGRADE_MOVE_SPEED_PER_LEVEL,
            attack_range: PLAYER_BASE_ATTACK_RANGE
                + upgrades.attack_range as f32 * UPGRADE_ATTACK_RANGE_PER_LEVEL,
            attack_count: PLAYER_BASE_ATTACK_COUNT
                + upgrades.attack_count as usize * UPGRADE_ATTACK_COUNT_PER_LEVEL,
            attack_damage: PLAYER_BASE_ATTACK_DAMAGE
                + upgrades.attack_damage as f32 * UPGRADE_ATTACK_DAMAGE_PER_LEVEL,
            max_health,
            health: max_health,
            size: PLAYER_SIZE,
            facing: 0.0,
            last_damage_at: None,
            hit_flash: 0.0,
        }
    }

    /// Move along `movement` (any length; only its direction is used).
    pub fn update(&mut self, delta: f64, movement: Vec2, arena: &Arena) {
        self.hit_flash = (self.hit_flash - delta).max(0.0);

        if movement == Vec2::ZERO || !movement.is_finite() {
            return;
        }
        let dir = movement.normalize();
        let step = self.move_speed * (delta / 1000.0) as f32;
        self.position += dir * step;

        self.position.x = self.position.x.max(self.size).min(arena.width - self.size);
        self.position.y = self.position.y.max(self.size).min(arena.height - self.size);

        self.facing = dir.y.atan2(dir.x);
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        self.hit_flash = PLAYER_HIT_FLASH_MS;
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }
}
