//! Simulated objects: the player, hostiles, hazards, projectiles, pickups.
//!
//! Entities hold semantic state only (positions, health, timers).  Anything
//! visual is left to whoever reads them.

pub mod asteroid;
pub mod boss;
pub mod bullet;
pub mod enemy;
pub mod hostile;
pub mod player;
pub mod power_up;
pub mod vitals;

use glam::Vec2;
use serde::Serialize;

use crate::events::EventQueue;

pub use asteroid::{Asteroid, AsteroidSize};
pub use boss::Boss;
pub use bullet::Projectile;
pub use enemy::{Enemy, EnemyKind};
pub use hostile::Hostile;
pub use player::Player;
pub use power_up::{PowerUp, PowerUpKind};
pub use vitals::{DamageOutcome, Vitals};

/// Identity of a damageable entity, unique within one level attempt.
/// The director that owns the entity allocates the serial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityId {
    Hostile(u32),
    Asteroid(u32),
}

/// Something the player's laser can lock onto.
pub trait Target {
    fn id(&self) -> EntityId;
    fn position(&self) -> Vec2;
    /// Alive and not already playing its death animation.
    fn is_alive(&self) -> bool;
    /// Apply damage; a killing blow reports the death into `events` once.
    fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> DamageOutcome;
}
