//! Hostile projectiles.

use glam::Vec2;
use serde::Serialize;

use crate::constants::{BULLET_DESPAWN_MARGIN, BULLET_LIFETIME_MS, BULLET_SIZE, BULLET_SPEED};
use crate::geometry::{angle_to, Arena};

/// A straight-flying enemy bullet.  The heading is fixed when it is fired.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage: f32,
    pub size: f32,
    /// Milliseconds since it was fired.
    pub age: f64,
    pub active: bool,
}

impl Projectile {
    /// Fire from `origin` toward the point `target`.  Later movement of the
    /// target has no effect on the flight path.
    pub fn aimed(origin: Vec2, target: Vec2, damage: f32) -> Self {
        Self::with_angle(origin, angle_to(origin, target), damage)
    }

    /// Fire from `origin` along `angle` radians.
    pub fn with_angle(origin: Vec2, angle: f32, damage: f32) -> Self {
        Self {
            position: origin,
            velocity: Vec2::from_angle(angle) * BULLET_SPEED,
            damage,
            size: BULLET_SIZE,
            age: 0.0,
            active: true,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.velocity.normalize_or_zero()
    }

    pub fn update(&mut self, delta: f64, arena: &Arena) {
        if !self.active {
            return;
        }
        self.age += delta;
        if self.age >= BULLET_LIFETIME_MS {
            self.active = false;
            return;
        }
        self.position += self.velocity * (delta / 1000.0) as f32;
        if arena.is_beyond(self.position, BULLET_DESPAWN_MARGIN) {
            self.active = false;
        }
    }

    pub fn destroy(&mut self) {
        self.active = false;
    }
}

/// Drop spent projectiles, then advance the rest.
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, delta: f64, arena: &Arena) {
    projectiles.retain(|p| p.active);
    for p in projectiles.iter_mut() {
        p.update(delta, arena);
    }
}
