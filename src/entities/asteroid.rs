//! Drifting asteroids.  No AI: a fixed velocity and spin from birth.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ASTEROID_DAMAGE, ASTEROID_DEATH_ANIMATION_MS, ASTEROID_DESPAWN_MARGIN,
    ASTEROID_MAX_ROTATION_SPEED,
};
use crate::entities::{DamageOutcome, EntityId, Target, Vitals};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::{random_between, Arena};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

/// Per-tier tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidStats {
    pub size: f32,
    pub health: f32,
    pub reward: u32,
}

impl AsteroidSize {
    pub fn stats(self) -> AsteroidStats {
        match self {
            AsteroidSize::Small => AsteroidStats {
                size: 16.0,
                health: 50.0,
                reward: 10,
            },
            AsteroidSize::Medium => AsteroidStats {
                size: 24.0,
                health: 100.0,
                reward: 20,
            },
            AsteroidSize::Large => AsteroidStats {
                size: 36.0,
                health: 200.0,
                reward: 40,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub tier: AsteroidSize,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub size: f32,
    pub reward: u32,
    pub damage: f32,
    pub vitals: Vitals,
}

impl Asteroid {
    pub fn new(
        id: EntityId,
        tier: AsteroidSize,
        position: Vec2,
        velocity: Vec2,
        rng: &mut impl Rng,
    ) -> Self {
        let stats = tier.stats();
        Self {
            id,
            tier,
            position,
            velocity,
            rotation: 0.0,
            rotation_speed: random_between(
                rng,
                -ASTEROID_MAX_ROTATION_SPEED,
                ASTEROID_MAX_ROTATION_SPEED,
            ),
            size: stats.size,
            reward: stats.reward,
            damage: ASTEROID_DAMAGE,
            vitals: Vitals::new(stats.health),
        }
    }

    pub fn is_active(&self) -> bool {
        self.vitals.is_active()
    }

    pub fn update(&mut self, delta: f64, arena: &Arena) {
        if !self.vitals.is_active() {
            return;
        }
        if self.vitals.is_dying() {
            self.vitals.advance_death(delta, ASTEROID_DEATH_ANIMATION_MS);
            return;
        }

        let secs = (delta / 1000.0) as f32;
        self.position += self.velocity * secs;
        self.rotation += self.rotation_speed * secs;

        if arena.is_beyond(self.position, ASTEROID_DESPAWN_MARGIN) {
            self.vitals.deactivate();
        }
    }

    /// Start the death and report the reward.  Later calls do nothing.
    pub fn die(&mut self, events: &mut EventQueue) -> bool {
        if !self.vitals.kill() {
            return false;
        }
        self.report_death(events);
        true
    }

    fn report_death(&self, events: &mut EventQueue) {
        log::debug!("asteroid {:?} ({:?}) destroyed", self.id, self.tier);
        events.push(GameEvent::AsteroidDestroyed {
            id: self.id,
            size: self.tier,
            reward: self.reward,
            position: self.position,
        });
    }
}

impl Target for Asteroid {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> DamageOutcome {
        let outcome = self.vitals.damage(amount);
        if outcome == DamageOutcome::Killed {
            self.report_death(events);
        }
        outcome
    }
}
