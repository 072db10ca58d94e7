//! Anything in the enemy collection: a regular enemy or a pattern boss.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::entities::{Boss, DamageOutcome, Enemy, EntityId, Projectile, Target, Vitals};
use crate::events::EventQueue;
use crate::geometry::Arena;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Hostile {
    Grunt(Enemy),
    Boss(Boss),
}

impl Hostile {
    pub fn vitals(&self) -> &Vitals {
        match self {
            Hostile::Grunt(e) => &e.vitals,
            Hostile::Boss(b) => &b.vitals,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Hostile::Grunt(e) => e.size,
            Hostile::Boss(b) => b.size,
        }
    }

    pub fn damage(&self) -> f32 {
        match self {
            Hostile::Grunt(e) => e.damage,
            Hostile::Boss(b) => b.damage,
        }
    }

    pub fn reward(&self) -> u32 {
        match self {
            Hostile::Grunt(e) => e.reward,
            Hostile::Boss(b) => b.reward,
        }
    }

    /// Boss-archetype enemies count as bosses too.
    pub fn is_boss(&self) -> bool {
        match self {
            Hostile::Grunt(e) => e.is_boss(),
            Hostile::Boss(_) => true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.vitals().is_active()
    }

    pub fn update(
        &mut self,
        delta: f64,
        player: Vec2,
        arena: &Arena,
        rng: &mut impl Rng,
        shots: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        match self {
            Hostile::Grunt(e) => e.update(delta, player, arena, rng, shots),
            Hostile::Boss(b) => b.update(delta, player, arena, rng, shots, events),
        }
    }

    pub fn die(&mut self, events: &mut EventQueue) -> bool {
        match self {
            Hostile::Grunt(e) => e.die(events),
            Hostile::Boss(b) => b.die(events),
        }
    }
}

impl Target for Hostile {
    fn id(&self) -> EntityId {
        match self {
            Hostile::Grunt(e) => e.id,
            Hostile::Boss(b) => b.id,
        }
    }

    fn position(&self) -> Vec2 {
        match self {
            Hostile::Grunt(e) => e.position,
            Hostile::Boss(b) => b.position,
        }
    }

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }

    fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> DamageOutcome {
        match self {
            Hostile::Grunt(e) => e.take_damage(amount, events),
            Hostile::Boss(b) => b.take_damage(amount, events),
        }
    }
}
