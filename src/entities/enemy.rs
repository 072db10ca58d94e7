//! Regular enemies: wander the arena and snipe at the player when close.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EnemySchedule;
use crate::constants::{
    ENEMY_ARRIVE_DISTANCE, ENEMY_DEATH_ANIMATION_MS, ENEMY_WANDER_MARGIN, ENEMY_WANDER_MAX_MS,
    ENEMY_WANDER_MIN_MS,
};
use crate::entities::{DamageOutcome, EntityId, Projectile, Target, Vitals};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::{step_toward, Arena};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    /// The classic level boss: an oversized enemy with the regular AI.
    Boss,
}

/// Per-archetype tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyArchetype {
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    pub reward: u32,
    pub damage: f32,
    pub shoot_range: f32,
    pub shoot_interval: f64,
}

impl EnemyKind {
    pub fn archetype(self) -> EnemyArchetype {
        match self {
            EnemyKind::Basic => EnemyArchetype {
                size: 20.0,
                speed: 85.0,
                health: 100.0,
                reward: 24,
                damage: 1.0,
                shoot_range: 160.0,
                shoot_interval: 2200.0,
            },
            EnemyKind::Fast => EnemyArchetype {
                size: 16.0,
                speed: 150.0,
                health: 70.0,
                reward: 36,
                damage: 1.0,
                shoot_range: 150.0,
                shoot_interval: 1600.0,
            },
            EnemyKind::Tank => EnemyArchetype {
                size: 32.0,
                speed: 55.0,
                health: 300.0,
                reward: 70,
                damage: 1.0,
                shoot_range: 190.0,
                shoot_interval: 2800.0,
            },
            EnemyKind::Boss => EnemyArchetype {
                size: 48.0,
                speed: 60.0,
                health: 1000.0,
                reward: 300,
                damage: 1.0,
                shoot_range: 220.0,
                shoot_interval: 1200.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    /// Current wander destination.
    pub target_position: Vec2,
    pub speed: f32,
    pub size: f32,
    pub reward: u32,
    /// Contact and bullet damage.
    pub damage: f32,
    pub shoot_range: f32,
    pub shoot_interval: f64,
    pub since_last_shot: f64,
    pub wander_timer: f64,
    pub wander_duration: f64,
    pub vitals: Vitals,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        position: Vec2,
        arena: &Arena,
        rng: &mut impl Rng,
    ) -> Self {
        let a = kind.archetype();
        let mut enemy = Self {
            id,
            kind,
            position,
            target_position: position,
            speed: a.speed,
            size: a.size,
            reward: a.reward,
            damage: a.damage,
            shoot_range: a.shoot_range,
            shoot_interval: a.shoot_interval,
            // Ready to fire on arrival.
            since_last_shot: a.shoot_interval,
            wander_timer: 0.0,
            wander_duration: random_wander_duration(rng),
            vitals: Vitals::new(a.health),
        };
        enemy.pick_wander_target(arena, rng);
        enemy
    }

    /// Apply a level schedule's stat overrides.
    pub fn with_schedule(mut self, schedule: &EnemySchedule) -> Self {
        self.apply_overrides(schedule.speed, schedule.health, schedule.reward, schedule.damage);
        self
    }

    pub fn apply_overrides(
        &mut self,
        speed: Option<f32>,
        health: Option<f32>,
        reward: Option<u32>,
        damage: Option<f32>,
    ) {
        if let Some(speed) = speed {
            self.speed = speed;
        }
        if let Some(health) = health {
            self.vitals.reset_max(health);
        }
        if let Some(reward) = reward {
            self.reward = reward;
        }
        if let Some(damage) = damage {
            self.damage = damage;
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    pub fn is_active(&self) -> bool {
        self.vitals.is_active()
    }

    fn pick_wander_target(&mut self, arena: &Arena, rng: &mut impl Rng) {
        self.target_position = arena.random_interior(ENEMY_WANDER_MARGIN, rng);
    }

    pub fn update(
        &mut self,
        delta: f64,
        player: Vec2,
        arena: &Arena,
        rng: &mut impl Rng,
        shots: &mut Vec<Projectile>,
    ) {
        if !self.vitals.is_active() {
            return;
        }
        if self.vitals.is_dying() {
            self.vitals.advance_death(delta, ENEMY_DEATH_ANIMATION_MS);
            return;
        }

        self.wander_timer += delta;
        if self.wander_timer >= self.wander_duration {
            self.wander_timer = 0.0;
            self.wander_duration = random_wander_duration(rng);
            self.pick_wander_target(arena, rng);
        }

        if self.position.distance(self.target_position) > ENEMY_ARRIVE_DISTANCE {
            let step = self.speed * (delta / 1000.0) as f32;
            self.position = step_toward(self.position, self.target_position, step);
        }

        self.since_last_shot += delta;
        if self.position.distance(player) <= self.shoot_range
            && self.since_last_shot >= self.shoot_interval
        {
            shots.push(Projectile::aimed(self.position, player, self.damage));
            self.since_last_shot = 0.0;
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
        log::debug!("enemy {:?} ({:?}) killed, reward {}", self.id, self.kind, self.reward);
        events.push(GameEvent::EnemyKilled {
            id: self.id,
            reward: self.reward,
            position: self.position,
            is_boss: self.is_boss(),
        });
    }
}

impl Target for Enemy {
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

fn random_wander_duration(rng: &mut impl Rng) -> f64 {
    rng.gen_range(ENEMY_WANDER_MIN_MS..=ENEMY_WANDER_MAX_MS) as f64
}
