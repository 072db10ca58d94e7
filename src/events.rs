//! Things that happened during a frame.
//!
//! Entities and systems push events into an [`EventQueue`]; the
//! orchestrator drains it once per tick, does its own bookkeeping (coins,
//! kill counts) and hands the batch to the presentation layer.

use glam::Vec2;
use serde::Serialize;

use crate::entities::asteroid::AsteroidSize;
use crate::entities::power_up::PowerUpKind;
use crate::entities::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DamageSource {
    Asteroid,
    Bullet,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EndReason {
    BossDefeated,
    TimeUp,
    HealthDepleted,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    /// An enemy or boss died.  Reported exactly once per entity.
    EnemyKilled {
        id: EntityId,
        reward: u32,
        position: Vec2,
        is_boss: bool,
    },
    AsteroidDestroyed {
        id: EntityId,
        size: AsteroidSize,
        reward: u32,
        position: Vec2,
    },
    PlayerDamaged {
        amount: f32,
        source: DamageSource,
        health_left: f32,
    },
    /// A request for the presentation layer to shake the view.
    CameraShake { duration_ms: f64, intensity: f32 },
    BossSpawned { id: EntityId },
    BossModeChanged { id: EntityId, mode: u32 },
    PowerUpCollected { kind: PowerUpKind, value: f64 },
    LevelFinished { victory: bool, reason: EndReason },
}

/// FIFO buffer of [`GameEvent`]s for the current frame.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn shake(&mut self, duration_ms: f64, intensity: f32) {
        self.push(GameEvent::CameraShake {
            duration_ms,
            intensity,
        });
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
