//! Timed pickups.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::POWERUP_BLINK_HALF_PERIOD_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Adds `value` seconds to the level clock.
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpStats {
    pub size: f32,
    pub value: f64,
    pub lifetime_ms: f64,
    pub blink_start_ms: f64,
}

impl PowerUpKind {
    pub fn stats(self) -> PowerUpStats {
        match self {
            PowerUpKind::Time => PowerUpStats {
                size: 20.0,
                value: 15.0,
                lifetime_ms: 10_000.0,
                blink_start_ms: 7_000.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PowerUp {
    pub position: Vec2,
    pub kind: PowerUpKind,
    pub value: f64,
    pub size: f32,
    pub lifetime: f64,
    pub blink_start: f64,
    /// Milliseconds since it appeared.
    pub age: f64,
    pub visible: bool,
    pub active: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2) -> Self {
        let stats = kind.stats();
        Self::with_timing(kind, position, stats.value, stats.lifetime_ms, stats.blink_start_ms)
    }

    pub fn with_timing(
        kind: PowerUpKind,
        position: Vec2,
        value: f64,
        lifetime: f64,
        blink_start: f64,
    ) -> Self {
        Self {
            position,
            kind,
            value,
            size: kind.stats().size,
            lifetime,
            blink_start,
            age: 0.0,
            visible: true,
            active: true,
        }
    }

    pub fn update(&mut self, delta: f64) {
        if !self.active {
            return;
        }
        self.age += delta;
        if self.age >= self.lifetime {
            self.active = false;
            return;
        }
        if self.is_blinking() {
            let half = POWERUP_BLINK_HALF_PERIOD_MS;
            self.visible = ((self.age % (half * 2.0)) / half).floor() == 0.0;
        }
    }

    /// In the expiry-warning phase.
    pub fn is_blinking(&self) -> bool {
        self.active && self.age >= self.blink_start
    }

    pub fn collect(&mut self) {
        self.active = false;
    }
}
