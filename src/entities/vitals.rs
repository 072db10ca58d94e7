//! Health and the alive → dying → gone lifecycle shared by enemies, bosses
//! and asteroids.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DamageOutcome {
    /// The entity was already dying or gone; nothing changed.
    Ignored,
    Hurt,
    /// This hit started the death.  Only ever returned once per entity.
    Killed,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Vitals {
    health: f32,
    max_health: f32,
    /// Latched on the first hit; the health bar is hidden until then.
    health_bar_visible: bool,
    /// Time spent in the death animation, `None` while alive.
    dying_for: Option<f64>,
    active: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            health_bar_visible: false,
            dying_for: None,
            active: true,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction of maximum, for health bars.
    pub fn fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    pub fn health_bar_visible(&self) -> bool {
        self.health_bar_visible
    }

    pub fn is_alive(&self) -> bool {
        self.active && self.dying_for.is_none()
    }

    pub fn is_dying(&self) -> bool {
        self.active && self.dying_for.is_some()
    }

    /// False once the entity should be dropped from its collection.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health_bar_visible = true;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.health <= 0.0 {
            self.dying_for = Some(0.0);
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Starts the death directly.  Returns `false` if it had already started.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = 0.0;
        self.dying_for = Some(0.0);
        true
    }

    /// Advance the death animation; the entity deactivates once it has
    /// lasted `window` ms.
    pub fn advance_death(&mut self, delta: f64, window: f64) {
        if let Some(t) = self.dying_for.as_mut() {
            *t += delta;
            if *t + crate::timer::TIMER_EPSILON_MS >= window {
                self.active = false;
            }
        }
    }

    /// Remove without a death (left the arena, level over).
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Replace the maximum and refill, used for level overrides at spawn.
    pub fn reset_max(&mut self, max_health: f32) {
        self.max_health = max_health.max(0.0);
        self.health = self.max_health;
    }
}
