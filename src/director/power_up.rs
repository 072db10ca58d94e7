//! Periodic time pickups.

use rand::Rng;

use crate::constants::{POWERUP_SPAWN_INTERVAL_MS, POWERUP_SPAWN_PADDING};
use crate::director::SpawnDirector;
use crate::entities::{PowerUp, PowerUpKind};
use crate::geometry::Arena;
use crate::timer::RepeatingTimer;

#[derive(Clone, Debug, Default)]
pub struct PowerUpDirector {
    timer: Option<RepeatingTimer>,
    power_ups: Vec<PowerUp>,
}

impl PowerUpDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, delta: f64, arena: &Arena, rng: &mut impl Rng) {
        let due = self.timer.as_mut().map_or(0, |t| t.tick(delta));
        for _ in 0..due {
            let position = arena.random_interior(POWERUP_SPAWN_PADDING, rng);
            log::debug!("time pickup appeared at {position}");
            self.power_ups.push(PowerUp::new(PowerUpKind::Time, position));
        }

        self.power_ups.retain(|p| p.active);
        for power_up in self.power_ups.iter_mut() {
            power_up.update(delta);
        }
    }
}

impl SpawnDirector for PowerUpDirector {
    type Item = PowerUp;

    fn start_spawning(&mut self) {
        self.timer = Some(RepeatingTimer::new(POWERUP_SPAWN_INTERVAL_MS));
    }

    fn stop_spawning(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
    }

    fn is_spawning(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    fn live(&self) -> &[PowerUp] {
        &self.power_ups
    }

    fn live_mut(&mut self) -> &mut [PowerUp] {
        &mut self.power_ups
    }
}
