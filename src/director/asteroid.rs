//! Asteroid field.

use glam::Vec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config::AsteroidConfig;
use crate::constants::{
    ASTEROID_BURST_SPACING_MS, ASTEROID_DRIFT_SPEED, ASTEROID_INWARD_MAX_SPEED,
    ASTEROID_INWARD_MIN_SPEED, ASTEROID_SPAWN_PADDING,
};
use crate::director::SpawnDirector;
use crate::entities::{Asteroid, AsteroidSize, EntityId};
use crate::geometry::{random_between, Arena, Edge};
use crate::timer::{DelayedCall, RepeatingTimer};

#[derive(Clone, Debug)]
pub struct AsteroidDirector {
    config: AsteroidConfig,
    timer: Option<RepeatingTimer>,
    /// The opening burst, one call per asteroid.
    burst: Vec<DelayedCall>,
    asteroids: Vec<Asteroid>,
    next_id: u32,
}

impl AsteroidDirector {
    pub fn new(config: AsteroidConfig) -> Self {
        Self {
            config,
            timer: None,
            burst: Vec::new(),
            asteroids: Vec::new(),
            next_id: 0,
        }
    }

    pub fn update(&mut self, delta: f64, arena: &Arena, rng: &mut impl Rng) {
        let mut due = 0;
        for call in self.burst.iter_mut() {
            if call.tick(delta) {
                due += 1;
            }
        }
        self.burst.retain(|c| !c.has_fired());
        if let Some(timer) = self.timer.as_mut() {
            due += timer.tick(delta);
        }
        for _ in 0..due {
            self.spawn(arena, rng);
        }

        self.asteroids.retain(Asteroid::is_active);
        for asteroid in self.asteroids.iter_mut() {
            asteroid.update(delta, arena);
        }
    }

    /// Draw a size weighted by the size ratio.
    pub fn pick_size(&self, rng: &mut impl Rng) -> AsteroidSize {
        let ratio = self.config.size_ratio;
        let sizes = [AsteroidSize::Small, AsteroidSize::Medium, AsteroidSize::Large];
        let weights = [ratio.small, ratio.medium, ratio.large].map(u64::from);
        match WeightedIndex::new(weights) {
            Ok(weights) => sizes[weights.sample(rng)],
            Err(err) => {
                log::warn!("unusable asteroid size ratio {ratio:?}: {err}");
                AsteroidSize::Small
            }
        }
    }

    pub fn spawn(&mut self, arena: &Arena, rng: &mut impl Rng) {
        let tier = self.pick_size(rng);
        let (edge, position) = arena.random_edge_point(ASTEROID_SPAWN_PADDING, rng);
        let drift = random_between(rng, -ASTEROID_DRIFT_SPEED, ASTEROID_DRIFT_SPEED);
        let inward = random_between(rng, ASTEROID_INWARD_MIN_SPEED, ASTEROID_INWARD_MAX_SPEED);
        let velocity = match edge {
            Edge::Top => Vec2::new(drift, inward),
            Edge::Right => Vec2::new(-inward, drift),
            Edge::Bottom => Vec2::new(drift, -inward),
            Edge::Left => Vec2::new(inward, drift),
        };
        let id = EntityId::Asteroid(self.next_id);
        self.next_id += 1;
        log::debug!("spawned {tier:?} asteroid {id:?} at {position}");
        self.asteroids.push(Asteroid::new(id, tier, position, velocity, rng));
    }
}

impl SpawnDirector for AsteroidDirector {
    type Item = Asteroid;

    fn start_spawning(&mut self) {
        self.timer = Some(RepeatingTimer::new(self.config.spawn_interval));
        self.burst = (0..self.config.initial_count)
            .map(|i| DelayedCall::new(i as f64 * ASTEROID_BURST_SPACING_MS))
            .collect();
    }

    fn stop_spawning(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.burst.clear();
    }

    fn is_spawning(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    fn live(&self) -> &[Asteroid] {
        &self.asteroids
    }

    fn live_mut(&mut self) -> &mut [Asteroid] {
        &mut self.asteroids
    }
}
