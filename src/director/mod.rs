//! Spawn directors.  Each one owns a collection of live instances and the
//! virtual-time timers that feed it.
//!
//! A director's inherent `update` always runs in the same order: tick the
//! timers (spawning), prune instances that went inactive, then advance the
//! survivors.

use glam::Vec2;

use crate::entities::Target;

pub mod asteroid;
pub mod enemy;
pub mod power_up;

pub use asteroid::AsteroidDirector;
pub use enemy::EnemyDirector;
pub use power_up::PowerUpDirector;

pub trait SpawnDirector {
    type Item;

    fn start_spawning(&mut self);
    /// Cancel every owned timer.  Calling it twice is harmless.
    fn stop_spawning(&mut self);
    fn is_spawning(&self) -> bool;
    fn live(&self) -> &[Self::Item];
    fn live_mut(&mut self) -> &mut [Self::Item];
}

/// Alive instances within `range` of `point`.
pub fn in_range<T: Target>(
    live: &mut [T],
    point: Vec2,
    range: f32,
) -> impl Iterator<Item = &mut T> {
    live.iter_mut()
        .filter(move |t| t.is_alive() && t.position().distance(point) <= range)
}
