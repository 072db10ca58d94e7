//! Laser Defense simulation engine.
//!
//! A top-down arena shooter: the player's laser auto-targets the nearest
//! threats while enemies, a boss, drifting asteroids and timed pickups fill
//! the arena until the clock or the player's health runs out.
//!
//! The crate holds only semantic state (positions, health, timers).  The
//! caller drives it one frame at a time with [`compute::tick`], passing the
//! elapsed milliseconds and a normalized movement vector, and reads the
//! returned [`events::GameEvent`]s plus the public state for presentation.
//!
//! ```rust,no_run
//! use glam::Vec2;
//! use laser_defense::compute::{init_state, tick};
//! use laser_defense::config::{GameSettings, LevelConfig, Upgrades};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut state = init_state(
//!     1,
//!     LevelConfig::builtin(1),
//!     Upgrades::default(),
//!     GameSettings::default(),
//! );
//! while state.is_playing() {
//!     let _events = tick(&mut state, Vec2::ZERO, 1000.0 / 60.0, &mut rng);
//! }
//! ```

pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod director;
pub mod entities;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod timer;
pub mod weapon;
