//! Arena-space helpers: bounds, edge spawning and beam clipping.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};

/// The fixed logical play area.  Origin is the top-left corner, `y` grows
/// downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// True once `p` is further than `margin` outside any edge.
    pub fn is_beyond(&self, p: Vec2, margin: f32) -> bool {
        p.x < -margin
            || p.x > self.width + margin
            || p.y < -margin
            || p.y > self.height + margin
    }

    /// A uniformly random point at least `inset` away from every edge.
    pub fn random_interior(&self, inset: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            random_between(rng, inset, self.width - inset),
            random_between(rng, inset, self.height - inset),
        )
    }

    /// A random point `padding` outside one of the four edges.
    pub fn random_edge_point(&self, padding: f32, rng: &mut impl Rng) -> (Edge, Vec2) {
        let edge = Edge::random(rng);
        let p = match edge {
            Edge::Top => Vec2::new(random_between(rng, 0.0, self.width), -padding),
            Edge::Right => Vec2::new(self.width + padding, random_between(rng, 0.0, self.height)),
            Edge::Bottom => Vec2::new(random_between(rng, 0.0, self.width), self.height + padding),
            Edge::Left => Vec2::new(-padding, random_between(rng, 0.0, self.height)),
        };
        (edge, p)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Left,
        }
    }
}

/// Inclusive random float; tolerates an empty or inverted range by
/// returning `lo`.
pub fn random_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Angle of the vector `from → to`, in radians.
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Move `from` a distance of `step` along the heading toward `to`.
pub fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let angle = angle_to(from, to);
    from + Vec2::from_angle(angle) * step
}

/// End point of a beam from `origin` toward `target`, truncated at the first
/// arena boundary the segment crosses.
///
/// Only axes on which the target lies outside the arena are tested, so a
/// target inside the arena is returned unchanged.
pub fn clip_beam(origin: Vec2, target: Vec2, arena: &Arena) -> Vec2 {
    let delta = target - origin;
    let distance = delta.length();
    if distance <= 0.0 {
        return target;
    }
    let dir = delta / distance;

    let mut max_dist = distance;
    if target.x < 0.0 {
        max_dist = max_dist.min(-origin.x / dir.x);
    }
    if target.x > arena.width {
        max_dist = max_dist.min((arena.width - origin.x) / dir.x);
    }
    if target.y < 0.0 {
        max_dist = max_dist.min(-origin.y / dir.y);
    }
    if target.y > arena.height {
        max_dist = max_dist.min((arena.height - origin.y) / dir.y);
    }

    origin + dir * max_dist
}
