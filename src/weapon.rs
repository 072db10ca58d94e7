//! The player's auto-targeting laser.

use glam::Vec2;
use serde::Serialize;

use crate::constants::DAMAGE_TICK_RATE;
use crate::entities::{EntityId, Player, Target};
use crate::events::EventQueue;
use crate::geometry::{clip_beam, Arena};

/// One drawn laser, already clipped to the arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Beam {
    pub target: EntityId,
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct WeaponSystem {
    targets: Vec<EntityId>,
    beams: Vec<Beam>,
}

impl WeaponSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock onto the closest `attack_count` candidates and burn them.
    ///
    /// `candidates` should already be limited to the player's attack range;
    /// ties in distance keep the order they were supplied in.  Damage is a
    /// fixed `attack_damage / 60` per call whatever the frame delta.
    pub fn update(
        &mut self,
        player: &Player,
        mut candidates: Vec<&mut dyn Target>,
        arena: &Arena,
        events: &mut EventQueue,
    ) {
        self.targets.clear();
        self.beams.clear();

        candidates.retain(|c| c.is_alive());
        if candidates.is_empty() {
            return;
        }

        let origin = player.position;
        candidates.sort_by(|a, b| {
            let da = a.position().distance(origin);
            let db = b.position().distance(origin);
            da.total_cmp(&db)
        });
        candidates.truncate(player.attack_count);

        let damage = player.attack_damage / DAMAGE_TICK_RATE;
        for target in candidates {
            target.take_damage(damage, events);
            self.targets.push(target.id());
            self.beams.push(Beam {
                target: target.id(),
                from: origin,
                to: clip_beam(origin, target.position(), arena),
            });
        }
    }

    pub fn targets(&self) -> &[EntityId] {
        &self.targets
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.beams.clear();
    }
}
