//! Player contact checks and pickup collection.
//!
//! All contact damage shares one cooldown: after a hit the player is immune
//! to every source for [`COLLISION_DAMAGE_COOLDOWN_MS`].

use glam::Vec2;

use crate::constants::{COLLISION_DAMAGE_COOLDOWN_MS, POWERUP_PICKUP_DISTANCE};
use crate::entities::{Asteroid, Hostile, Player, PowerUp, PowerUpKind, Projectile, Target};
use crate::events::{DamageSource, EventQueue, GameEvent};
use crate::timer::TIMER_EPSILON_MS;

const HAZARD_SHAKE: (f64, f32) = (150.0, 0.008);
const ENEMY_SHAKE: (f64, f32) = (100.0, 0.005);

/// True if the player may take contact damage at simulation time `now`.
pub fn can_take_contact(player: &Player, now: f64) -> bool {
    match player.last_damage_at {
        None => true,
        Some(last) => now - last + TIMER_EPSILON_MS >= COLLISION_DAMAGE_COOLDOWN_MS,
    }
}

fn touches(player: &Player, position: Vec2, size: f32) -> bool {
    player.position.distance(position) < (player.size + size) / 2.0
}

/// Damage the player if the cooldown allows.  Returns whether it landed.
fn try_hit(
    player: &mut Player,
    amount: f32,
    source: DamageSource,
    shake: (f64, f32),
    now: f64,
    events: &mut EventQueue,
) -> bool {
    if !can_take_contact(player, now) {
        return false;
    }
    player.take_damage(amount);
    player.last_damage_at = Some(now);
    log::debug!("player hit by {source:?} for {amount}, {} left", player.health);
    events.push(GameEvent::PlayerDamaged {
        amount,
        source,
        health_left: player.health,
    });
    events.shake(shake.0, shake.1);
    true
}

pub fn resolve_asteroid_contacts(
    player: &mut Player,
    asteroids: &[Asteroid],
    now: f64,
    events: &mut EventQueue,
) {
    for asteroid in asteroids.iter().filter(|a| a.is_alive()) {
        if touches(player, asteroid.position, asteroid.size) {
            try_hit(player, asteroid.damage, DamageSource::Asteroid, HAZARD_SHAKE, now, events);
        }
    }
}

/// A bullet is spent only when it actually deals damage; during the
/// cooldown it flies on.
pub fn resolve_bullet_contacts(
    player: &mut Player,
    projectiles: &mut [Projectile],
    now: f64,
    events: &mut EventQueue,
) {
    for bullet in projectiles.iter_mut().filter(|p| p.active) {
        if touches(player, bullet.position, bullet.size)
            && try_hit(player, bullet.damage, DamageSource::Bullet, HAZARD_SHAKE, now, events)
        {
            bullet.destroy();
        }
    }
}

pub fn resolve_enemy_contacts(
    player: &mut Player,
    hostiles: &[Hostile],
    now: f64,
    events: &mut EventQueue,
) {
    for hostile in hostiles.iter().filter(|h| h.is_alive()) {
        if touches(player, hostile.position(), hostile.size()) {
            try_hit(player, hostile.damage(), DamageSource::Enemy, ENEMY_SHAKE, now, events);
        }
    }
}

/// Pick up every pickup within reach.  Returns the seconds of level time
/// gained.
pub fn collect_power_ups(
    player: &Player,
    power_ups: &mut [PowerUp],
    events: &mut EventQueue,
) -> f64 {
    let mut gained = 0.0;
    for power_up in power_ups.iter_mut().filter(|p| p.active) {
        if player.position.distance(power_up.position) >= POWERUP_PICKUP_DISTANCE {
            continue;
        }
        power_up.collect();
        match power_up.kind {
            PowerUpKind::Time => gained += power_up.value,
        }
        log::debug!("collected {:?} pickup worth {}", power_up.kind, power_up.value);
        events.push(GameEvent::PowerUpCollected {
            kind: power_up.kind,
            value: power_up.value,
        });
    }
    gained
}
