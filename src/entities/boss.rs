//! The pattern boss: roams the upper half of the arena and cycles through
//! attack modes.  Tiers from [`BOSS_ULTIMATE_TIER`] up skip the mode cycle
//! and pick one of four bulk volleys at random instead.
//!
//! Staggered volleys are queued on the boss's own clock and silently
//! dropped once the boss stops being alive.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::constants::{
    BOSS_ARRIVE_DISTANCE, BOSS_ATTACK_INTERVAL_STEP_MS, BOSS_ATTACK_MODE_DURATION_MS,
    BOSS_BASE_ATTACK_INTERVAL_MS, BOSS_BASE_HEALTH, BOSS_BASE_REWARD, BOSS_CLAMP_BAND,
    BOSS_DAMAGE, BOSS_DEATH_ANIMATION_MS, BOSS_HEALTH_PER_TIER, BOSS_MAX_TIER,
    BOSS_MIN_ATTACK_INTERVAL_MS, BOSS_REWARD_PER_TIER, BOSS_SIZE, BOSS_SPEED, BOSS_ULTIMATE_TIER,
    BOSS_WANDER_BAND, BOSS_WANDER_MAX_MS, BOSS_WANDER_MIN_MS,
};
use crate::entities::{DamageOutcome, EntityId, Projectile, Target, Vitals};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::{angle_to, random_between, step_toward, Arena};
use crate::timer::TIMER_EPSILON_MS;

// ── Volley shapes ─────────────────────────────────────────────────────────────

const SPIRAL_SHOTS: u32 = 24;
const SPIRAL_PHASE_DIVISOR_MS: f64 = 500.0;
const TRIPLE_RING_WAVES: u32 = 3;
const TRIPLE_RING_SPACING_MS: f64 = 150.0;
const TRIPLE_RING_SHOTS: u32 = 12;
const CROSSFIRE_DIRECTIONS: u32 = 8;
const CROSSFIRE_SHOTS: u32 = 5;
const CROSSFIRE_SPACING_MS: f64 = 100.0;
const BARRAGE_SHOTS: u32 = 30;
const BARRAGE_SPACING_MS: f64 = 50.0;
const SPREAD_ARC: f32 = PI / 6.0;
const WAVE_SHOTS: u32 = 5;
const WAVE_SPACING_MS: f64 = 100.0;

const HIT_SHAKE: (f64, f32) = (80.0, 0.004);
const DEATH_SHAKE: (f64, f32) = (500.0, 0.02);

/// One shot waiting on the boss's clock.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PendingShot {
    /// A ring of the triple-ring volley, centred on the angle from the boss's
    /// position at fire time toward `target`.
    Ring { target: Vec2 },
    /// A fixed heading.
    Ray { angle: f32 },
    /// A heading drawn when the shot fires.
    Scatter,
    /// Shot `index` of the wave volley around `base`.
    Wave { base: f32, index: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PendingAction {
    /// Boss clock time (ms) at which the shot fires.
    pub due: f64,
    pub shot: PendingShot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Boss {
    pub id: EntityId,
    pub tier: u32,
    pub position: Vec2,
    pub target_position: Vec2,
    pub speed: f32,
    pub size: f32,
    pub reward: u32,
    pub damage: f32,
    pub attack_mode: u32,
    pub mode_timer: f64,
    pub attack_interval: f64,
    pub since_last_attack: f64,
    pub wander_timer: f64,
    pub wander_duration: f64,
    /// Milliseconds since spawn; drives the spiral phase and the queue.
    pub clock: f64,
    pub pending: Vec<PendingAction>,
    pub vitals: Vitals,
}

impl Boss {
    pub fn new(id: EntityId, tier: u32, position: Vec2, arena: &Arena, rng: &mut impl Rng) -> Self {
        let tier = tier.clamp(1, BOSS_MAX_TIER);
        // from tier 8 on the formula reaches zero; hold it at one volley per 100 ms
        let attack_interval = (BOSS_BASE_ATTACK_INTERVAL_MS
            - tier as f64 * BOSS_ATTACK_INTERVAL_STEP_MS)
            .max(BOSS_MIN_ATTACK_INTERVAL_MS);
        Self {
            id,
            tier,
            position,
            target_position: Vec2::new(arena.width / 2.0, arena.height * 0.25),
            speed: BOSS_SPEED,
            size: BOSS_SIZE,
            reward: BOSS_BASE_REWARD + tier * BOSS_REWARD_PER_TIER,
            damage: BOSS_DAMAGE,
            attack_mode: 0,
            mode_timer: 0.0,
            attack_interval,
            since_last_attack: attack_interval,
            wander_timer: 0.0,
            wander_duration: random_wander_duration(rng),
            clock: 0.0,
            pending: Vec::new(),
            vitals: Vitals::new(BOSS_BASE_HEALTH + tier as f32 * BOSS_HEALTH_PER_TIER),
        }
    }

    pub fn apply_overrides(&mut self, speed: Option<f32>, health: Option<f32>, reward: Option<u32>) {
        if let Some(speed) = speed {
            self.speed = speed;
        }
        if let Some(health) = health {
            self.vitals.reset_max(health);
        }
        if let Some(reward) = reward {
            self.reward = reward;
        }
    }

    pub fn is_ultimate(&self) -> bool {
        self.tier >= BOSS_ULTIMATE_TIER
    }

    /// Number of modes in the cycle.
    pub fn mode_count(&self) -> u32 {
        1 + self.tier
    }

    pub fn is_active(&self) -> bool {
        self.vitals.is_active()
    }

    pub fn update(
        &mut self,
        delta: f64,
        player: Vec2,
        arena: &Arena,
        rng: &mut impl Rng,
        shots: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        if !self.vitals.is_active() {
            return;
        }
        if self.vitals.is_dying() {
            self.vitals.advance_death(delta, BOSS_DEATH_ANIMATION_MS);
            return;
        }
        self.clock += delta;

        // ── Movement ──
        self.wander_timer += delta;
        if self.wander_timer >= self.wander_duration {
            self.wander_timer = 0.0;
            self.wander_duration = random_wander_duration(rng);
            self.pick_wander_target(arena, rng);
        }
        if self.position.distance(self.target_position) > BOSS_ARRIVE_DISTANCE {
            let step = self.speed * (delta / 1000.0) as f32;
            self.position = step_toward(self.position, self.target_position, step);
        }
        self.position.x = self.position.x.max(self.size).min(arena.width - self.size);
        self.position.y = self.position.y.max(self.size).min(arena.height * BOSS_CLAMP_BAND);

        // ── Mode cycle ──
        if !self.is_ultimate() {
            self.mode_timer += delta;
            if self.mode_timer >= BOSS_ATTACK_MODE_DURATION_MS {
                self.mode_timer = 0.0;
                self.attack_mode = (self.attack_mode + 1) % self.mode_count();
                log::info!("boss {:?} switched to attack mode {}", self.id, self.attack_mode);
                events.push(GameEvent::BossModeChanged {
                    id: self.id,
                    mode: self.attack_mode,
                });
            }
        }

        // ── Attacks ──
        self.since_last_attack += delta;
        if self.since_last_attack >= self.attack_interval {
            self.since_last_attack = 0.0;
            self.attack(player, rng, shots);
        }
        self.fire_due(rng, shots);
    }

    fn pick_wander_target(&mut self, arena: &Arena, rng: &mut impl Rng) {
        let margin = self.size * 2.0;
        self.target_position = Vec2::new(
            random_between(rng, margin, arena.width - margin),
            random_between(rng, margin, arena.height * BOSS_WANDER_BAND),
        );
    }

    fn attack(&mut self, player: Vec2, rng: &mut impl Rng, shots: &mut Vec<Projectile>) {
        if self.is_ultimate() {
            match rng.gen_range(0..4) {
                0 => self.spiral(shots),
                1 => self.triple_ring(player),
                2 => self.crossfire(),
                _ => self.barrage(),
            }
            return;
        }
        match self.attack_mode {
            0 => shots.push(Projectile::aimed(self.position, player, self.damage)),
            1 => self.spread(player, shots),
            2 => self.circle(shots),
            _ => self.wave(player),
        }
    }

    fn spread(&self, player: Vec2, shots: &mut Vec<Projectile>) {
        let count = 3 + self.tier;
        let base = angle_to(self.position, player);
        let half = (count - 1) as f32 / 2.0;
        for i in 0..count {
            let angle = base + (i as f32 - half) * SPREAD_ARC / (count - 1) as f32;
            shots.push(Projectile::with_angle(self.position, angle, self.damage));
        }
    }

    fn circle(&self, shots: &mut Vec<Projectile>) {
        let count = 8 + 2 * self.tier;
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            shots.push(Projectile::with_angle(self.position, angle, self.damage));
        }
    }

    fn wave(&mut self, player: Vec2) {
        let base = angle_to(self.position, player);
        for index in 0..WAVE_SHOTS {
            self.schedule(index as f64 * WAVE_SPACING_MS, PendingShot::Wave { base, index });
        }
    }

    fn spiral(&self, shots: &mut Vec<Projectile>) {
        let phase = (self.clock / SPIRAL_PHASE_DIVISOR_MS) as f32;
        for i in 0..SPIRAL_SHOTS {
            let angle = i as f32 / SPIRAL_SHOTS as f32 * TAU + phase;
            shots.push(Projectile::with_angle(self.position, angle, self.damage));
        }
    }

    fn triple_ring(&mut self, player: Vec2) {
        for ring in 0..TRIPLE_RING_WAVES {
            self.schedule(
                ring as f64 * TRIPLE_RING_SPACING_MS,
                PendingShot::Ring { target: player },
            );
        }
    }

    fn crossfire(&mut self) {
        for dir in 0..CROSSFIRE_DIRECTIONS {
            let angle = dir as f32 / CROSSFIRE_DIRECTIONS as f32 * TAU;
            for j in 0..CROSSFIRE_SHOTS {
                self.schedule(j as f64 * CROSSFIRE_SPACING_MS, PendingShot::Ray { angle });
            }
        }
    }

    fn barrage(&mut self) {
        for i in 0..BARRAGE_SHOTS {
            self.schedule(i as f64 * BARRAGE_SPACING_MS, PendingShot::Scatter);
        }
    }

    fn schedule(&mut self, offset: f64, shot: PendingShot) {
        self.pending.push(PendingAction {
            due: self.clock + offset,
            shot,
        });
    }

    /// Fire every queued shot whose time has come, in scheduling order.
    fn fire_due(&mut self, rng: &mut impl Rng, shots: &mut Vec<Projectile>) {
        if self.pending.is_empty() || !self.vitals.is_alive() {
            return;
        }
        let now = self.clock + TIMER_EPSILON_MS;
        let (due, waiting): (Vec<PendingAction>, Vec<PendingAction>) =
            self.pending.drain(..).partition(|a| a.due <= now);
        self.pending = waiting;

        for action in due {
            match action.shot {
                PendingShot::Ring { target } => {
                    let base = angle_to(self.position, target);
                    for i in 0..TRIPLE_RING_SHOTS {
                        let spread = (i as f32 - 5.5) * (PI / 12.0);
                        shots.push(Projectile::with_angle(self.position, base + spread, self.damage));
                    }
                }
                PendingShot::Ray { angle } => {
                    shots.push(Projectile::with_angle(self.position, angle, self.damage));
                }
                PendingShot::Scatter => {
                    let angle = rng.gen_range(0.0..TAU);
                    shots.push(Projectile::with_angle(self.position, angle, self.damage));
                }
                PendingShot::Wave { base, index } => {
                    let angle = base + (index as f32 * 0.5).sin() * 0.5;
                    shots.push(Projectile::with_angle(self.position, angle, self.damage));
                }
            }
        }
    }

    /// Start the death and report the reward.  Later calls do nothing.
    pub fn die(&mut self, events: &mut EventQueue) -> bool {
        if !self.vitals.kill() {
            return false;
        }
        self.report_death(events);
        true
    }

    fn report_death(&mut self, events: &mut EventQueue) {
        self.pending.clear();
        log::info!("boss {:?} (tier {}) destroyed, reward {}", self.id, self.tier, self.reward);
        events.shake(DEATH_SHAKE.0, DEATH_SHAKE.1);
        events.push(GameEvent::EnemyKilled {
            id: self.id,
            reward: self.reward,
            position: self.position,
            is_boss: true,
        });
    }
}

impl Target for Boss {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> DamageOutcome {
        let outcome = self.vitals.damage(amount);
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => events.shake(HIT_SHAKE.0, HIT_SHAKE.1),
            DamageOutcome::Killed => {
                events.shake(HIT_SHAKE.0, HIT_SHAKE.1);
                self.report_death(events);
            }
        }
        outcome
    }
}

fn random_wander_duration(rng: &mut impl Rng) -> f64 {
    rng.gen_range(BOSS_WANDER_MIN_MS..=BOSS_WANDER_MAX_MS) as f64
}
