//! The per-frame orchestrator.
//!
//! A `GameState` owns everything in one level attempt: the player, the three
//! spawn directors, enemy projectiles, the weapon and the event queue.
//! [`tick`] advances it by one frame of `delta` milliseconds.  All
//! randomness comes through the injected RNG, so a seeded RNG and a fixed
//! delta sequence replay a level exactly.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::collision;
use crate::config::{GameSettings, LevelConfig, Upgrades};
use crate::constants::{UPGRADE_COIN_MULTIPLIER_PER_LEVEL, UPGRADE_INITIAL_TIME_PER_LEVEL};
use crate::director::{self, AsteroidDirector, EnemyDirector, PowerUpDirector, SpawnDirector};
use crate::entities::bullet::update_projectiles;
use crate::entities::{Player, Projectile, Target};
use crate::events::{EndReason, EventQueue, GameEvent};
use crate::weapon::WeaponSystem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    Victory,
    Defeat,
}

/// Settlement of a finished level.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    pub level_id: u32,
    pub victory: bool,
    pub reason: EndReason,
    /// Seconds of simulated play.
    pub elapsed_time: f64,
    pub remaining_time: f64,
    pub coins_earned: u32,
    pub enemies_killed: u32,
    pub power_ups_collected: u32,
    pub completion_reward: u32,
    pub time_reward: u32,
    pub multiplier: f64,
    /// Coins to bank: the full settlement on victory, only kill coins on defeat.
    pub final_reward: u32,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub level_id: u32,
    pub config: LevelConfig,
    pub upgrades: Upgrades,
    pub settings: GameSettings,
    pub player: Player,
    pub enemies: EnemyDirector,
    pub asteroids: AsteroidDirector,
    pub power_ups: PowerUpDirector,
    pub projectiles: Vec<Projectile>,
    pub weapon: WeaponSystem,
    pub events: EventQueue,
    /// Seconds left on the level clock.
    pub remaining_time: f64,
    /// Milliseconds of simulated time since the level started.
    pub elapsed_ms: f64,
    pub coins: u32,
    pub kills: u32,
    pub power_ups_collected: u32,
    pub status: GameStatus,
    pub paused: bool,
    pub result: Option<LevelResult>,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the starting state for a level and start every director.
pub fn init_state(
    level_id: u32,
    config: LevelConfig,
    upgrades: Upgrades,
    settings: GameSettings,
) -> GameState {
    let arena = settings.arena;
    let remaining_time =
        config.base_time + upgrades.initial_time as f64 * UPGRADE_INITIAL_TIME_PER_LEVEL;

    let mut enemies = EnemyDirector::new(&config);
    let mut asteroids = AsteroidDirector::new(config.asteroid_config());
    let mut power_ups = PowerUpDirector::new();
    enemies.start_spawning();
    asteroids.start_spawning();
    power_ups.start_spawning();

    log::info!("level {level_id} started with {remaining_time}s on the clock");

    GameState {
        level_id,
        player: Player::new(arena.center(), &upgrades),
        config,
        upgrades,
        settings,
        enemies,
        asteroids,
        power_ups,
        projectiles: Vec::new(),
        weapon: WeaponSystem::new(),
        events: EventQueue::new(),
        remaining_time,
        elapsed_ms: 0.0,
        coins: 0,
        kills: 0,
        power_ups_collected: 0,
        status: GameStatus::Playing,
        paused: false,
        result: None,
    }
}

pub fn toggle_pause(state: &mut GameState) {
    if state.is_playing() {
        state.paused = !state.paused;
        log::debug!("paused: {}", state.paused);
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the level by `delta` milliseconds with the player steering along
/// `movement`.  Returns the frame's events, oldest first.  Does nothing
/// while paused or after the level has ended.
pub fn tick(
    state: &mut GameState,
    movement: Vec2,
    delta: f64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    if !state.is_playing() || state.paused || !(delta > 0.0) {
        return Vec::new();
    }
    let arena = state.settings.arena;

    // ── 1. Level clock ───────────────────────────────────────────────────────
    state.elapsed_ms += delta;
    state.remaining_time -= delta / 1000.0;
    if state.remaining_time <= 0.0 {
        state.remaining_time = 0.0;
        finish(state, false, EndReason::TimeUp);
        return settle_events(state);
    }

    // ── 2. Player ────────────────────────────────────────────────────────────
    state.player.update(delta, movement, &arena);

    // ── 3. Hostiles, hazards, projectiles ────────────────────────────────────
    let player_pos = state.player.position;
    state.enemies.update(
        delta,
        player_pos,
        &arena,
        rng,
        &mut state.projectiles,
        &mut state.events,
    );
    state.asteroids.update(delta, &arena, rng);
    update_projectiles(&mut state.projectiles, delta, &arena);

    // ── 4. Contact damage ────────────────────────────────────────────────────
    let now = state.elapsed_ms;
    collision::resolve_asteroid_contacts(
        &mut state.player,
        state.asteroids.live(),
        now,
        &mut state.events,
    );
    collision::resolve_bullet_contacts(
        &mut state.player,
        &mut state.projectiles,
        now,
        &mut state.events,
    );
    if state.settings.enemy_contact_damage {
        collision::resolve_enemy_contacts(
            &mut state.player,
            state.enemies.live(),
            now,
            &mut state.events,
        );
    }

    // ── 5. Laser ─────────────────────────────────────────────────────────────
    let origin = state.player.position;
    let range = state.player.attack_range;
    let mut candidates: Vec<&mut dyn Target> = Vec::new();
    for hostile in director::in_range(state.enemies.live_mut(), origin, range) {
        candidates.push(hostile);
    }
    for asteroid in director::in_range(state.asteroids.live_mut(), origin, range) {
        candidates.push(asteroid);
    }
    state
        .weapon
        .update(&state.player, candidates, &arena, &mut state.events);

    // ── 6. Pickups ───────────────────────────────────────────────────────────
    state.power_ups.update(delta, &arena, rng);
    let gained =
        collision::collect_power_ups(&state.player, state.power_ups.live_mut(), &mut state.events);
    state.remaining_time += gained;

    // ── 7. End conditions ────────────────────────────────────────────────────
    let mut out = settle_events(state);
    if state.player.is_dead() {
        finish(state, false, EndReason::HealthDepleted);
    } else if state.enemies.boss_defeated() {
        finish(state, true, EndReason::BossDefeated);
    }
    out.extend(settle_events(state));
    out
}

/// Drain the queue, booking coins, kills and pickups on the way.
fn settle_events(state: &mut GameState) -> Vec<GameEvent> {
    let events = state.events.drain();
    for event in &events {
        match event {
            GameEvent::EnemyKilled { reward, .. } | GameEvent::AsteroidDestroyed { reward, .. } => {
                state.coins += reward;
                state.kills += 1;
            }
            GameEvent::PowerUpCollected { .. } => state.power_ups_collected += 1,
            _ => {}
        }
    }
    events
}

/// End the level.  Only the first call has any effect.
pub fn finish(state: &mut GameState, victory: bool, reason: EndReason) {
    if !state.is_playing() {
        return;
    }
    state.status = if victory {
        GameStatus::Victory
    } else {
        GameStatus::Defeat
    };
    state.paused = false;
    state.enemies.stop_spawning();
    state.asteroids.stop_spawning();
    state.power_ups.stop_spawning();
    state.weapon.clear();

    let result = settle(state, victory, reason);
    log::info!(
        "level {} over ({reason:?}): {} coins earned, {} to bank",
        state.level_id,
        result.coins_earned,
        result.final_reward
    );
    state.result = Some(result);
    state.events.push(GameEvent::LevelFinished { victory, reason });
}

fn settle(state: &GameState, victory: bool, reason: EndReason) -> LevelResult {
    let coin_level = state.upgrades.coin_multiplier;
    let multiplier = 1.0 + coin_level as f64 * UPGRADE_COIN_MULTIPLIER_PER_LEVEL;
    let (completion_reward, time_reward, final_reward) = if victory {
        let completion = state.config.rewards.completion;
        let time = (state.remaining_time * state.config.rewards.time_bonus).floor().max(0.0) as u32;
        let subtotal = state.coins as u64 + completion as u64 + time as u64;
        // Multiplier steps are tenths: scale in integers to keep the floor exact.
        let total = subtotal * (10 + coin_level as u64) / 10;
        (completion, time, total.min(u32::MAX as u64) as u32)
    } else {
        (0, 0, state.coins)
    };
    LevelResult {
        level_id: state.level_id,
        victory,
        reason,
        elapsed_time: state.elapsed_ms / 1000.0,
        remaining_time: state.remaining_time,
        coins_earned: state.coins,
        enemies_killed: state.kills,
        power_ups_collected: state.power_ups_collected,
        completion_reward,
        time_reward,
        multiplier,
        final_reward,
    }
}
