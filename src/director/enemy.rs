//! Enemy waves and the level boss.

use glam::Vec2;
use rand::Rng;

use crate::config::{BossConfig, BossStyle, EnemySchedule, EnemyType, LevelConfig};
use crate::constants::{
    BOSS_SPAWN_Y, CLASSIC_BOSS_DAMAGE, CLASSIC_BOSS_HEALTH, CLASSIC_BOSS_REWARD,
    CLASSIC_BOSS_SPEED, MAX_ENEMIES, PATTERN_BOSS_DEFAULT_TIER, SPAWN_EDGE_PADDING,
};
use crate::director::SpawnDirector;
use crate::entities::{Boss, Enemy, EnemyKind, EntityId, Hostile, Projectile, Target};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Arena;
use crate::timer::{DelayedCall, RepeatingTimer};

const BOSS_ARRIVAL_SHAKE: (f64, f32) = (300.0, 0.01);

#[derive(Clone, Debug)]
struct Wave {
    schedule: EnemySchedule,
    timer: RepeatingTimer,
}

#[derive(Clone, Debug)]
pub struct EnemyDirector {
    schedules: Vec<EnemySchedule>,
    boss_config: BossConfig,
    /// Milliseconds from start until the boss is due.
    boss_delay: f64,
    waves: Vec<Wave>,
    boss_call: Option<DelayedCall>,
    boss_id: Option<EntityId>,
    boss_defeated: bool,
    enemies: Vec<Hostile>,
    next_id: u32,
}

impl EnemyDirector {
    pub fn new(level: &LevelConfig) -> Self {
        Self {
            schedules: level.enemies.clone(),
            boss_config: level.boss.clone().unwrap_or_default(),
            boss_delay: level.boss_spawn_time * 1000.0,
            waves: Vec::new(),
            boss_call: None,
            boss_id: None,
            boss_defeated: false,
            enemies: Vec::new(),
            next_id: 0,
        }
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
        // ── Spawning ──
        for i in 0..self.waves.len() {
            let fired = self.waves[i].timer.tick(delta);
            for _ in 0..fired {
                if self.live_count() >= MAX_ENEMIES {
                    log::debug!("enemy cap reached, skipping {:?}", self.waves[i].schedule.kind);
                    continue;
                }
                let schedule = self.waves[i].schedule.clone();
                self.spawn_scheduled(&schedule, arena, rng);
            }
        }

        if let Some(call) = self.boss_call.as_mut() {
            call.advance(delta);
        }
        let boss_due = self.boss_call.as_ref().is_some_and(DelayedCall::is_due);
        if boss_due && self.boss_id.is_none() && self.live_count() < MAX_ENEMIES {
            if let Some(call) = self.boss_call.as_mut() {
                call.complete();
            }
            self.spawn_boss(arena, rng, events);
        }

        // ── Prune, then advance ──
        self.enemies.retain(Hostile::is_active);
        for enemy in self.enemies.iter_mut() {
            enemy.update(delta, player, arena, rng, shots, events);
        }

        if let Some(id) = self.boss_id {
            if !self.boss_defeated && !self.enemies.iter().any(|e| e.id() == id && e.is_active()) {
                log::info!("level boss {id:?} defeated");
                self.boss_defeated = true;
            }
        }
    }

    /// Hostiles that have not finished dying.
    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_id.is_some()
    }

    pub fn boss(&self) -> Option<&Hostile> {
        let id = self.boss_id?;
        self.enemies.iter().find(|e| e.id() == id)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::Hostile(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_scheduled(&mut self, schedule: &EnemySchedule, arena: &Arena, rng: &mut impl Rng) {
        let (_, position) = arena.random_edge_point(SPAWN_EDGE_PADDING, rng);
        let id = self.allocate_id();
        let hostile = match schedule.kind {
            EnemyType::PatternBoss => {
                let tier = schedule.boss_type.unwrap_or(PATTERN_BOSS_DEFAULT_TIER);
                let mut boss = Boss::new(id, tier, position, arena, rng);
                boss.apply_overrides(None, schedule.health, schedule.reward);
                Hostile::Boss(boss)
            }
            kind => {
                let kind = match kind {
                    EnemyType::Fast => EnemyKind::Fast,
                    EnemyType::Tank => EnemyKind::Tank,
                    EnemyType::Boss => EnemyKind::Boss,
                    _ => EnemyKind::Basic,
                };
                Hostile::Grunt(Enemy::new(id, kind, position, arena, rng).with_schedule(schedule))
            }
        };
        log::debug!("spawned {:?} {id:?} at {position}", schedule.kind);
        self.enemies.push(hostile);
    }

    fn spawn_boss(&mut self, arena: &Arena, rng: &mut impl Rng, events: &mut EventQueue) {
        let config = self.boss_config.clone();
        let position = Vec2::new(arena.width / 2.0, BOSS_SPAWN_Y);
        let id = self.allocate_id();
        let hostile = match config.style {
            BossStyle::PatternBoss | BossStyle::UltimateBoss => {
                let mut boss = Boss::new(id, config.boss_type.unwrap_or(1), position, arena, rng);
                boss.apply_overrides(config.speed, config.health, config.reward);
                Hostile::Boss(boss)
            }
            BossStyle::Classic => {
                let mut enemy = Enemy::new(id, EnemyKind::Boss, position, arena, rng);
                enemy.apply_overrides(
                    Some(config.speed.unwrap_or(CLASSIC_BOSS_SPEED)),
                    Some(config.health.unwrap_or(CLASSIC_BOSS_HEALTH)),
                    Some(config.reward.unwrap_or(CLASSIC_BOSS_REWARD)),
                    Some(config.damage.unwrap_or(CLASSIC_BOSS_DAMAGE)),
                );
                Hostile::Grunt(enemy)
            }
        };
        log::info!("level boss {id:?} ({:?}) arrived", config.style);
        self.enemies.push(hostile);
        self.boss_id = Some(id);
        events.push(GameEvent::BossSpawned { id });
        events.shake(BOSS_ARRIVAL_SHAKE.0, BOSS_ARRIVAL_SHAKE.1);
    }
}

impl SpawnDirector for EnemyDirector {
    type Item = Hostile;

    fn start_spawning(&mut self) {
        self.waves = self
            .schedules
            .iter()
            .map(|schedule| Wave {
                schedule: schedule.clone(),
                timer: RepeatingTimer::new(schedule.spawn_rate),
            })
            .collect();
        if self.boss_id.is_none() {
            self.boss_call = Some(DelayedCall::new(self.boss_delay));
        }
    }

    fn stop_spawning(&mut self) {
        for wave in self.waves.iter_mut() {
            wave.timer.cancel();
        }
        if let Some(call) = self.boss_call.as_mut() {
            call.complete();
        }
    }

    fn is_spawning(&self) -> bool {
        self.waves.iter().any(|w| !w.timer.is_cancelled())
            || self.boss_call.as_ref().is_some_and(|c| !c.has_fired())
    }

    fn live(&self) -> &[Hostile] {
        &self.enemies
    }

    fn live_mut(&mut self) -> &mut [Hostile] {
        &mut self.enemies
    }
}
