//! Wave director: starts waves, trickles spawns, detects wave clears.
//!
//! Unlike the other systems this carries state between ticks, owned by
//! the engine alongside the registry.

use glam::DVec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand_chacha::ChaCha8Rng;

use skirmish_core::arena::Arena;
use skirmish_core::components::{Body, Health};
use skirmish_core::config::{SessionConfig, VictoryCondition, WaveRules};
use skirmish_core::constants::{secs_to_ticks, ARCHETYPE_WAVE_BIAS, MAX_SPAWN_ATTEMPTS};
use skirmish_core::enums::EnemyArchetype;
use skirmish_core::events::GameEvent;
use skirmish_core::geometry::circles_overlap;
use skirmish_core::state::WaveView;
use skirmish_core::types::SimTime;

use skirmish_ai::profiles::get_profile;

use crate::registry::Registry;
use crate::systems::resolver::KillRecord;
use crate::world_setup;

#[derive(Debug, Clone)]
pub struct WaveDirector {
    rules: WaveRules,
    /// Last wave to run, when the session is won by clearing waves.
    final_wave: Option<u32>,
    first_wave: u32,
    /// Current wave index (0 before the first wave).
    index: u32,
    target: u32,
    spawned: u32,
    kills: u32,
    in_progress: bool,
    next_spawn_tick: u64,
    next_wave_tick: Option<u64>,
    spawn_cursor: usize,
    cleared: u32,
}

impl WaveDirector {
    pub fn new(config: &SessionConfig) -> Self {
        let final_wave = match config.victory {
            VictoryCondition::ClearWaves { final_wave } => Some(final_wave),
            _ => None,
        };
        Self {
            rules: config.waves,
            final_wave,
            first_wave: config.starting_wave.max(1),
            index: config.starting_wave.saturating_sub(1),
            target: 0,
            spawned: 0,
            kills: 0,
            in_progress: false,
            next_spawn_tick: 0,
            next_wave_tick: config.waves.enabled.then_some(0),
            spawn_cursor: 0,
            cleared: 0,
        }
    }

    /// Current wave index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of waves cleared this session.
    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Waves this session has to clear to win, counted from its starting wave.
    pub fn waves_to_clear(&self) -> Option<u32> {
        self.final_wave.map(|last| (last + 1).saturating_sub(self.first_wave))
    }

    /// True once the final wave of a `ClearWaves` session has been cleared.
    pub fn final_wave_cleared(&self) -> bool {
        !self.in_progress
            && self.cleared > 0
            && self.final_wave.is_some_and(|last| self.index >= last)
    }

    /// Tally kills of enemies belonging to the current wave.
    pub fn record_kills(&mut self, kills: &[KillRecord]) {
        if !self.in_progress {
            return;
        }
        self.kills += kills.iter().filter(|k| k.wave == self.index).count() as u32;
    }

    /// One tick of wave bookkeeping: start, spawn, clear.
    pub fn run(
        &mut self,
        registry: &mut Registry,
        config: &SessionConfig,
        rng: &mut ChaCha8Rng,
        current_tick: u64,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.rules.enabled {
            return;
        }

        if !self.in_progress {
            match self.next_wave_tick {
                Some(at) if current_tick >= at => self.start_wave(current_tick, events),
                _ => return,
            }
        }

        if self.spawned < self.target && current_tick >= self.next_spawn_tick {
            self.spawn_one(registry, config, rng, current_tick, events);
        }

        if self.spawned >= self.target
            && registry.live_enemy_count() == 0
            && self.kills >= self.target
        {
            self.clear_wave(registry, current_tick, events);
        }
    }

    fn start_wave(&mut self, current_tick: u64, events: &mut Vec<GameEvent>) {
        self.index += 1;
        self.target = self.rules.enemy_count(self.index);
        self.spawned = 0;
        self.kills = 0;
        self.in_progress = true;
        self.next_wave_tick = None;
        self.next_spawn_tick = current_tick;
        tracing::info!(wave = self.index, enemies = self.target, "wave started");
        events.push(GameEvent::WaveStarted {
            wave: self.index,
            enemy_count: self.target,
        });
    }

    fn spawn_one(
        &mut self,
        registry: &mut Registry,
        config: &SessionConfig,
        rng: &mut ChaCha8Rng,
        current_tick: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let archetype = pick_archetype(config, self.index, rng);
        let radius = get_profile(archetype).radius;

        let points = &config.arena.spawn_points;
        let attempts = MAX_SPAWN_ATTEMPTS.min(points.len());
        let found = (0..attempts)
            .map(|offset| (self.spawn_cursor + offset) % points.len())
            .find(|&i| spawn_point_is_valid(registry, &config.arena, points[i], radius));

        let Some(slot) = found else {
            tracing::debug!(wave = self.index, attempts, "no valid spawn point, deferring");
            events.push(GameEvent::SpawnDeferred { wave: self.index });
            self.next_spawn_tick = current_tick + 1;
            return;
        };

        let position = points[slot];
        self.spawn_cursor = (slot + 1) % points.len();
        let enemy_id = world_setup::spawn_enemy(
            registry,
            archetype,
            position,
            self.index,
            Vec::new(),
            &config.difficulty,
            current_tick,
        );
        self.spawned += 1;
        self.next_spawn_tick = current_tick + self.rules.spawn_interval_ticks.max(1);
        events.push(GameEvent::EnemySpawned {
            enemy_id,
            archetype,
            position,
        });
    }

    fn clear_wave(
        &mut self,
        registry: &mut Registry,
        current_tick: u64,
        events: &mut Vec<GameEvent>,
    ) {
        self.in_progress = false;
        self.cleared += 1;
        let bonus = self.rules.clear_bonus * self.index as u64;
        registry.player_mut().score += bonus;
        tracing::info!(wave = self.index, bonus, "wave cleared");
        events.push(GameEvent::WaveCleared {
            wave: self.index,
            bonus,
        });

        if self.final_wave.is_some_and(|last| self.index >= last) {
            return;
        }
        self.next_wave_tick = Some(current_tick + secs_to_ticks(self.rules.grace_secs));
    }

    /// Enemies of the current wave still waiting to spawn.
    pub fn pending_spawns(&self) -> u32 {
        self.target.saturating_sub(self.spawned)
    }

    pub fn view(&self, time: &SimTime) -> WaveView {
        let next_wave_in_secs = match self.next_wave_tick {
            Some(at) if !self.in_progress => Some(at.saturating_sub(time.tick) as f64 * time.dt()),
            _ => None,
        };
        WaveView {
            index: self.index,
            target_count: self.target,
            kills_this_wave: self.kills,
            enemies_remaining: self.target.saturating_sub(self.kills),
            next_wave_in_secs,
        }
    }
}

/// Sample an archetype from the enabled set. With wave weighting on, higher
/// tiers gain weight as the wave index grows.
fn pick_archetype(config: &SessionConfig, wave: u32, rng: &mut ChaCha8Rng) -> EnemyArchetype {
    let enabled = &config.enabled_archetypes;
    let weights: Vec<f64> = enabled
        .iter()
        .map(|archetype| {
            if config.difficulty.weight_archetypes_by_wave {
                1.0 + archetype.tier() as f64 * wave.saturating_sub(1) as f64 * ARCHETYPE_WAVE_BIAS
            } else {
                1.0
            }
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => enabled[dist.sample(rng)],
        Err(_) => enabled.first().copied().unwrap_or(EnemyArchetype::Drone),
    }
}

/// Inside bounds, outside every obstacle, and clear of live enemies and the player.
fn spawn_point_is_valid(registry: &Registry, arena: &Arena, point: DVec2, radius: f64) -> bool {
    if !arena.is_open(point) {
        return false;
    }
    let player = registry.player();
    if circles_overlap(point, radius, player.position, player.radius) {
        return false;
    }
    let mut query = registry.world().query::<(&Body, &Health)>();
    let blocked = query
        .iter()
        .any(|(_, (body, health))| {
            !health.0.is_depleted() && circles_overlap(point, radius, body.position, body.radius)
        });
    !blocked
}
