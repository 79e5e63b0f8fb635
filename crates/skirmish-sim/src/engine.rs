//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity registry and the wave director,
//! consumes one `InputIntent` per tick, runs all systems in a fixed order,
//! and produces `Snapshot`s. Completely headless, enabling deterministic
//! testing.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::InputIntent;
use skirmish_core::components::Player;
use skirmish_core::config::{ConfigError, SessionConfig};
use skirmish_core::enums::{EnemyArchetype, Outcome, SessionPhase};
use skirmish_core::events::{GameEvent, TerminalEvent};
use skirmish_core::state::Snapshot;
use skirmish_core::types::{EnemyId, SimTime};

use crate::registry::Registry;
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::wave_director::WaveDirector;
use crate::world_setup;

/// The simulation engine. Owns the registry and all sim state.
pub struct SimulationEngine {
    config: SessionConfig,
    registry: Registry,
    waves: WaveDirector,
    time: SimTime,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    events: Vec<GameEvent>,
    movement_blocked: bool,
    terminal: Option<TerminalEvent>,
}

impl SimulationEngine {
    /// Validate `config` and set up a fresh session.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = world_setup::make_player(
            &config.player,
            config.arena.player_start,
            config.starting_weapon,
        );
        tracing::debug!(seed = config.seed, victory = ?config.victory, "session created");

        Ok(Self {
            registry: Registry::new(player),
            waves: WaveDirector::new(&config),
            time: SimTime::default(),
            phase: SessionPhase::Active,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            events: Vec::new(),
            movement_blocked: false,
            terminal: None,
            config,
        })
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Ticking an ended or stopped session changes nothing.
    pub fn tick(&mut self, intent: InputIntent) -> Snapshot {
        if matches!(self.phase, SessionPhase::Ended | SessionPhase::Stopped) {
            return self.snapshot();
        }

        if intent.pause {
            self.toggle_pause();
        }

        if self.phase == SessionPhase::Active {
            self.run_systems(&intent);
            self.time.advance();
            self.check_terminal();
            systems::cleanup::run(&mut self.registry);
        }

        self.snapshot()
    }

    /// Cancel the session immediately. Entities are released and no
    /// terminal event is emitted.
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        self.registry.clear();
        self.events.clear();
        self.phase = SessionPhase::Stopped;
        tracing::info!(tick = self.time.tick, "session stopped");
    }

    /// Spawn an enemy outside the wave schedule. It belongs to no wave.
    pub fn spawn_enemy(
        &mut self,
        archetype: EnemyArchetype,
        position: DVec2,
        patrol: Vec<DVec2>,
    ) -> EnemyId {
        world_setup::spawn_enemy(
            &mut self.registry,
            archetype,
            position,
            0,
            patrol,
            &self.config.difficulty,
            self.time.tick,
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        self.registry.player()
    }

    /// Mutable player access for scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        self.registry.player_mut()
    }

    /// Read-only access to the entity registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    /// The terminal event, once the session has ended.
    pub fn terminal_event(&self) -> Option<TerminalEvent> {
        self.terminal
    }

    fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Active => {
                self.phase = SessionPhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Active;
                self.events.push(GameEvent::Resumed);
            }
            SessionPhase::Ended | SessionPhase::Stopped => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, intent: &InputIntent) {
        let tick = self.time.tick;
        let mut blocked = Vec::new();

        // 1. Input intent
        let fire = systems::input::run(
            &mut self.registry,
            intent,
            &self.config.weapons,
            &mut self.events,
        );
        // 2. Player movement, then player fire
        systems::movement::run(&mut self.registry, &self.config.arena, &mut blocked);
        systems::weapons::run(&mut self.registry, &self.config.weapons, fire, &mut self.events);
        // 3. Enemy AI
        systems::ai::run(
            &mut self.registry,
            &self.config.arena,
            &mut self.rng,
            tick,
            &mut blocked,
            &mut self.events,
        );
        // 4. Projectile flight
        systems::projectiles::run(&mut self.registry, &self.config.arena);
        // 5. Collision detection and damage resolution
        let report = systems::collision::detect(&self.registry, blocked);
        self.movement_blocked = report.player_blocked();
        let kills = systems::resolver::apply(
            &mut self.registry,
            &report,
            &self.config.player,
            &mut self.events,
        );
        systems::resolver::regenerate(self.registry.player_mut(), &self.config.player);
        // 6. Wave bookkeeping
        self.waves.record_kills(&kills);
        self.waves.run(
            &mut self.registry,
            &self.config,
            &mut self.rng,
            tick,
            &mut self.events,
        );
    }

    /// Emit the terminal event the first time the session is decided.
    fn check_terminal(&mut self) {
        if self.terminal.is_some() {
            return;
        }
        let Some(outcome) = systems::resolver::detect_terminal(
            &self.config.victory,
            self.registry.player(),
            &self.waves,
            self.time.elapsed_secs,
        ) else {
            return;
        };

        let player = self.registry.player();
        let event = TerminalEvent {
            outcome,
            final_score: player.score,
            kills: player.kills,
            wave_reached: self.waves.index(),
            survival_secs: self.time.elapsed_secs,
        };
        match outcome {
            Outcome::Victory => {
                tracing::info!(score = event.final_score, kills = event.kills, "session won")
            }
            Outcome::Defeat => {
                tracing::info!(score = event.final_score, wave = event.wave_reached, "session lost")
            }
        }
        self.terminal = Some(event);
        self.phase = SessionPhase::Ended;
        self.events.push(GameEvent::SessionEnded { outcome });
    }

    fn snapshot(&mut self) -> Snapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.registry,
            SnapshotInputs {
                time: &self.time,
                phase: self.phase,
                config: &self.config,
                waves: &self.waves,
                movement_blocked: self.movement_blocked,
                events,
                terminal: self.terminal,
            },
        )
    }
}
