//! Tests for the engine, registry, collision, resolver and wave director.

use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::arena::Arena;
use skirmish_core::commands::InputIntent;
use skirmish_core::components::{Body, Health, ProjectileState};
use skirmish_core::config::{Difficulty, PlayerTuning, SessionConfig, VictoryCondition, WaveRules};
use skirmish_core::constants::PROJECTILE_RADIUS;
use skirmish_core::enums::{DifficultyLevel, EnemyArchetype, GameMode, Outcome, SessionPhase};
use skirmish_core::events::GameEvent;
use skirmish_core::geometry::Rect;
use skirmish_core::types::{ActorId, ProjectileId, SimTime};

use crate::engine::SimulationEngine;
use crate::registry::Registry;
use crate::scenario::build_config;
use crate::systems::collision::{detect, probe_move, CollisionReport, ProjectileHit};
use crate::systems::resolver::{self, KillRecord};
use crate::systems::wave_director::WaveDirector;
use crate::world_setup;

fn sandbox_engine() -> SimulationEngine {
    SimulationEngine::new(SessionConfig::sandbox()).unwrap()
}

fn no_waves() -> WaveDirector {
    WaveDirector::new(&SessionConfig::sandbox())
}

fn empty_registry() -> Registry {
    let player = world_setup::make_player(&PlayerTuning::default(), DVec2::ZERO, 0);
    Registry::new(player)
}

fn spawn_drone(registry: &mut Registry, position: DVec2) -> u32 {
    world_setup::spawn_enemy(
        registry,
        EnemyArchetype::Drone,
        position,
        0,
        Vec::new(),
        &Difficulty::default(),
        0,
    )
}

/// A stationary player projectile at `position`.
fn place_projectile(registry: &mut Registry, position: DVec2, damage: f64) -> ProjectileId {
    registry.spawn_projectile(
        Body {
            position,
            velocity: DVec2::ZERO,
            radius: PROJECTILE_RADIUS,
        },
        ProjectileState {
            id: 0,
            direction: DVec2::X,
            speed: 0.0,
            damage,
            from_player: true,
            owner: None,
            age_ticks: 0,
            lifespan_ticks: 100,
            consumed: false,
        },
    )
}

fn projectile_consumed(registry: &Registry, id: ProjectileId) -> bool {
    let entity = registry.projectile(id).unwrap();
    registry.world().get::<&ProjectileState>(entity).unwrap().consumed
}

fn busy_intent(tick: u64) -> InputIntent {
    InputIntent {
        move_up: tick % 90 < 45,
        move_down: tick % 90 >= 45,
        move_right: tick % 40 < 20,
        aim: Some(DVec2::new(1.0, (tick % 7) as f64 - 3.0)),
        fire: true,
        ..InputIntent::idle()
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SessionConfig {
        seed: 12345,
        ..SessionConfig::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone()).unwrap();
    let mut engine_b = SimulationEngine::new(config).unwrap();

    for tick in 0..600 {
        let snap_a = engine_a.tick(busy_intent(tick));
        let snap_b = engine_b.tick(busy_intent(tick));

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SessionConfig {
        seed: 111,
        ..SessionConfig::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SessionConfig {
        seed: 222,
        ..SessionConfig::default()
    })
    .unwrap();

    // Wander points and archetype rolls come from the seeded RNG.
    let mut diverged = false;
    for _ in 0..200 {
        let json_a = serde_json::to_string(&engine_a.tick(InputIntent::idle())).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(InputIntent::idle())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Clock ----

#[test]
fn test_tick_timing_60_ticks_one_second() {
    let mut engine = sandbox_engine();
    for _ in 0..60 {
        engine.tick(InputIntent::idle());
    }
    assert_eq!(engine.time().tick, 60);
    assert!(
        (engine.time().elapsed_secs - 1.0).abs() < 1e-10,
        "60 ticks should equal 1.0 seconds, got {}",
        engine.time().elapsed_secs
    );
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = sandbox_engine();
    engine.spawn_enemy(EnemyArchetype::Drone, DVec2::new(100.0, 0.0), Vec::new());
    for _ in 0..10 {
        engine.tick(InputIntent::idle());
    }

    let toggled = engine.tick(InputIntent::pause());
    assert_eq!(toggled.phase, SessionPhase::Paused);
    assert!(toggled.events.contains(&GameEvent::Paused));
    assert_eq!(engine.time().tick, 10, "Pause tick should not advance time");

    let frozen = serde_json::to_string(&engine.tick(busy_intent(3))).unwrap();
    for tick in 0..20 {
        let snap = engine.tick(busy_intent(tick));
        assert_eq!(serde_json::to_string(&snap).unwrap(), frozen);
    }
    assert_eq!(engine.time().tick, 10);

    let resumed = engine.tick(InputIntent::pause());
    assert_eq!(resumed.phase, SessionPhase::Active);
    assert!(resumed.events.contains(&GameEvent::Resumed));
    assert_eq!(engine.time().tick, 11);
}

#[test]
fn test_stop_releases_entities_without_terminal_event() {
    let mut engine = sandbox_engine();
    engine.spawn_enemy(EnemyArchetype::Tank, DVec2::new(200.0, 0.0), Vec::new());
    engine.spawn_enemy(EnemyArchetype::Robot, DVec2::new(-200.0, 0.0), Vec::new());
    for _ in 0..5 {
        engine.tick(InputIntent {
            fire: true,
            ..InputIntent::idle()
        });
    }

    engine.stop();
    assert_eq!(engine.phase(), SessionPhase::Stopped);
    assert_eq!(engine.registry().enemy_count(), 0);
    assert_eq!(engine.registry().projectile_count(), 0);
    assert!(engine.terminal_event().is_none());

    let snap = engine.tick(InputIntent::idle());
    assert_eq!(engine.time().tick, 5);
    assert!(snap.terminal.is_none());
    assert!(snap.enemies.is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let config = SessionConfig {
        weapons: Vec::new(),
        ..SessionConfig::default()
    };
    assert!(SimulationEngine::new(config).is_err());
}

// ---- Registry ----

#[test]
fn test_registry_ids_never_reused() {
    let mut registry = empty_registry();
    let a = spawn_drone(&mut registry, DVec2::new(10.0, 0.0));
    let b = spawn_drone(&mut registry, DVec2::new(20.0, 0.0));
    assert_eq!((a, b), (0, 1));

    registry.mark_enemy_for_removal(a);
    assert_eq!(registry.enemy_count(), 2, "Removal is deferred until compaction");
    assert_eq!(registry.compact(), 1);
    assert_eq!(registry.enemy_count(), 1);

    let c = spawn_drone(&mut registry, DVec2::new(30.0, 0.0));
    assert_eq!(c, 2);
    assert_eq!(registry.enemy_ids(), vec![1, 2]);
    assert_eq!(registry.resolve_target(ActorId::Enemy(a)), None);
    assert_eq!(
        registry.resolve_target(ActorId::Enemy(b)),
        Some(DVec2::new(20.0, 0.0))
    );
}

#[test]
fn test_defeated_player_is_not_a_target() {
    let mut registry = empty_registry();
    assert_eq!(registry.resolve_target(ActorId::Player), Some(DVec2::ZERO));
    registry.player_mut().health.drain(1000.0);
    assert_eq!(registry.resolve_target(ActorId::Player), None);
}

// ---- Collision ----

#[test]
fn test_probe_move_rejects_blocked_axis_only() {
    let arena = Arena::open(400.0, 400.0)
        .with_obstacle(Rect::new(DVec2::new(10.0, -50.0), DVec2::new(50.0, 50.0)));
    let mut blocked = Vec::new();

    let moved = probe_move(
        &arena,
        ActorId::Player,
        DVec2::ZERO,
        DVec2::new(15.0, 5.0),
        &mut blocked,
    );
    assert_eq!(moved, DVec2::new(0.0, 5.0));
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].obstacle, 0);
    assert_eq!(blocked[0].mover, ActorId::Player);
}

#[test]
fn test_projectile_hits_lowest_id_enemy_only() {
    let mut registry = empty_registry();
    let first = spawn_drone(&mut registry, DVec2::new(100.0, 0.0));
    let _second = spawn_drone(&mut registry, DVec2::new(102.0, 0.0));
    let projectile = place_projectile(&mut registry, DVec2::new(101.0, 0.0), 25.0);

    let report = detect(&registry, Vec::new());
    assert_eq!(
        report.hits,
        vec![ProjectileHit {
            projectile,
            target: ActorId::Enemy(first),
        }]
    );

    let mut events = Vec::new();
    resolver::apply(&mut registry, &report, &PlayerTuning::default(), &mut events);
    assert!(projectile_consumed(&registry, projectile));

    // A consumed projectile is never matched again.
    let report = detect(&registry, Vec::new());
    assert!(report.hits.is_empty());
}

#[test]
fn test_kill_counts_once_and_spare_projectile_survives() {
    let mut registry = empty_registry();
    let drone = spawn_drone(&mut registry, DVec2::new(100.0, 0.0));
    let shots: Vec<ProjectileId> = (0..3)
        .map(|_| place_projectile(&mut registry, DVec2::new(100.0, 0.0), 25.0))
        .collect();

    let report = detect(&registry, Vec::new());
    assert_eq!(report.hits.len(), 3);

    let mut events = Vec::new();
    let kills = resolver::apply(&mut registry, &report, &PlayerTuning::default(), &mut events);

    assert_eq!(kills.len(), 1);
    assert_eq!(kills[0].enemy_id, drone);
    assert_eq!(registry.player().kills, 1);
    assert_eq!(registry.player().score, 10);
    let hit_events = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Hit { .. }))
        .count();
    assert_eq!(hit_events, 2);
    assert!(projectile_consumed(&registry, shots[0]));
    assert!(projectile_consumed(&registry, shots[1]));
    assert!(
        !projectile_consumed(&registry, shots[2]),
        "A hit on a defeated enemy must not consume the projectile"
    );

    registry.compact();
    assert!(registry.enemy(drone).is_none());
    assert!(registry.projectile(shots[2]).is_some());
}

#[test]
fn test_contact_damage_respects_invulnerability() {
    let mut registry = empty_registry();
    let drone = spawn_drone(&mut registry, DVec2::new(5.0, 0.0));
    let report = CollisionReport {
        contacts: vec![drone],
        ..CollisionReport::default()
    };
    let tuning = PlayerTuning::default();

    let mut events = Vec::new();
    for _ in 0..61 {
        resolver::apply(&mut registry, &report, &tuning, &mut events);
    }
    let contacts = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ContactDamage { .. }))
        .count();
    assert_eq!(contacts, 3);
    assert_eq!(registry.player().health.current, 70.0);
}

// ---- Player weapons ----

#[test]
fn test_weapon_cooldown_limits_fire_rate() {
    let mut engine = sandbox_engine();
    let mut shots = 0;
    for _ in 0..16 {
        let snap = engine.tick(InputIntent {
            fire: true,
            ..InputIntent::idle()
        });
        shots += snap
            .events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::ShotFired {
                        shooter: ActorId::Player,
                        ..
                    }
                )
            })
            .count();
    }
    // Blaster: 4 shots/s at 60 Hz is one shot every 15 ticks.
    assert_eq!(shots, 2);
}

#[test]
fn test_fire_without_energy_reports_out_of_energy() {
    let mut config = SessionConfig::sandbox();
    config.player.starting_energy = Some(2.0);
    let mut engine = SimulationEngine::new(config).unwrap();

    let snap = engine.tick(InputIntent {
        fire: true,
        ..InputIntent::idle()
    });
    assert!(snap.events.contains(&GameEvent::OutOfEnergy));
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_weapon_selection_changes_weapon() {
    let mut engine = sandbox_engine();
    let snap = engine.tick(InputIntent {
        select_weapon: Some(2),
        ..InputIntent::idle()
    });
    assert_eq!(snap.player.weapon, 2);
    assert_eq!(snap.player.weapon_name, "Rail Rifle");
    assert!(snap.events.contains(&GameEvent::WeaponSelected { index: 2 }));

    // Out-of-range selections are ignored.
    let snap = engine.tick(InputIntent {
        select_weapon: Some(99),
        ..InputIntent::idle()
    });
    assert_eq!(snap.player.weapon, 2);
}

#[test]
fn test_player_blocked_by_obstacle() {
    let mut config = SessionConfig::sandbox();
    config.arena = Arena::open(400.0, 400.0)
        .with_obstacle(Rect::new(DVec2::new(20.0, -50.0), DVec2::new(60.0, 50.0)));
    let mut engine = SimulationEngine::new(config).unwrap();

    let right = InputIntent {
        move_right: true,
        ..InputIntent::idle()
    };
    let mut blocked_seen = false;
    for _ in 0..60 {
        let snap = engine.tick(right);
        blocked_seen |= snap.movement_blocked;
        assert!(snap.player.position.x < 20.0);
    }
    assert!(blocked_seen);
}

// ---- Enemy AI in the engine ----

#[test]
fn test_robot_engages_and_shoots_player() {
    let mut engine = sandbox_engine();
    let robot = engine.spawn_enemy(EnemyArchetype::Robot, DVec2::new(60.0, 0.0), Vec::new());

    let mut fired = false;
    for _ in 0..30 {
        let snap = engine.tick(InputIntent::idle());
        fired |= snap.events.iter().any(|e| {
            matches!(e, GameEvent::ShotFired { shooter, .. } if *shooter == ActorId::Enemy(robot))
        });
    }
    assert!(fired, "Robot inside engagement range should fire");
    assert_eq!(engine.player().health.current, 92.0);
}

#[test]
fn test_wandering_enemy_does_not_stall_against_wall() {
    // A wall splits most of the arena, with a gap at the top.
    let arena = Arena::open(800.0, 600.0)
        .with_obstacle(Rect::new(DVec2::new(-10.0, -300.0), DVec2::new(10.0, 200.0)));
    let mut registry = empty_registry();
    // No live target, so the robot only wanders.
    registry.player_mut().health.drain(1000.0);
    let robot = world_setup::spawn_enemy(
        &mut registry,
        EnemyArchetype::Robot,
        DVec2::new(-150.0, 150.0),
        0,
        Vec::new(),
        &Difficulty::default(),
        0,
    );
    let entity = registry.enemy(robot).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut events = Vec::new();

    let mut last = DVec2::new(-150.0, 150.0);
    let mut still = 0;
    let mut longest_still = 0;
    for tick in 0..6000 {
        let mut blocked = Vec::new();
        crate::systems::ai::run(&mut registry, &arena, &mut rng, tick, &mut blocked, &mut events);
        let position = registry.world().get::<&Body>(entity).unwrap().position;
        assert!(arena.is_open(position));
        if position == last {
            still += 1;
            longest_still = longest_still.max(still);
        } else {
            still = 0;
        }
        last = position;
    }
    assert!(longest_still < 30, "robot stood still for {longest_still} ticks");
}

#[test]
fn test_snapshot_lists_sorted_by_id() {
    let mut engine = sandbox_engine();
    for i in 0..5 {
        let x = 250.0 - 40.0 * i as f64;
        engine.spawn_enemy(EnemyArchetype::Tank, DVec2::new(x, 250.0), Vec::new());
    }
    let snap = engine.tick(InputIntent::idle());
    let ids: Vec<u32> = snap.enemies.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

// ---- Waves ----

fn single_drone_waves(final_wave: u32) -> SessionConfig {
    SessionConfig {
        waves: WaveRules {
            base_count: 1,
            per_wave: 0,
            cap: 1,
            ..WaveRules::default()
        },
        enabled_archetypes: vec![EnemyArchetype::Drone],
        victory: VictoryCondition::ClearWaves { final_wave },
        ..SessionConfig::default()
    }
}

fn kill_enemy(registry: &mut Registry, id: u32) {
    let entity = registry.enemy(id).unwrap();
    registry
        .world_mut()
        .get::<&mut Health>(entity)
        .unwrap()
        .0
        .drain(1000.0);
    registry.mark_enemy_for_removal(id);
}

#[test]
fn test_wave_starts_and_trickles_spawns() {
    let mut engine = SimulationEngine::new(SessionConfig::default()).unwrap();
    let first = engine.tick(InputIntent::idle());
    assert!(first.events.contains(&GameEvent::WaveStarted {
        wave: 1,
        enemy_count: 4
    }));
    assert_eq!(first.enemies.len(), 1);

    for _ in 0..60 {
        engine.tick(InputIntent::idle());
    }
    assert_eq!(engine.registry().enemy_count(), 4);
    assert_eq!(engine.waves().pending_spawns(), 0);
}

#[test]
fn test_wave_clears_and_schedules_next() {
    let config = single_drone_waves(3);
    let mut director = WaveDirector::new(&config);
    let mut registry = empty_registry();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();

    director.run(&mut registry, &config, &mut rng, 0, &mut events);
    assert!(events.contains(&GameEvent::WaveStarted {
        wave: 1,
        enemy_count: 1
    }));
    assert_eq!(registry.enemy_count(), 1);

    kill_enemy(&mut registry, 0);
    director.record_kills(&[KillRecord {
        enemy_id: 0,
        archetype: EnemyArchetype::Drone,
        wave: 1,
        reward: 10,
    }]);
    registry.compact();

    events.clear();
    director.run(&mut registry, &config, &mut rng, 1, &mut events);
    assert!(events.contains(&GameEvent::WaveCleared { wave: 1, bonus: 50 }));
    assert_eq!(registry.player().score, 50);
    assert_eq!(director.cleared(), 1);

    let time = SimTime {
        tick: 1,
        elapsed_secs: 1.0 / 60.0,
    };
    let next = director.view(&time).next_wave_in_secs.unwrap();
    assert!((next - 3.0).abs() < 1e-9);

    events.clear();
    director.run(&mut registry, &config, &mut rng, 100, &mut events);
    assert!(events.is_empty(), "Grace delay has not elapsed");
    director.run(&mut registry, &config, &mut rng, 181, &mut events);
    assert!(events.contains(&GameEvent::WaveStarted {
        wave: 2,
        enemy_count: 1
    }));
}

#[test]
fn test_kills_from_other_waves_do_not_clear() {
    let config = single_drone_waves(3);
    let mut director = WaveDirector::new(&config);
    let mut registry = empty_registry();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();

    director.run(&mut registry, &config, &mut rng, 0, &mut events);
    kill_enemy(&mut registry, 0);
    director.record_kills(&[KillRecord {
        enemy_id: 0,
        archetype: EnemyArchetype::Drone,
        wave: 0,
        reward: 10,
    }]);
    registry.compact();

    events.clear();
    director.run(&mut registry, &config, &mut rng, 1, &mut events);
    assert!(events.is_empty());
    assert!(director.in_progress());
}

#[test]
fn test_final_wave_clear_schedules_nothing() {
    let config = single_drone_waves(1);
    let mut director = WaveDirector::new(&config);
    let mut registry = empty_registry();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();

    director.run(&mut registry, &config, &mut rng, 0, &mut events);
    kill_enemy(&mut registry, 0);
    director.record_kills(&[KillRecord {
        enemy_id: 0,
        archetype: EnemyArchetype::Drone,
        wave: 1,
        reward: 10,
    }]);
    registry.compact();
    director.run(&mut registry, &config, &mut rng, 1, &mut events);

    let time = SimTime::default();
    assert_eq!(director.view(&time).next_wave_in_secs, None);
    assert_eq!(
        resolver::detect_terminal(&config.victory, registry.player(), &director, 0.1),
        Some(Outcome::Victory)
    );
}

#[test]
fn test_clear_waves_from_later_starting_wave_ends_in_victory() {
    let config = SessionConfig {
        starting_wave: 2,
        ..single_drone_waves(2)
    };
    let mut director = WaveDirector::new(&config);
    let mut registry = empty_registry();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events = Vec::new();

    assert_eq!(director.waves_to_clear(), Some(1));
    assert!(!director.final_wave_cleared());
    assert_eq!(
        resolver::progress(&config.victory, registry.player(), &director, 0.0),
        Some(0.0)
    );

    director.run(&mut registry, &config, &mut rng, 0, &mut events);
    assert!(events.contains(&GameEvent::WaveStarted {
        wave: 2,
        enemy_count: 1
    }));
    kill_enemy(&mut registry, 0);
    director.record_kills(&[KillRecord {
        enemy_id: 0,
        archetype: EnemyArchetype::Drone,
        wave: 2,
        reward: 10,
    }]);
    registry.compact();
    director.run(&mut registry, &config, &mut rng, 1, &mut events);

    assert_eq!(director.cleared(), 1);
    assert!(director.final_wave_cleared());
    assert_eq!(
        resolver::progress(&config.victory, registry.player(), &director, 0.1),
        Some(1.0)
    );
    assert_eq!(
        resolver::detect_terminal(&config.victory, registry.player(), &director, 0.1),
        Some(Outcome::Victory)
    );
}

#[test]
fn test_engine_starting_wave_with_clear_waves_reaches_terminal() {
    let mut config = SessionConfig {
        starting_wave: 3,
        ..single_drone_waves(3)
    };
    config.arena.spawn_points = vec![DVec2::new(120.0, 0.0)];
    let mut engine = SimulationEngine::new(config).unwrap();

    let aim_right = InputIntent {
        fire: true,
        aim: Some(DVec2::X),
        ..InputIntent::idle()
    };
    let mut terminal = None;
    for _ in 0..600 {
        let snap = engine.tick(aim_right);
        if snap.terminal.is_some() {
            terminal = snap.terminal;
            break;
        }
    }
    let terminal = terminal.expect("session should end after the only wave is cleared");
    assert_eq!(terminal.outcome, Outcome::Victory);
    assert_eq!(terminal.wave_reached, 3);
}

#[test]
fn test_spawn_deferred_without_valid_point() {
    let mut config = SessionConfig::default();
    // The only spawn point sits on the player.
    config.arena.spawn_points = vec![config.arena.player_start];
    let mut engine = SimulationEngine::new(config).unwrap();

    let snap = engine.tick(InputIntent::idle());
    assert!(snap.events.contains(&GameEvent::SpawnDeferred { wave: 1 }));
    assert!(snap.enemies.is_empty());

    let snap = engine.tick(InputIntent::idle());
    assert!(snap.events.contains(&GameEvent::SpawnDeferred { wave: 1 }));
}

#[test]
fn test_starting_wave_offsets_first_wave() {
    let config = SessionConfig {
        starting_wave: 4,
        ..SessionConfig::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    let snap = engine.tick(InputIntent::idle());
    assert!(snap.events.contains(&GameEvent::WaveStarted {
        wave: 4,
        enemy_count: 7
    }));
    assert_eq!(snap.wave.index, 4);
}

// ---- Terminal detection ----

#[test]
fn test_terminal_event_emitted_once() {
    let mut config = SessionConfig::sandbox();
    config.victory = VictoryCondition::SurviveFor { secs: 0.49 };
    let mut engine = SimulationEngine::new(config).unwrap();

    let mut ended = 0;
    for _ in 0..100 {
        let snap = engine.tick(InputIntent::idle());
        ended += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
    }
    assert_eq!(ended, 1);
    assert_eq!(engine.phase(), SessionPhase::Ended);
    assert_eq!(engine.time().tick, 30, "Ended sessions do not advance");

    let terminal = engine.terminal_event().unwrap();
    assert_eq!(terminal.outcome, Outcome::Victory);
    assert!((terminal.survival_secs - 0.5).abs() < 1e-9);
}

#[test]
fn test_defeat_checked_before_victory() {
    let mut player = world_setup::make_player(&PlayerTuning::default(), DVec2::ZERO, 0);
    player.kills = 10;
    player.health.drain(1000.0);
    let victory = VictoryCondition::KillQuota { kills: 10 };
    assert_eq!(
        resolver::detect_terminal(&victory, &player, &no_waves(), 0.0),
        Some(Outcome::Defeat)
    );
}

#[test]
fn test_progress_meter() {
    let mut player = world_setup::make_player(&PlayerTuning::default(), DVec2::ZERO, 0);
    player.kills = 5;
    let quota = VictoryCondition::KillQuota { kills: 10 };
    let waves = no_waves();
    assert_eq!(resolver::progress(&quota, &player, &waves, 0.0), Some(0.5));
    let survive = VictoryCondition::SurviveFor { secs: 60.0 };
    assert_eq!(resolver::progress(&survive, &player, &waves, 90.0), Some(1.0));
    assert_eq!(
        resolver::progress(&VictoryCondition::Endless, &player, &waves, 1.0),
        None
    );
}

// ---- Game modes ----

#[test]
fn test_mode_presets_are_valid() {
    for mode in [GameMode::Skirmish, GameMode::Survival, GameMode::Siege] {
        for level in [
            DifficultyLevel::Easy,
            DifficultyLevel::Normal,
            DifficultyLevel::Hard,
        ] {
            let config = build_config(mode, level);
            assert!(config.validate().is_ok(), "{mode:?}/{level:?} invalid");
            for point in &config.arena.spawn_points {
                assert!(config.arena.is_open(*point));
            }
        }
    }

    let siege = build_config(GameMode::Siege, DifficultyLevel::Normal);
    assert_eq!(siege.arena.obstacles.len(), 4);
    assert_eq!(siege.victory, VictoryCondition::KillQuota { kills: 40 });

    let survival = build_config(GameMode::Survival, DifficultyLevel::Easy);
    assert_eq!(survival.difficulty.health_growth_per_wave, 0.15);
    assert_eq!(survival.difficulty.enemy_speed, 0.85);
}

proptest! {
    #[test]
    fn prop_each_projectile_resolves_at_most_once(
        enemies in prop::collection::vec((-30.0f64..30.0, -30.0f64..30.0), 1..6),
        shots in prop::collection::vec((-30.0f64..30.0, -30.0f64..30.0), 1..10),
    ) {
        let mut registry = empty_registry();
        registry.player_mut().position = DVec2::new(300.0, 300.0);
        for (x, y) in &enemies {
            spawn_drone(&mut registry, DVec2::new(*x, *y));
        }
        for (x, y) in &shots {
            place_projectile(&mut registry, DVec2::new(*x, *y), 30.0);
        }

        let report = detect(&registry, Vec::new());
        let mut seen: Vec<ProjectileId> = report.hits.iter().map(|h| h.projectile).collect();
        let total = seen.len();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
        prop_assert!(total <= shots.len());

        let mut events = Vec::new();
        resolver::apply(&mut registry, &report, &PlayerTuning::default(), &mut events);
        for (_, health) in registry.world().query::<&Health>().iter() {
            prop_assert!(health.0.current >= 0.0 && health.0.current <= health.0.max);
        }
    }
}
