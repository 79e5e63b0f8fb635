//! Damage and progression resolver.
//!
//! Applies a [`CollisionReport`]: projectile damage, kills and score,
//! contact damage with the invulnerability window, and passive energy
//! regeneration. Also decides the session outcome once all of a tick's
//! mutations are done.

use skirmish_core::components::{EnemyProfile, Health, Player, ProjectileState};
use skirmish_core::config::{PlayerTuning, VictoryCondition};
use skirmish_core::enums::{EnemyArchetype, Outcome};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{ActorId, EnemyId};

use crate::registry::Registry;
use crate::systems::collision::CollisionReport;
use crate::systems::wave_director::WaveDirector;

/// An enemy killed this tick, reported to the wave director.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillRecord {
    pub enemy_id: EnemyId,
    pub archetype: EnemyArchetype,
    pub wave: u32,
    pub reward: u64,
}

/// Apply hits and contacts. Returns the kills made this tick.
pub fn apply(
    registry: &mut Registry,
    report: &CollisionReport,
    tuning: &PlayerTuning,
    events: &mut Vec<GameEvent>,
) -> Vec<KillRecord> {
    let mut kills = Vec::new();

    for hit in &report.hits {
        let Some(projectile_entity) = registry.projectile(hit.projectile) else {
            continue;
        };
        let damage = match registry.world().get::<&ProjectileState>(projectile_entity) {
            Ok(state) if !state.consumed => state.damage,
            _ => continue,
        };

        let landed = match hit.target {
            ActorId::Player => {
                let player = registry.player_mut();
                if player.health.is_depleted() {
                    false
                } else {
                    player.health.drain(damage);
                    true
                }
            }
            ActorId::Enemy(enemy_id) => match damage_enemy(registry, enemy_id, damage) {
                EnemyHit::Ignored => false,
                EnemyHit::Wounded => true,
                EnemyHit::Killed(record) => {
                    record_kill(registry, record, events);
                    kills.push(record);
                    true
                }
            },
        };

        // A hit on an already-defeated target leaves the projectile in flight.
        if !landed {
            continue;
        }
        if let Ok(mut state) = registry
            .world_mut()
            .get::<&mut ProjectileState>(projectile_entity)
        {
            state.consumed = true;
        }
        registry.mark_projectile_for_removal(hit.projectile);
        events.push(GameEvent::Hit {
            projectile_id: hit.projectile,
            target: hit.target,
            damage,
        });
    }

    apply_contacts(registry, &report.contacts, tuning, events);
    kills
}

enum EnemyHit {
    Ignored,
    Wounded,
    Killed(KillRecord),
}

fn damage_enemy(registry: &mut Registry, enemy_id: EnemyId, damage: f64) -> EnemyHit {
    let Some(entity) = registry.enemy(enemy_id) else {
        return EnemyHit::Ignored;
    };
    let world = registry.world_mut();
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return EnemyHit::Ignored;
    };
    if health.0.is_depleted() {
        return EnemyHit::Ignored;
    }
    health.0.drain(damage);
    if !health.0.is_depleted() {
        return EnemyHit::Wounded;
    }
    drop(health);

    match world.get::<&EnemyProfile>(entity) {
        Ok(profile) => EnemyHit::Killed(KillRecord {
            enemy_id,
            archetype: profile.archetype,
            wave: profile.wave,
            reward: profile.score_reward,
        }),
        Err(_) => EnemyHit::Wounded,
    }
}

fn record_kill(registry: &mut Registry, record: KillRecord, events: &mut Vec<GameEvent>) {
    registry.mark_enemy_for_removal(record.enemy_id);
    let player = registry.player_mut();
    player.kills += 1;
    player.score += record.reward;
    tracing::debug!(
        enemy = record.enemy_id,
        archetype = ?record.archetype,
        reward = record.reward,
        "enemy killed"
    );
    events.push(GameEvent::EnemyKilled {
        enemy_id: record.enemy_id,
        archetype: record.archetype,
        reward: record.reward,
    });
}

/// Contact damage. The invulnerability counter is ticked down first, so a
/// window of `n` ticks lets the next contact land exactly `n` ticks later.
fn apply_contacts(
    registry: &mut Registry,
    contacts: &[EnemyId],
    tuning: &PlayerTuning,
    events: &mut Vec<GameEvent>,
) {
    {
        let player = registry.player_mut();
        player.invulnerable_ticks = player.invulnerable_ticks.saturating_sub(1);
    }

    for &enemy_id in contacts {
        if registry.player().invulnerable_ticks > 0 || registry.player().health.is_depleted() {
            break;
        }
        let damage = registry
            .enemy(enemy_id)
            .and_then(|entity| {
                let world = registry.world();
                let alive = !world.get::<&Health>(entity).ok()?.0.is_depleted();
                let damage = world.get::<&EnemyProfile>(entity).ok()?.contact_damage;
                alive.then_some(damage)
            });
        let Some(damage) = damage else {
            continue;
        };

        let player = registry.player_mut();
        player.health.drain(damage);
        player.invulnerable_ticks = tuning.invulnerability_ticks;
        events.push(GameEvent::ContactDamage { enemy_id, damage });
    }
}

/// Passive energy regeneration.
pub fn regenerate(player: &mut Player, tuning: &PlayerTuning) {
    player.energy.restore(tuning.energy_regen_per_tick);
}

/// Progress toward the victory condition in `[0, 1]`, if it has one.
pub fn progress(
    victory: &VictoryCondition,
    player: &Player,
    waves: &WaveDirector,
    elapsed_secs: f64,
) -> Option<f64> {
    let ratio = |done: f64, goal: f64| {
        if goal > 0.0 {
            (done / goal).clamp(0.0, 1.0)
        } else {
            1.0
        }
    };
    match *victory {
        VictoryCondition::ClearWaves { final_wave } => {
            let required = waves.waves_to_clear().unwrap_or(final_wave);
            Some(ratio(waves.cleared() as f64, required as f64))
        }
        VictoryCondition::KillQuota { kills } => Some(ratio(player.kills as f64, kills as f64)),
        VictoryCondition::SurviveFor { secs } => Some(ratio(elapsed_secs, secs)),
        VictoryCondition::Endless => None,
    }
}

/// Decide whether the session is over. Defeat takes precedence.
pub fn detect_terminal(
    victory: &VictoryCondition,
    player: &Player,
    waves: &WaveDirector,
    elapsed_secs: f64,
) -> Option<Outcome> {
    if player.health.is_depleted() {
        return Some(Outcome::Defeat);
    }
    let won = match *victory {
        VictoryCondition::ClearWaves { .. } => waves.final_wave_cleared(),
        VictoryCondition::KillQuota { kills } => player.kills >= kills,
        VictoryCondition::SurviveFor { secs } => elapsed_secs >= secs,
        VictoryCondition::Endless => false,
    };
    won.then_some(Outcome::Victory)
}
