//! Entity registry: the player record plus the hecs world holding enemies
//! and projectiles, indexed by stable ids.
//!
//! Removal requested mid-tick is deferred to `compact`, which the engine
//! calls once at the end of every tick, so systems never invalidate each
//! other's iteration.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::components::{Body, EnemyProfile, Health, Player, ProjectileState, Trail};
use skirmish_core::types::{ActorId, EnemyId, ProjectileId};

pub struct Registry {
    world: World,
    player: Player,
    enemies: HashMap<EnemyId, Entity>,
    projectiles: HashMap<ProjectileId, Entity>,
    next_enemy_id: EnemyId,
    next_projectile_id: ProjectileId,
    pending_enemies: Vec<EnemyId>,
    pending_projectiles: Vec<ProjectileId>,
}

impl Registry {
    pub fn new(player: Player) -> Self {
        Self {
            world: World::new(),
            player,
            enemies: HashMap::new(),
            projectiles: HashMap::new(),
            next_enemy_id: 0,
            next_projectile_id: 0,
            pending_enemies: Vec::new(),
            pending_projectiles: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Insert an enemy, assigning it a fresh id (written into `profile.id`).
    pub fn spawn_enemy(
        &mut self,
        body: Body,
        health: Health,
        mut profile: EnemyProfile,
    ) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        profile.id = id;
        let entity = self.world.spawn((body, health, profile));
        self.enemies.insert(id, entity);
        id
    }

    /// Insert a projectile, assigning it a fresh id (written into `state.id`).
    pub fn spawn_projectile(&mut self, body: Body, mut state: ProjectileState) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        state.id = id;
        let entity = self.world.spawn((body, state, Trail::default()));
        self.projectiles.insert(id, entity);
        id
    }

    pub fn enemy(&self, id: EnemyId) -> Option<Entity> {
        self.enemies.get(&id).copied()
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<Entity> {
        self.projectiles.get(&id).copied()
    }

    /// Enemy ids in ascending order.
    pub fn enemy_ids(&self) -> Vec<EnemyId> {
        let mut ids: Vec<EnemyId> = self.enemies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Projectile ids in ascending order.
    pub fn projectile_ids(&self) -> Vec<ProjectileId> {
        let mut ids: Vec<ProjectileId> = self.projectiles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Current position of a live actor. Defeated or removed actors resolve to `None`.
    pub fn resolve_target(&self, actor: ActorId) -> Option<DVec2> {
        match actor {
            ActorId::Player => {
                (!self.player.health.is_depleted()).then_some(self.player.position)
            }
            ActorId::Enemy(id) => {
                let entity = self.enemy(id)?;
                let health = self.world.get::<&Health>(entity).ok()?;
                if health.0.is_depleted() {
                    return None;
                }
                let body = self.world.get::<&Body>(entity).ok()?;
                Some(body.position)
            }
        }
    }

    /// Enemies with health above zero, including any not yet compacted.
    pub fn live_enemy_count(&self) -> usize {
        self.world
            .query::<(&Health, &EnemyProfile)>()
            .iter()
            .filter(|(_, (health, _))| !health.0.is_depleted())
            .count()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn mark_enemy_for_removal(&mut self, id: EnemyId) {
        self.pending_enemies.push(id);
    }

    pub fn mark_projectile_for_removal(&mut self, id: ProjectileId) {
        self.pending_projectiles.push(id);
    }

    /// Apply all deferred removals. Returns the number of entities despawned.
    pub fn compact(&mut self) -> usize {
        let mut removed = 0;
        for id in self.pending_enemies.drain(..) {
            if let Some(entity) = self.enemies.remove(&id) {
                if self.world.despawn(entity).is_ok() {
                    removed += 1;
                }
            }
        }
        for id in self.pending_projectiles.drain(..) {
            if let Some(entity) = self.projectiles.remove(&id) {
                if self.world.despawn(entity).is_ok() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Release every enemy and projectile.
    pub fn clear(&mut self) {
        self.world.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.pending_enemies.clear();
        self.pending_projectiles.clear();
    }
}
