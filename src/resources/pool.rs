//! Reusable entity pools.
//!
//! Bullets, slashes, dash effects, hit VFX, and enemies are allocated once and
//! recycled. Each pool keeps its entries in insertion order;
//! [`EntityPools::acquire`] hands out the first inactive entry, or spawns a
//! new one when all are in use, so a pool only ever grows. Entities are never
//! despawned individually: they flip between active and [`Inactive`].
//!
//! Every acquire and release bumps the entry's generation. Deferred tasks and
//! presenter callbacks hold that generation as a token and are dropped when
//! it no longer matches, so a recycled entity never receives work meant for
//! its previous life.
//!
//! A pool whose template does not carry the behavior the pool hands out is
//! reported once with `error!` at registration and then stays disabled.

use bevy_ecs::prelude::*;
use log::{debug, error, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::attackable::Attackable;
use crate::components::bullet::Bullet;
use crate::components::collider::{Collider, layers};
use crate::components::enemy::EnemyAi;
use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::pooled::{Inactive, Pooled, Spent};
use crate::components::rotation::Rotation;
use crate::components::slash::Slash;
use crate::components::vfx::{Vfx, VfxClip};
use crate::error::PoolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Bullet,
    Slash,
    DashEffect,
    HitVfx,
    Enemy,
}

impl PoolKind {
    pub const ALL: [PoolKind; 5] = [
        PoolKind::Bullet,
        PoolKind::Slash,
        PoolKind::DashEffect,
        PoolKind::HitVfx,
        PoolKind::Enemy,
    ];

    /// Behavior a template must have to back this pool.
    pub fn expected_behavior(self) -> TemplateBehavior {
        match self {
            PoolKind::Bullet => TemplateBehavior::Bullet,
            PoolKind::Slash => TemplateBehavior::Slash,
            PoolKind::DashEffect | PoolKind::HitVfx => TemplateBehavior::Vfx,
            PoolKind::Enemy => TemplateBehavior::Enemy,
        }
    }
}

/// Behavior carried by a template, as named in arena layout files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateBehavior {
    Bullet,
    Slash,
    Vfx,
    Enemy,
}

/// Component data stamped onto an entity every time it is acquired.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityTemplate {
    Bullet { bullet: Bullet, radius: f32 },
    Slash { lifespan: f32, radius: f32 },
    Vfx { clip: VfxClip },
    Enemy { ai: EnemyAi, health: Health, radius: f32 },
}

impl EntityTemplate {
    pub fn behavior(&self) -> TemplateBehavior {
        match self {
            EntityTemplate::Bullet { .. } => TemplateBehavior::Bullet,
            EntityTemplate::Slash { .. } => TemplateBehavior::Slash,
            EntityTemplate::Vfx { .. } => TemplateBehavior::Vfx,
            EntityTemplate::Enemy { .. } => TemplateBehavior::Enemy,
        }
    }

    fn stamp(&self, entity: &mut EntityCommands) {
        entity.insert((MapPosition::default(), Rotation::default()));
        match self {
            EntityTemplate::Bullet { bullet, radius } => {
                entity.insert((
                    *bullet,
                    Attackable,
                    Collider::new(*radius, layers::PROJECTILE),
                    Faction::Enemy,
                ));
            }
            EntityTemplate::Slash { lifespan, radius } => {
                // Slashes query the oracle but are never a query result.
                entity.insert((
                    Slash::new(*lifespan),
                    Collider::new(*radius, 0),
                    Faction::Player,
                ));
            }
            EntityTemplate::Vfx { clip } => {
                entity.insert(Vfx { clip: *clip });
            }
            EntityTemplate::Enemy { ai, health, radius } => {
                entity.insert((
                    *ai,
                    *health,
                    Collider::new(*radius, layers::ENEMY),
                    Faction::Enemy,
                ));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub entity: Entity,
    pub active: bool,
    pub generation: u32,
}

#[derive(Clone, Debug)]
pub struct EntityPool {
    pub kind: PoolKind,
    pub template: EntityTemplate,
    pub initial_count: usize,
    pub disabled: bool,
    entries: Vec<PoolEntry>,
}

impl EntityPool {
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.active).count()
    }
}

/// All pools of the session, keyed by kind.
#[derive(Resource, Default, Debug)]
pub struct EntityPools {
    pools: FxHashMap<PoolKind, EntityPool>,
    index: FxHashMap<Entity, (PoolKind, usize)>,
}

impl EntityPools {
    /// Register the pool for `kind`.
    ///
    /// On a template/kind mismatch the error is logged here, once, and the
    /// pool is kept in a disabled state so later acquires fail quietly.
    pub fn register(
        &mut self,
        kind: PoolKind,
        initial_count: usize,
        template: EntityTemplate,
    ) -> Result<(), PoolError> {
        let expected = kind.expected_behavior();
        let found = template.behavior();
        let disabled = expected != found;
        self.pools.insert(
            kind,
            EntityPool {
                kind,
                template,
                initial_count,
                disabled,
                entries: Vec::new(),
            },
        );
        if disabled {
            let err = PoolError::Misconfigured {
                kind,
                expected,
                found,
            };
            error!("{err}");
            return Err(err);
        }
        Ok(())
    }

    pub fn pool(&self, kind: PoolKind) -> Option<&EntityPool> {
        self.pools.get(&kind)
    }

    pub fn is_disabled(&self, kind: PoolKind) -> bool {
        self.pools.get(&kind).is_none_or(|p| p.disabled)
    }

    /// Spawn `initial_count` inactive entries for every working pool.
    pub fn prewarm_all(&mut self, commands: &mut Commands) {
        for kind in PoolKind::ALL {
            let Some(pool) = self.pools.get(&kind) else {
                continue;
            };
            if pool.disabled {
                continue;
            }
            let missing = pool.initial_count.saturating_sub(pool.entries.len());
            for _ in 0..missing {
                self.spawn_entry(kind, commands);
            }
            info!("Pool {:?} pre-warmed with {} entries", kind, missing);
        }
    }

    /// Hand out the first inactive entry of `kind`, growing the pool if none
    /// is free. The returned entity has fresh template components; callers
    /// position it afterwards.
    pub fn acquire(&mut self, kind: PoolKind, commands: &mut Commands) -> Result<Entity, PoolError> {
        let pool = self
            .pools
            .get(&kind)
            .ok_or(PoolError::MissingTemplate(kind))?;
        if pool.disabled {
            debug!("acquire on disabled pool {kind:?}");
            return Err(PoolError::Disabled(kind));
        }
        let slot = match pool.entries.iter().position(|e| !e.active) {
            Some(slot) => slot,
            None => self.spawn_entry(kind, commands),
        };

        let pool = self
            .pools
            .get_mut(&kind)
            .ok_or(PoolError::MissingTemplate(kind))?;
        let entry = &mut pool.entries[slot];
        entry.active = true;
        entry.generation = entry.generation.wrapping_add(1);
        let (entity, generation) = (entry.entity, entry.generation);

        let mut ec = commands.entity(entity);
        pool.template.stamp(&mut ec);
        ec.insert(Pooled { kind, generation });
        ec.remove::<(Inactive, Spent)>();
        Ok(entity)
    }

    /// Return `entity` to its pool. Returns `false` for unknown or already
    /// inactive entities.
    pub fn release(&mut self, entity: Entity, commands: &mut Commands) -> bool {
        let Some(&(kind, slot)) = self.index.get(&entity) else {
            return false;
        };
        let Some(entry) = self
            .pools
            .get_mut(&kind)
            .and_then(|p| p.entries.get_mut(slot))
        else {
            return false;
        };
        if !entry.active {
            return false;
        }
        entry.active = false;
        entry.generation = entry.generation.wrapping_add(1);
        let generation = entry.generation;
        commands
            .entity(entity)
            .try_insert((Inactive, Pooled { kind, generation }))
            .try_remove::<Spent>();
        true
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.entry(entity).is_some_and(|e| e.active)
    }

    pub fn generation_of(&self, entity: Entity) -> Option<u32> {
        self.entry(entity).map(|e| e.generation)
    }

    /// Whether `token` still names the current life of `entity`. A `None`
    /// token only requires the entity to be known and active.
    pub fn is_current(&self, entity: Entity, token: Option<u32>) -> bool {
        match (self.entry(entity), token) {
            (Some(entry), Some(token)) => entry.active && entry.generation == token,
            (Some(entry), None) => entry.active,
            (None, Some(_)) => false,
            (None, None) => true,
        }
    }

    pub fn kind_of(&self, entity: Entity) -> Option<PoolKind> {
        self.index.get(&entity).map(|(kind, _)| *kind)
    }

    pub fn active_count(&self, kind: PoolKind) -> usize {
        self.pools.get(&kind).map_or(0, |p| p.active_count())
    }

    pub fn len(&self, kind: PoolKind) -> usize {
        self.pools.get(&kind).map_or(0, |p| p.entries.len())
    }

    /// Forget every entry. The entities themselves must be despawned by the
    /// caller.
    pub fn clear(&mut self) {
        self.pools.clear();
        self.index.clear();
    }

    fn entry(&self, entity: Entity) -> Option<&PoolEntry> {
        let (kind, slot) = self.index.get(&entity)?;
        self.pools.get(kind)?.entries.get(*slot)
    }

    /// Spawn one inactive entry and return its slot.
    fn spawn_entry(&mut self, kind: PoolKind, commands: &mut Commands) -> usize {
        let Some(pool) = self.pools.get_mut(&kind) else {
            return 0;
        };
        let mut ec = commands.spawn((Inactive, Pooled { kind, generation: 0 }));
        pool.template.stamp(&mut ec);
        let entity = ec.id();
        let slot = pool.entries.len();
        pool.entries.push(PoolEntry {
            entity,
            active: false,
            generation: 0,
        });
        self.index.insert(entity, (kind, slot));
        debug!("Pool {:?} grew to {}", kind, pool.entries.len());
        slot
    }
}
