//! Core collision detection system
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! The manager never owns colliders. It keeps one registry entry per
//! registered collider (entity + layer mask) and the collider keeps the
//! matching [`Registration`], which removes the entry when dropped. The
//! broad phase pairs entries whose masks overlap; the narrow phase asks the
//! colliders stored in the [`World`] whether they actually touch.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::core::config::PhysicsConfig;
use crate::ecs::{Entity, World};
use super::collision_layers::{LayerId, LayerMask, LayerRegistry};
use super::error::ColliderError;

new_key_type! {
    /// Handle to a registry entry
    pub struct RegistrationKey;
}

/// Collision pair representing two entities that are colliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Lower entity key
    pub entity_a: Entity,
    /// Higher entity key
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller entity key first)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a <= entity_b {
            Self { entity_a, entity_b }
        } else {
            Self { entity_a: entity_b, entity_b: entity_a }
        }
    }

    /// Whether `entity` is one side of the pair
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}

#[derive(Debug, Clone, Copy)]
struct RegistryEntry {
    entity: Entity,
    mask: LayerMask,
}

#[derive(Debug, Default)]
struct Registry {
    layers: LayerRegistry,
    entries: SlotMap<RegistrationKey, RegistryEntry>,
}

/// A collider's membership in the manager
///
/// Move-only. Dropping it removes the registry entry; if the manager is
/// already gone there is nothing to remove.
#[derive(Debug)]
pub struct Registration {
    key: RegistrationKey,
    registry: Weak<RefCell<Registry>>,
}

impl Registration {
    /// Registry key of this registration
    pub fn key(&self) -> RegistrationKey {
        self.key
    }

    /// Replace the layer mask with the resolution of `names`.
    /// Nothing changes if a name is unknown.
    pub fn update_layers<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), ColliderError> {
        let Some(shared) = self.registry.upgrade() else {
            return Ok(());
        };
        let mut registry = shared.try_borrow_mut().map_err(|_| ColliderError::RegistryBusy)?;

        let mask = registry.layers.resolve(names)?;
        if let Some(entry) = registry.entries.get_mut(self.key) {
            entry.mask = mask;
        }
        Ok(())
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };

        match shared.try_borrow_mut() {
            Ok(mut registry) => {
                if let Some(entry) = registry.entries.remove(self.key) {
                    log::debug!("Deregistered collider for entity {:?}", entry.entity);
                }
            }
            Err(_) => log::error!(
                "Collision registry busy while dropping registration {:?}; entry leaked",
                self.key
            ),
        };
    }
}

/// Central collision manager (GEA 13.3)
///
/// Single-threaded: registrations share the registry through `Rc`.
#[derive(Debug, Default)]
pub struct CollisionManager {
    registry: Rc<RefCell<Registry>>,

    /// Collision pairs from the current step
    current_pairs: HashSet<CollisionPair>,

    /// Collision pairs from the previous step
    previous_pairs: HashSet<CollisionPair>,
}

impl CollisionManager {
    /// Create a manager that knows only the default layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager and register the configured layers
    pub fn from_config(config: &PhysicsConfig) -> Result<Self, ColliderError> {
        let mut manager = Self::new();
        for layer in &config.layers {
            manager.register_layer(layer)?;
        }
        Ok(manager)
    }

    /// Register a layer name (idempotent)
    pub fn register_layer(&mut self, name: &str) -> Result<LayerId, ColliderError> {
        let id = self.registry.borrow_mut().layers.register(name)?;
        log::debug!("Registered collision layer '{name}' as {}", id.index());
        Ok(id)
    }

    /// Id of a registered layer
    pub fn layer_id(&self, name: &str) -> Option<LayerId> {
        self.registry.borrow().layers.id(name)
    }

    /// Resolve layer names into a mask, failing on the first unknown name
    pub fn resolve_layers<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<LayerMask, ColliderError> {
        self.registry.borrow().layers.resolve(names)
    }

    /// Register `entity` under `layers`
    ///
    /// Nothing is registered if any layer is unknown.
    pub fn register<'a>(
        &self,
        entity: Entity,
        layers: impl IntoIterator<Item = &'a str>,
    ) -> Result<Registration, ColliderError> {
        let mut registry = self.registry.borrow_mut();
        let mask = registry.layers.resolve(layers)?;
        if mask.is_empty() {
            return Err(ColliderError::InvalidArgument(
                "collider must belong to at least one layer".to_string(),
            ));
        }

        let key = registry.entries.insert(RegistryEntry { entity, mask });
        log::debug!("Registered collider for entity {entity:?} with mask {:#b}", mask.bits());

        Ok(Registration {
            key,
            registry: Rc::downgrade(&self.registry),
        })
    }

    /// Whether any collider of `entity` is registered
    pub fn is_registered(&self, entity: Entity) -> bool {
        self.registry.borrow().entries.values().any(|entry| entry.entity == entity)
    }

    /// Number of registered colliders
    pub fn registered_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Entities registered under the layer `name`
    pub fn members_of(&self, name: &str) -> Vec<Entity> {
        let registry = self.registry.borrow();
        let Some(id) = registry.layers.id(name) else {
            return Vec::new();
        };
        registry
            .entries
            .values()
            .filter(|entry| entry.mask.contains(id))
            .map(|entry| entry.entity)
            .collect()
    }

    /// Run one collision step and return the pairs currently touching
    ///
    /// Refreshes every collider's transform snapshot first, so all tests in
    /// a step see the same placement.
    pub fn step(&mut self, world: &mut World) -> &HashSet<CollisionPair> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        world.sync_collider_transforms();

        // Phase 1: Broad-phase (layer filtering)
        let candidates = self.broad_phase();

        // Phase 2: Narrow-phase
        self.narrow_phase(world, &candidates);

        log::trace!(
            "Collision step: {} candidates, {} colliding",
            candidates.len(),
            self.current_pairs.len()
        );
        &self.current_pairs
    }

    /// Broad-phase: every pair of entries sharing a layer
    fn broad_phase(&self) -> Vec<CollisionPair> {
        let registry = self.registry.borrow();
        let entries: Vec<RegistryEntry> = registry.entries.values().copied().collect();

        let mut potential_pairs = HashSet::new();
        for (index, a) in entries.iter().enumerate() {
            for b in &entries[index + 1..] {
                if a.entity != b.entity && a.mask.overlaps(b.mask) {
                    potential_pairs.insert(CollisionPair::new(a.entity, b.entity));
                }
            }
        }

        potential_pairs.into_iter().collect()
    }

    /// Narrow-phase: ask the colliders themselves
    fn narrow_phase(&mut self, world: &World, candidates: &[CollisionPair]) {
        for &pair in candidates {
            let (Some(a), Some(b)) = (world.collider(pair.entity_a), world.collider(pair.entity_b)) else {
                continue;
            };

            match a.collides_with(b) {
                Ok(true) => {
                    self.current_pairs.insert(pair);
                }
                Ok(false) => {}
                Err(err) => log::warn!(
                    "Skipping pair {:?}/{:?}: {err}",
                    pair.entity_a,
                    pair.entity_b
                ),
            }
        }
    }

    /// Pairs touching as of the last step
    pub fn current_pairs(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Pairs that started touching in the last step
    pub fn started_pairs(&self) -> impl Iterator<Item = &CollisionPair> {
        self.current_pairs.difference(&self.previous_pairs)
    }

    /// Pairs that stopped touching in the last step
    pub fn ended_pairs(&self) -> impl Iterator<Item = &CollisionPair> {
        self.previous_pairs.difference(&self.current_pairs)
    }

    /// Whether `a` and `b` touched in the last step
    pub fn is_colliding(&self, a: Entity, b: Entity) -> bool {
        self.current_pairs.contains(&CollisionPair::new(a, b))
    }
}
