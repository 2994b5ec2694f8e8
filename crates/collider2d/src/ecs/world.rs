//! ECS World implementation

use slotmap::{SecondaryMap, SlotMap};

use super::components::{SpriteComponent, SpriteQuery, TransformComponent};
use super::Entity;
use crate::physics::collider::{Collider, ColliderState, InitContext};
use crate::physics::collision_system::CollisionManager;
use crate::physics::error::ColliderError;

/// ECS World containing all entities and components
///
/// Every entity has a transform. Sprites and colliders are optional, and the
/// world owns at most one collider per entity.
#[derive(Debug, Default)]
pub struct World {
    transforms: SlotMap<Entity, TransformComponent>,
    sprites: SecondaryMap<Entity, SpriteComponent>,
    colliders: SecondaryMap<Entity, Box<dyn Collider>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn spawn(&mut self, transform: TransformComponent) -> Entity {
        self.transforms.insert(transform)
    }

    /// Whether `entity` is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.transforms.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Attach or replace the sprite of `entity`
    pub fn set_sprite(&mut self, entity: Entity, sprite: SpriteComponent) -> Result<(), ColliderError> {
        if !self.contains(entity) {
            return Err(ColliderError::EntityNotFound(entity));
        }
        self.sprites.insert(entity, sprite);
        Ok(())
    }

    /// Transform of `entity`
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.transforms.get(entity)
    }

    /// Mutable transform of `entity`
    ///
    /// Colliders see the change at the next [`World::sync_collider_transforms`].
    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(entity)
    }

    /// Sprite of `entity`
    pub fn sprite(&self, entity: Entity) -> Option<&SpriteComponent> {
        self.sprites.get(entity)
    }

    /// Initialize `collider` against `entity` and take ownership of it
    ///
    /// On failure the error is logged and the collider is dropped without
    /// ever being part of the simulation.
    pub fn attach_collider<C: Collider>(
        &mut self,
        entity: Entity,
        mut collider: C,
        manager: &CollisionManager,
    ) -> Result<(), ColliderError> {
        let Some(transform) = self.transforms.get(entity) else {
            return Err(ColliderError::EntityNotFound(entity));
        };
        if self.colliders.contains_key(entity) {
            return Err(ColliderError::InvalidArgument(format!(
                "entity {entity:?} already has a collider"
            )));
        }

        let ctx = InitContext {
            entity,
            transform,
            sprite: self.sprites.get(entity).map(|sprite| sprite as &dyn SpriteQuery),
            manager,
        };
        if let Err(err) = collider.initialize(&ctx) {
            log::error!("Failed to initialize collider for entity {entity:?}: {err}");
            return Err(err);
        }

        self.colliders.insert(entity, Box::new(collider));
        Ok(())
    }

    /// Destroy and remove the collider of `entity`. Returns whether one existed.
    pub fn detach_collider(&mut self, entity: Entity) -> bool {
        match self.colliders.remove(entity) {
            Some(mut collider) => {
                if let Err(err) = collider.destroy() {
                    log::warn!("Detached collider of {entity:?} was already unusable: {err}");
                }
                true
            }
            None => false,
        }
    }

    /// Collider of `entity`
    pub fn collider(&self, entity: Entity) -> Option<&dyn Collider> {
        self.colliders.get(entity).map(|collider| &**collider)
    }

    /// Mutable collider of `entity`
    pub fn collider_mut(&mut self, entity: Entity) -> Option<&mut dyn Collider> {
        match self.colliders.get_mut(entity) {
            Some(collider) => Some(&mut **collider),
            None => None,
        }
    }

    /// Collider of `entity` as its concrete type
    pub fn collider_as<T: Collider>(&self, entity: Entity) -> Option<&T> {
        self.colliders
            .get(entity)
            .and_then(|collider| collider.as_any().downcast_ref::<T>())
    }

    /// Mutable collider of `entity` as its concrete type
    pub fn collider_as_mut<T: Collider>(&mut self, entity: Entity) -> Option<&mut T> {
        self.colliders
            .get_mut(entity)
            .and_then(|collider| collider.as_any_mut().downcast_mut::<T>())
    }

    /// Remove `entity` and everything attached to it. Returns whether it existed.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.detach_collider(entity);
        self.sprites.remove(entity);
        self.transforms.remove(entity).is_some()
    }

    /// Iterate over all colliders with their entities
    pub fn colliders(&self) -> impl Iterator<Item = (Entity, &dyn Collider)> {
        self.colliders.iter().map(|(entity, collider)| (entity, &**collider))
    }

    /// Copy each entity's transform into its collider's snapshot
    pub fn sync_collider_transforms(&mut self) {
        for (entity, collider) in &mut self.colliders {
            if collider.state() != ColliderState::Initialized {
                continue;
            }
            if let Some(transform) = self.transforms.get(entity) {
                if let Err(err) = collider.base_mut().sync_transform(transform) {
                    log::warn!("Could not sync transform of {entity:?}: {err}");
                }
            }
        }
    }
}
