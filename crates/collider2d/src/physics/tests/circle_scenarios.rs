//! End-to-end circle collider behavior
//!
//! Entities sit at the origin with unit scale unless a test says otherwise.

use crate::ecs::{Entity, TransformComponent, World};
use crate::foundation::logging;
use crate::foundation::math::Vec2;
use crate::physics::{
    CircleCollider, Collider, ColliderBase, ColliderError, ColliderShape, CollisionManager,
    InitContext, Rect, RectCollider,
};
use approx::assert_relative_eq;
use std::any::Any;

fn spawn_circle(world: &mut World, manager: &CollisionManager, transform: TransformComponent, collider: CircleCollider) -> Entity {
    let entity = world.spawn(transform);
    world.attach_collider(entity, collider, manager).unwrap();
    entity
}

fn circle(world: &World, entity: Entity) -> &CircleCollider {
    world.collider_as::<CircleCollider>(entity).unwrap()
}

#[test]
fn test_point_on_boundary_collides() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(5.0).unwrap());

    assert_eq!(circle(&world, e).collides_with_point(Vec2::new(3.0, 4.0)), Ok(true));
}

#[test]
fn test_point_just_outside_misses() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(5.0).unwrap());

    assert_eq!(circle(&world, e).collides_with_point(Vec2::new(3.0, 4.0001)), Ok(false));
}

#[test]
fn test_line_through_center_collides() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let collider = CircleCollider::with_radius_offset(2.0, Vec2::new(10.0, 10.0)).unwrap();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), collider);

    assert_eq!(
        circle(&world, e).collides_with_line(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0)),
        Ok(true)
    );
}

#[test]
fn test_line_past_radius_misses() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let collider = CircleCollider::with_radius_offset(2.0, Vec2::new(10.0, 10.0)).unwrap();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), collider);

    assert_eq!(
        circle(&world, e).collides_with_line(Vec2::new(0.0, 13.0), Vec2::new(20.0, 13.0)),
        Ok(false)
    );
}

#[test]
fn test_tangent_circles_collide() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let a = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(3.0).unwrap());
    let b = spawn_circle(
        &mut world,
        &manager,
        TransformComponent::identity(),
        CircleCollider::with_radius_offset(4.0, Vec2::new(7.0, 0.0)).unwrap(),
    );

    let other = world.collider(b).unwrap();
    assert_eq!(circle(&world, a).collides_with(other), Ok(true));
}

#[test]
fn test_separated_circles_miss() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let a = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(3.0).unwrap());
    let b = spawn_circle(
        &mut world,
        &manager,
        TransformComponent::identity(),
        CircleCollider::with_radius_offset(4.0, Vec2::new(7.0001, 0.0)).unwrap(),
    );

    let other = world.collider(b).unwrap();
    assert_eq!(circle(&world, a).collides_with(other), Ok(false));
}

#[test]
fn test_scale_two_doubles_real_radius() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let transform = TransformComponent::identity().with_uniform_scale(2.0);
    let e = spawn_circle(&mut world, &manager, transform, CircleCollider::with_radius(1.0).unwrap());
    let collider = circle(&world, e);

    assert_eq!(collider.real_radius(), Ok(2.0));
    assert_eq!(collider.collides_with_point(Vec2::new(2.0, 0.0)), Ok(true));
    assert_eq!(collider.collides_with_point(Vec2::new(2.0001, 0.0)), Ok(false));
}

#[test]
fn test_point_queries_match_distance_to_center() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let transform = TransformComponent::from_position(Vec2::new(-3.0, 2.0)).with_uniform_scale(1.5);
    let e = spawn_circle(
        &mut world,
        &manager,
        transform,
        CircleCollider::with_radius_offset(2.0, Vec2::new(1.0, 1.0)).unwrap(),
    );
    let collider = circle(&world, e);
    let center = collider.position().unwrap();
    let radius = collider.real_radius().unwrap();

    for step in 0..64 {
        let angle = step as f32 * 0.1;
        let direction = Vec2::new(angle.cos(), angle.sin());
        assert_eq!(collider.collides_with_point(center + direction * (radius * 0.99)), Ok(true));
        assert_eq!(collider.collides_with_point(center + direction * (radius * 1.01)), Ok(false));
    }
}

#[test]
fn test_line_queries_match_segment_distance() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(1.0).unwrap());
    let collider = circle(&world, e);

    // Segment whose closest point is an endpoint
    assert_eq!(collider.collides_with_line(Vec2::new(0.5, 0.5), Vec2::new(5.0, 5.0)), Ok(true));
    assert_eq!(collider.collides_with_line(Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)), Ok(false));
    // Degenerate segment behaves like a point
    let p = Vec2::new(0.0, 1.0);
    assert_eq!(collider.collides_with_line(p, p), collider.collides_with_point(p));
}

#[test]
fn test_circle_circle_is_symmetric() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let offsets = [0.0, 2.5, 4.9, 5.0, 5.1, 8.0];

    for dx in offsets {
        let a = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(2.0).unwrap());
        let b = spawn_circle(
            &mut world,
            &manager,
            TransformComponent::from_position(Vec2::new(dx, 0.0)),
            CircleCollider::with_radius(3.0).unwrap(),
        );

        let (ca, cb) = (world.collider(a).unwrap(), world.collider(b).unwrap());
        assert_eq!(ca.collides_with(cb), cb.collides_with(ca), "asymmetric at dx = {dx}");
        world.despawn(a);
        world.despawn(b);
    }
}

#[test]
fn test_real_radius_scales_linearly() {
    let manager = CollisionManager::new();
    let mut world = World::new();

    for scale in [0.5_f32, 1.0, 2.0, 3.0, 10.0] {
        let e = spawn_circle(
            &mut world,
            &manager,
            TransformComponent::identity().with_uniform_scale(scale),
            CircleCollider::with_radius(1.5).unwrap(),
        );
        assert_relative_eq!(circle(&world, e).real_radius().unwrap(), 1.5 * scale);
    }
}

#[test]
fn test_non_uniform_scale_uses_larger_component() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let transform = TransformComponent::identity().with_scale(Vec2::new(1.0, 3.0));
    let e = spawn_circle(&mut world, &manager, transform, CircleCollider::with_radius(2.0).unwrap());

    assert_relative_eq!(circle(&world, e).real_radius().unwrap(), 6.0);
    // Still a circle: reaches as far along x as along y
    assert_eq!(circle(&world, e).collides_with_point(Vec2::new(6.0, 0.0)), Ok(true));
}

#[test]
fn test_auto_size_without_sprite_fails() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let entity = world.spawn(TransformComponent::identity());

    assert_eq!(
        world.attach_collider(entity, CircleCollider::new(), &manager),
        Err(ColliderError::MissingSprite(entity))
    );
}

#[test]
fn test_circle_against_rect() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let c = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(2.0).unwrap());
    let near = world.spawn(TransformComponent::from_position(Vec2::new(2.0, -1.0)));
    let far = world.spawn(TransformComponent::from_position(Vec2::new(2.1, -1.0)));
    world.attach_collider(near, RectCollider::with_size(4.0, 2.0).unwrap(), &manager).unwrap();
    world.attach_collider(far, RectCollider::with_size(4.0, 2.0).unwrap(), &manager).unwrap();

    let circle_collider = world.collider(c).unwrap();
    assert_eq!(circle_collider.collides_with(world.collider(near).unwrap()), Ok(true));
    assert_eq!(circle_collider.collides_with(world.collider(far).unwrap()), Ok(false));
    // Rect side agrees
    assert_eq!(world.collider(near).unwrap().collides_with(circle_collider), Ok(true));
}

#[test]
fn test_against_uninitialized_other_fails() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(1.0).unwrap());
    let loose = CircleCollider::with_radius(1.0).unwrap();

    assert_eq!(circle(&world, e).collides_with(&loose), Err(ColliderError::NotInitialized));
}

#[test]
fn test_use_after_destroy() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(1.0).unwrap());
    world.collider_mut(e).unwrap().destroy().unwrap();

    let collider = circle(&world, e);
    assert_eq!(collider.collides_with_point(Vec2::zeros()), Err(ColliderError::UseAfterDestroy));
    assert_eq!(collider.draw_segments(), Err(ColliderError::UseAfterDestroy));
    assert_eq!(collider.position(), Err(ColliderError::UseAfterDestroy));
    assert!(!manager.is_registered(e));
}

#[test]
fn test_layer_membership_after_init() {
    let mut manager = CollisionManager::new();
    manager.register_layer("enemy").unwrap();
    let mut world = World::new();
    let e = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(1.0).unwrap());

    let base = world.collider_mut(e).unwrap().base_mut();
    assert_eq!(base.add_layer("enemy"), Ok(true));
    assert_eq!(base.add_layer("enemy"), Ok(false));
    assert_eq!(base.add_layer("ghost"), Err(ColliderError::UnknownLayer("ghost".to_string())));
    assert!(!base.contains_layer("ghost"));
    assert_eq!(manager.members_of("enemy"), vec![e]);

    let base = world.collider_mut(e).unwrap().base_mut();
    assert_eq!(base.remove_layer("default"), Ok(true));
    assert!(matches!(base.remove_layer("enemy"), Err(ColliderError::InvalidArgument(_))));
    assert!(manager.members_of("default").is_empty());
}

/// A shape with no narrow-phase test against circles
#[derive(Debug)]
struct Capsule {
    base: ColliderBase,
}

impl Collider for Capsule {
    fn base(&self) -> &ColliderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColliderBase {
        &mut self.base
    }

    fn initialize(&mut self, ctx: &InitContext<'_>) -> Result<(), ColliderError> {
        self.base.register(ctx)
    }

    fn shape(&self) -> Result<ColliderShape, ColliderError> {
        self.base.ensure_active()?;
        Ok(ColliderShape::Custom {
            kind: "capsule",
            bounds: Rect::new(self.base.transform().position, Vec2::new(1.0, 2.0)),
        })
    }

    fn collides_with_point(&self, _point: Vec2) -> Result<bool, ColliderError> {
        self.base.ensure_active()?;
        Ok(false)
    }

    fn collides_with_line(&self, _start: Vec2, _end: Vec2) -> Result<bool, ColliderError> {
        self.base.ensure_active()?;
        Ok(false)
    }

    fn collides_with(&self, _other: &dyn Collider) -> Result<bool, ColliderError> {
        self.base.ensure_active()?;
        Ok(false)
    }

    fn draw_with_color(&self, _draw: &mut dyn crate::debug::DebugDraw, _color: crate::foundation::math::Color) -> Result<(), ColliderError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_unsupported_shape_pair_reports_no_collision() {
    let manager = CollisionManager::new();
    let mut world = World::new();
    let c = spawn_circle(&mut world, &manager, TransformComponent::identity(), CircleCollider::with_radius(5.0).unwrap());
    let other = world.spawn(TransformComponent::identity());
    world.attach_collider(other, Capsule { base: ColliderBase::new(None) }, &manager).unwrap();

    logging::capture::install();
    logging::capture::take();

    // Overlapping in space, but there is no circle/capsule test
    assert_eq!(circle(&world, c).collides_with(world.collider(other).unwrap()), Ok(false));

    let warnings: Vec<String> = logging::capture::take()
        .into_iter()
        .filter(|(level, _)| *level == log::Level::Warn)
        .map(|(_, message)| message)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("no collision test between circle and custom shape 'capsule'"), "{warnings:?}");
    assert!(matches!(
        world.collider(other).unwrap().shape(),
        Ok(ColliderShape::Custom { kind: "capsule", .. })
    ));
}
