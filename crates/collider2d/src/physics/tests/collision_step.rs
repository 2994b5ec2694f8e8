//! Manager steps over a populated world

use crate::core::config::PhysicsConfig;
use crate::ecs::{Entity, SpriteComponent, TransformComponent, World};
use crate::foundation::math::Vec2;
use crate::physics::{CircleCollider, CollisionManager, CollisionPair, RectCollider};

fn setup() -> (World, CollisionManager) {
    let config = PhysicsConfig::new().with_layer("player").with_layer("enemy").with_layer("pickup");
    (World::new(), CollisionManager::from_config(&config).unwrap())
}

fn spawn_circle(world: &mut World, manager: &CollisionManager, at: Vec2, radius: f32, layers: &[&str]) -> Entity {
    let entity = world.spawn(TransformComponent::from_position(at));
    let collider = CircleCollider::with_radius_and_layers(radius, layers.iter().copied()).unwrap();
    world.attach_collider(entity, collider, manager).unwrap();
    entity
}

#[test]
fn test_step_finds_overlapping_pairs() {
    let (mut world, mut manager) = setup();
    let a = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["player"]);
    let b = spawn_circle(&mut world, &manager, Vec2::new(1.5, 0.0), 1.0, &["player"]);
    let _far = spawn_circle(&mut world, &manager, Vec2::new(50.0, 0.0), 1.0, &["player"]);

    let pairs = manager.step(&mut world);
    assert_eq!(pairs.len(), 1);
    assert!(pairs.contains(&CollisionPair::new(b, a)));
    assert!(manager.is_colliding(a, b));
}

#[test]
fn test_layers_filter_candidates() {
    let (mut world, mut manager) = setup();
    let player = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["player"]);
    let _pickup = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["pickup"]);
    let enemy = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["enemy", "player"]);

    let pairs = manager.step(&mut world);
    assert_eq!(pairs.len(), 1);
    assert!(pairs.contains(&CollisionPair::new(player, enemy)));
}

#[test]
fn test_step_uses_latest_transforms() {
    let (mut world, mut manager) = setup();
    let a = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["default"]);
    let b = spawn_circle(&mut world, &manager, Vec2::new(10.0, 0.0), 1.0, &["default"]);

    assert!(manager.step(&mut world).is_empty());

    world.transform_mut(b).unwrap().position = Vec2::new(2.0, 0.0);
    assert!(manager.step(&mut world).contains(&CollisionPair::new(a, b)));
}

#[test]
fn test_started_and_ended_pairs() {
    let (mut world, mut manager) = setup();
    let a = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["default"]);
    let b = spawn_circle(&mut world, &manager, Vec2::new(5.0, 0.0), 1.0, &["default"]);
    let pair = CollisionPair::new(a, b);

    manager.step(&mut world);
    assert_eq!(manager.started_pairs().count(), 0);

    world.transform_mut(b).unwrap().translate(Vec2::new(-4.0, 0.0));
    manager.step(&mut world);
    assert_eq!(manager.started_pairs().collect::<Vec<_>>(), vec![&pair]);
    assert_eq!(manager.ended_pairs().count(), 0);

    // Still touching: neither started nor ended
    manager.step(&mut world);
    assert_eq!(manager.started_pairs().count(), 0);

    world.transform_mut(b).unwrap().translate(Vec2::new(4.0, 0.0));
    manager.step(&mut world);
    assert_eq!(manager.ended_pairs().collect::<Vec<_>>(), vec![&pair]);
    assert!(manager.current_pairs().is_empty());
}

#[test]
fn test_despawned_entities_leave_the_step() {
    let (mut world, mut manager) = setup();
    let a = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["default"]);
    let b = spawn_circle(&mut world, &manager, Vec2::zeros(), 1.0, &["default"]);
    assert_eq!(manager.step(&mut world).len(), 1);

    world.despawn(b);
    assert_eq!(manager.registered_count(), 1);
    assert!(manager.step(&mut world).is_empty());
    assert!(manager.is_registered(a));
}

#[test]
fn test_mixed_shapes_in_one_step() {
    let (mut world, mut manager) = setup();
    let ball = spawn_circle(&mut world, &manager, Vec2::new(0.0, 0.0), 1.0, &["default"]);

    let crate_entity = world.spawn(TransformComponent::from_position(Vec2::new(0.5, -0.5)));
    world.set_sprite(crate_entity, SpriteComponent::new("crate.png", 2.0, 2.0)).unwrap();
    world.attach_collider(crate_entity, RectCollider::new(), &manager).unwrap();

    let wall = world.spawn(TransformComponent::from_position(Vec2::new(20.0, 0.0)));
    world.attach_collider(wall, RectCollider::with_size(1.0, 10.0).unwrap(), &manager).unwrap();

    let pairs = manager.step(&mut world);
    assert_eq!(pairs.len(), 1);
    assert!(pairs.contains(&CollisionPair::new(ball, crate_entity)));
}
