//! Integration tests for fixed-step physics
//!
//! Two worlds fed the same tick sequence must agree bit for bit, however
//! much wall-clock time passes between ticks.

use std::time::Duration;
use stellar_3d_engine::glam::{Quat, Vec3};
use stellar_3d_engine::stellar3d::config::PhysicsConfig;
use stellar_3d_engine::stellar3d::physics::{
    BodyHandle, CollisionShape, PhysicsBackend, RapierBackend, RigidBodyDesc, WorldTransform,
};

// ============================================================================
// HELPERS
// ============================================================================

/// Ground slab plus a short stack of boxes and a ball
fn build_world() -> (RapierBackend, Vec<BodyHandle>) {
    let config = PhysicsConfig::default();
    let mut world = RapierBackend::new(&config);

    let ground = RigidBodyDesc::fixed(CollisionShape::Cuboid { half_extents: Vec3::new(20.0, 0.5, 20.0) });
    world.add_rigid_body(&ground, WorldTransform::default()).unwrap();

    let mut bodies = Vec::new();
    for i in 0..3 {
        let desc = RigidBodyDesc::dynamic(CollisionShape::Cuboid { half_extents: Vec3::splat(0.5) })
            .with_restitution(0.2);
        let transform = WorldTransform::new(
            Vec3::new(0.1 * i as f32, 2.0 + 1.1 * i as f32, 0.0),
            Quat::from_rotation_y(0.3 * i as f32),
        );
        bodies.push(world.add_rigid_body(&desc, transform).unwrap());
    }
    let ball = RigidBodyDesc::dynamic(CollisionShape::Ball { radius: 0.4 }).with_restitution(0.6);
    bodies.push(world.add_rigid_body(&ball, WorldTransform::new(Vec3::new(2.0, 6.0, 0.5), Quat::IDENTITY)).unwrap());

    (world, bodies)
}

fn snapshot(world: &RapierBackend, bodies: &[BodyHandle]) -> Vec<WorldTransform> {
    bodies.iter().map(|&b| world.world_transform(b).unwrap()).collect()
}

fn tick(world: &mut RapierBackend) -> u32 {
    let config = PhysicsConfig::default();
    world.step_simulation(config.fixed_timestep, config.max_sub_steps)
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn test_identical_tick_sequences_match_bit_for_bit() {
    let (mut a, bodies_a) = build_world();
    let (mut b, bodies_b) = build_world();

    for frame in 0..120 {
        tick(&mut a);
        // Uneven wall-clock gaps on one side only
        if frame % 20 == 0 {
            std::thread::sleep(Duration::from_millis(3));
        }
        tick(&mut b);
    }

    let snap_a = snapshot(&a, &bodies_a);
    let snap_b = snapshot(&b, &bodies_b);
    for (ta, tb) in snap_a.iter().zip(&snap_b) {
        assert_eq!(ta.position.to_array().map(f32::to_bits), tb.position.to_array().map(f32::to_bits));
        assert_eq!(ta.rotation.to_array().map(f32::to_bits), tb.rotation.to_array().map(f32::to_bits));
    }
}

#[test]
fn test_each_tick_runs_exactly_one_step() {
    let (mut world, _) = build_world();
    for _ in 0..30 {
        assert_eq!(tick(&mut world), 1);
    }
}

#[test]
fn test_bodies_settle_on_the_ground() {
    let (mut world, bodies) = build_world();
    for _ in 0..600 {
        tick(&mut world);
    }
    for transform in snapshot(&world, &bodies) {
        // Ground top is at y = 0.5
        assert!(transform.position.y > 0.5, "fell through: {:?}", transform.position);
        assert!(transform.position.y < 6.0, "never fell: {:?}", transform.position);
    }
}

#[test]
fn test_removed_body_leaves_no_trace() {
    let (mut world, bodies) = build_world();
    let before = world.body_count();
    assert!(world.remove_rigid_body(bodies[0]));
    assert_eq!(world.body_count(), before - 1);

    for _ in 0..60 {
        tick(&mut world);
    }
    assert!(world.world_transform(bodies[0]).is_none());
    assert!(world.world_transform(bodies[1]).is_some());
}
