use glam::{Quat, Vec3};
use super::*;

fn backend() -> RapierBackend {
    RapierBackend::new(&PhysicsConfig::default())
}

fn ball_at(backend: &mut RapierBackend, y: f32) -> BodyHandle {
    let desc = RigidBodyDesc::dynamic(CollisionShape::Ball { radius: 0.5 });
    backend.add_rigid_body(&desc, WorldTransform::new(Vec3::new(0.0, y, 0.0), Quat::IDENTITY)).unwrap()
}

#[test]
fn test_dynamic_body_falls() {
    let mut backend = backend();
    let ball = ball_at(&mut backend, 10.0);

    for _ in 0..60 {
        assert_eq!(backend.step_simulation(1.0 / 60.0, 10), 1);
    }
    let y = backend.world_transform(ball).unwrap().position.y;
    // Roughly g/2 after one second of free fall
    assert!(y < 6.0 && y > 4.0, "y = {}", y);
}

#[test]
fn test_fixed_body_stays_put() {
    let mut backend = backend();
    let desc = RigidBodyDesc::fixed(CollisionShape::Cuboid { half_extents: Vec3::new(5.0, 0.5, 5.0) });
    let ground = backend.add_rigid_body(&desc, WorldTransform::default()).unwrap();
    backend.step_simulation(0.5, 60);
    assert_eq!(backend.world_transform(ground).unwrap().position, Vec3::ZERO);
}

#[test]
fn test_sub_steps_are_bounded() {
    let mut backend = backend();
    ball_at(&mut backend, 10.0);
    // One second at 1/60 would need 60 steps
    assert_eq!(backend.step_simulation(1.0, 10), 10);
    assert!(backend.accumulated_time() < backend.fixed_timestep());
}

#[test]
fn test_partial_step_is_carried() {
    let mut backend = backend();
    let dt = backend.fixed_timestep();
    assert_eq!(backend.step_simulation(dt * 0.5, 10), 0);
    assert_eq!(backend.step_simulation(dt * 0.6, 10), 1);
}

#[test]
fn test_remove_body() {
    let mut backend = backend();
    let ball = ball_at(&mut backend, 1.0);
    assert_eq!(backend.body_count(), 1);
    assert!(backend.remove_rigid_body(ball));
    assert!(!backend.remove_rigid_body(ball));
    assert_eq!(backend.body_count(), 0);
    assert!(backend.world_transform(ball).is_none());
}

#[test]
fn test_set_world_transform() {
    let mut backend = backend();
    let ball = ball_at(&mut backend, 1.0);
    let rotation = Quat::from_rotation_y(1.0);
    let target = WorldTransform::new(Vec3::new(3.0, 4.0, 5.0), rotation);
    assert!(backend.set_world_transform(ball, target));

    let read = backend.world_transform(ball).unwrap();
    assert!((read.position - target.position).length() < 1e-5);
    assert!(read.rotation.angle_between(rotation) < 1e-4);
}

#[test]
fn test_identical_worlds_match_bit_for_bit() {
    let mut a = backend();
    let mut b = backend();
    let ha = ball_at(&mut a, 3.0);
    let hb = ball_at(&mut b, 3.0);
    for _ in 0..90 {
        a.step_simulation(1.0 / 60.0, 10);
        b.step_simulation(1.0 / 60.0, 10);
    }
    assert_eq!(a.world_transform(ha), b.world_transform(hb));
}
