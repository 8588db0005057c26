use super::*;

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!((config.window.width, config.window.height), (1280, 720));
    assert_eq!(config.projection.fov_degrees, 60.0);
    assert_eq!(config.shadow.map_size, 4096);
    assert_eq!(config.physics.max_sub_steps, 10);
    assert_eq!(config.target_ups, 30);
    assert!(config.frustum_culling);
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_split_distances() {
    let shadow = ShadowConfig::default();
    assert_eq!(shadow.split_distances(1000.0), vec![50.0, 100.0, 1000.0]);
}

#[test]
fn test_zero_physics_timestep_rejected() {
    let mut config = EngineConfig::default();
    config.physics.fixed_timestep = 0.0;
    assert!(matches!(config.physics.validate(), Err(Error::InitializationFailed(_))));
    assert!(config.validate().is_err());

    config.physics.fixed_timestep = f32::INFINITY;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_window_rejected() {
    let mut config = EngineConfig::default();
    config.window.height = 0;
    assert!(matches!(config.validate(), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_inverted_clip_planes_rejected() {
    let mut config = EngineConfig::default();
    config.projection.z_near = 10.0;
    config.projection.z_far = 5.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_non_decreasing_divisors_rejected() {
    let mut config = EngineConfig::default();
    config.shadow.cascade_divisors = vec![10.0, 20.0, 1.0];
    assert!(config.validate().is_err());
}

#[test]
fn test_divisors_must_end_at_one() {
    let mut config = EngineConfig::default();
    config.shadow.cascade_divisors = vec![20.0, 10.0, 2.0];
    assert!(config.validate().is_err());
}

#[test]
fn test_single_cascade_is_valid() {
    let mut config = EngineConfig::default();
    config.shadow.cascade_divisors = vec![1.0];
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_instance_capacity_rejected() {
    let mut config = EngineConfig::default();
    config.instance_capacity = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_fov_radians() {
    let projection = ProjectionConfig::default();
    assert!((projection.fov_radians() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
}
