use glam::{Mat4, Vec3};
use super::*;
use crate::graphics_device::mock_graphics_device::MockCommandList;

fn point(x: f32) -> PointLight {
    PointLight::new(Vec3::ONE, Vec3::new(x, 0.0, 0.0), 1.0)
}

#[test]
fn test_spot_cut_off_is_cosine() {
    let spot = SpotLight::new(point(0.0), Vec3::NEG_Z, 60.0);
    assert!((spot.cut_off - 0.5).abs() < 1e-6);
}

#[test]
fn test_upload_point_light_in_view_space() {
    let light = SceneLight {
        point_lights: vec![point(1.0)],
        ..SceneLight::default()
    };
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let mut cmd = MockCommandList::new();
    light.upload(&mut cmd, &view).unwrap();

    let positions = cmd.uniform_values("pointLights[0].position");
    assert_eq!(positions, vec![&UniformValue::Vec3(Vec3::new(1.0, 0.0, -5.0))]);
}

#[test]
fn test_extra_point_lights_dropped() {
    let light = SceneLight {
        point_lights: (0..MAX_POINT_LIGHTS + 2).map(|i| point(i as f32)).collect(),
        ..SceneLight::default()
    };
    let mut cmd = MockCommandList::new();
    light.upload(&mut cmd, &Mat4::IDENTITY).unwrap();

    assert_eq!(cmd.uniform_values(&format!("pointLights[{}].position", MAX_POINT_LIGHTS - 1)).len(), 1);
    assert!(cmd.uniform_values(&format!("pointLights[{}].position", MAX_POINT_LIGHTS)).is_empty());
}

#[test]
fn test_extra_spot_lights_dropped() {
    let light = SceneLight {
        spot_lights: vec![SpotLight::new(point(0.0), Vec3::NEG_Y, 30.0); MAX_SPOT_LIGHTS + 1],
        ..SceneLight::default()
    };
    let mut cmd = MockCommandList::new();
    light.upload(&mut cmd, &Mat4::IDENTITY).unwrap();
    assert_eq!(cmd.count("set_uniform(spotLights[") / 8, MAX_SPOT_LIGHTS);
}

#[test]
fn test_directional_light_points_towards_light() {
    let light = SceneLight::default();
    let mut cmd = MockCommandList::new();
    light.upload(&mut cmd, &Mat4::IDENTITY).unwrap();
    assert_eq!(
        cmd.uniform_values("directionalLight.direction"),
        vec![&UniformValue::Vec4(glam::Vec4::new(0.0, 1.0, 0.0, 0.0))]
    );
}
