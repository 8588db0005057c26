//! Integration tests for cascade layout and culling math
//!
//! Pure math only: no GPU device is involved.

use stellar_3d_engine::glam::{Mat4, Vec3};
use stellar_3d_engine::stellar3d::camera::{Camera, Frustum, FrustumCullingFilter, Transformation};
use stellar_3d_engine::stellar3d::config::EngineConfig;
use stellar_3d_engine::stellar3d::scene::DirectionalLight;
use stellar_3d_engine::stellar3d::shadow::{build_cascades, cascade_for_depth};

#[test]
fn test_default_config_cascades_cover_view_range() {
    let config = EngineConfig::default();
    let p = config.projection;
    let splits = config.shadow.split_distances(p.z_far);
    assert_eq!(splits, vec![50.0, 100.0, 1000.0]);

    let cascades = build_cascades(p.z_near, &splits).unwrap();
    assert_eq!(cascades.first().unwrap().z_near(), p.z_near);
    assert_eq!(cascades.last().unwrap().z_far(), p.z_far);
    for pair in cascades.windows(2) {
        assert_eq!(pair[0].z_far(), pair[1].z_near());
    }

    let mut depth = p.z_near;
    while depth <= p.z_far {
        assert!(cascade_for_depth(&cascades, depth).is_some(), "depth {} uncovered", depth);
        depth += 7.5;
    }
}

#[test]
fn test_cube_ten_units_ahead_lands_in_first_cascade() {
    let config = EngineConfig::default();
    let p = config.projection;
    let cascades = build_cascades(p.z_near, &config.shadow.split_distances(p.z_far)).unwrap();

    let mut camera = Camera::default();
    let view = Transformation::update_view_matrix(&mut camera);
    let depth = -view.transform_point3(Vec3::new(0.0, 0.0, -10.0)).z;
    assert_eq!(cascade_for_depth(&cascades, depth), Some(0));

    let mut filter = FrustumCullingFilter::new();
    let mut transformation = Transformation::new();
    let projection = transformation.get_projection_matrix(p.fov_radians(), 1280.0, 720.0, p.z_near, p.z_far);
    filter.update_frustum(&projection, &view);
    assert!(filter.inside_frustum(Vec3::new(0.0, 0.0, -10.0), 0.87));
}

#[test]
fn test_every_cascade_light_frustum_contains_its_slice() {
    let config = EngineConfig::default();
    let p = config.projection;
    let mut cascades = build_cascades(p.z_near, &config.shadow.split_distances(p.z_far)).unwrap();
    let light = DirectionalLight { direction: Vec3::new(-0.3, -1.0, -0.2), ..DirectionalLight::default() };
    let view = Mat4::look_at_rh(Vec3::new(4.0, 3.0, 8.0), Vec3::ZERO, Vec3::Y);

    for cascade in &mut cascades {
        cascade.update(p.fov_radians(), 16.0 / 9.0, &view, &light, config.shadow.light_offset);
        let frustum = Frustum::from_view_projection(&cascade.light_space_matrix());
        // Slice corners sit on the box boundary, allow for rounding
        for corner in cascade.corners() {
            let slack = 1e-3 * corner.length().max(1.0);
            assert!(frustum.intersects_sphere(*corner, slack), "corner {:?} outside", corner);
        }
        assert!(frustum.contains_point(cascade.centroid()));
    }
}
