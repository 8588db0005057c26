use glam::Vec3;
use super::*;

fn triangle() -> MeshData {
    MeshData {
        positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        tex_coords: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        indices: vec![0, 1, 2],
        ..MeshData::default()
    }
}

#[test]
fn test_valid_triangle() {
    let data = triangle();
    assert!(data.validate().is_ok());
    assert_eq!(data.vertex_count(), 3);
    assert!(!data.is_skinned());
}

#[test]
fn test_empty_mesh_rejected() {
    let err = MeshData::default().validate().unwrap_err();
    assert!(matches!(err, Error::InvalidResource(_)));
}

#[test]
fn test_ragged_positions_rejected() {
    let mut data = triangle();
    data.positions.push(1.0);
    assert!(data.validate().is_err());
}

#[test]
fn test_index_out_of_range_rejected() {
    let mut data = triangle();
    data.indices = vec![0, 1, 3];
    let err = data.validate().unwrap_err();
    assert!(format!("{}", err).contains("Index 3 out of range"));
}

#[test]
fn test_attribute_length_mismatch_rejected() {
    let mut data = triangle();
    data.normals.pop();
    assert!(data.validate().is_err());
}

#[test]
fn test_weights_without_joints_rejected() {
    let mut data = triangle();
    data.weights = vec![1.0; 3 * MAX_WEIGHTS];
    assert!(data.validate().is_err());

    data.joint_indices = vec![0; 3 * MAX_WEIGHTS];
    assert!(data.validate().is_ok());
    assert!(data.is_skinned());
}

#[test]
fn test_bounding_radius_upper_bounds_every_vertex() {
    let data = MeshData {
        positions: vec![
            3.0, 0.0, 0.0,
            0.0, -4.0, 0.0,
            1.0, 1.0, -2.0,
            -2.5, 3.5, 1.5,
        ],
        indices: vec![0, 1, 2, 1, 2, 3],
        ..MeshData::default()
    };
    let radius = data.bounding_radius();
    for v in data.vertices() {
        assert!(v.length() <= radius + 1e-6, "{:?} escapes radius {}", v, radius);
    }
    // (max|x|, max|y|, max|z|) = (3, 4, 2)
    assert!((radius - Vec3::new(3.0, 4.0, 2.0).length()).abs() < 1e-6);
}

#[test]
fn test_aabb() {
    let aabb = triangle().aabb().unwrap();
    assert_eq!(aabb.min, Vec3::ZERO);
    assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 0.0));
}
