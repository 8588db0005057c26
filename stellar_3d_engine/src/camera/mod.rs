//! Camera module: first-person camera, bounds, frustum and culling.

mod bounds;
mod camera;
mod culling_filter;
mod frustum;

pub use bounds::AABB;
pub use camera::Camera;
pub use culling_filter::{CullStats, FrustumCullingFilter};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
