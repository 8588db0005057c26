//! Scene module
//!
//! Entities, their per-mesh batches, lights, fog and the sky box.

mod entity;
mod fog;
mod light;
mod scene;
mod sky_box;

pub use entity::{
    AnimationState, Entity, EntityKey, EntityKind, InstancedMeshKey, MeshHandle, MeshKey,
};
pub use fog::Fog;
pub use light::{
    Attenuation, DirectionalLight, PointLight, SceneLight, SpotLight,
    MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use scene::Scene;
pub use sky_box::SkyBox;
