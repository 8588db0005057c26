//! Resource module
//!
//! CPU-side mesh data, GPU meshes (regular and instanced), materials,
//! textures with their path-keyed cache, and procedural shapes.

pub mod instanced_mesh;
pub mod material;
pub mod mesh;
pub mod mesh_data;
pub mod shape;
pub mod texture;
pub mod texture_cache;

pub use instanced_mesh::{chunk_count, InstanceRaw, InstancedMesh};
pub use material::{Material, DEFAULT_COLOR};
pub use mesh::Mesh;
pub use mesh_data::{MeshData, MAX_WEIGHTS};
pub use shape::{Shape, ShapeDesc};
pub use texture::{atlas_offset, Texture, TextureImage, TextureLoader};
pub use texture_cache::TextureCache;
