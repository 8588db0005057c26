/// Entity: one placed instance of a shared mesh.
///
/// Entities never own their mesh. They reference it through a key into the
/// `Scene`, so any number of entities share one set of GPU buffers.
///
/// Per-kind behavior is carried by `EntityKind` rather than by subtypes:
/// a collidable entity holds its rigid body handle and an animated entity
/// holds its joint matrix frames.

use glam::{EulerRot, Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::error::{Error, Result};
use crate::physics::BodyHandle;

new_key_type! {
    /// Stable key of an entity inside a `Scene`
    pub struct EntityKey;
    /// Stable key of a regular mesh inside a `Scene`
    pub struct MeshKey;
    /// Stable key of an instanced mesh inside a `Scene`
    pub struct InstancedMeshKey;
}

/// Which batch an entity draws through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshHandle {
    Regular(MeshKey),
    Instanced(InstancedMeshKey),
}

impl From<MeshKey> for MeshHandle {
    fn from(key: MeshKey) -> Self {
        MeshHandle::Regular(key)
    }
}

impl From<InstancedMeshKey> for MeshHandle {
    fn from(key: InstancedMeshKey) -> Self {
        MeshHandle::Instanced(key)
    }
}

// ===== ANIMATION =====

/// Precomputed joint matrices, one `Vec<Mat4>` per frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    frames: Vec<Vec<Mat4>>,
    current: usize,
}

impl AnimationState {
    pub fn new(frames: Vec<Vec<Mat4>>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::InvalidResource("Animation needs at least one frame".to_string()));
        }
        Ok(Self { frames, current: 0 })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Joint matrices of the current frame
    pub fn current_joints(&self) -> &[Mat4] {
        &self.frames[self.current]
    }

    /// Advance one frame, wrapping to the first
    pub fn next_frame(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }
}

/// Capability tag of an entity
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Moved only by game code
    Static,
    /// Transform is owned by a rigid body once registered
    Collidable { body: BodyHandle },
    /// Skinned mesh, uploads joint matrices before each draw
    Animated(AnimationState),
}

// ===== ENTITY =====

#[derive(Debug, Clone)]
pub struct Entity {
    mesh: MeshHandle,
    position: Vec3,
    rotation: Quat,
    scale: f32,
    kind: EntityKind,
    inside_frustum: bool,
    texture_pos: u32,
    selected: bool,
    casts_shadow: bool,
    frustum_culling: bool,
    /// Physics tick whose transform was last copied in
    pub(crate) synced_tick: Option<u64>,
}

impl Entity {
    pub fn new(mesh: impl Into<MeshHandle>) -> Self {
        Self {
            mesh: mesh.into(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            kind: EntityKind::Static,
            inside_frustum: true,
            texture_pos: 0,
            selected: false,
            casts_shadow: true,
            frustum_culling: true,
            synced_tick: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Set the rotation from XYZ Euler angles in degrees
    pub fn set_rotation_euler_degrees(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(
            EulerRot::XYZ, x.to_radians(), y.to_radians(), z.to_radians(),
        );
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut EntityKind {
        &mut self.kind
    }

    /// Rigid body, for collidable entities
    pub fn body(&self) -> Option<BodyHandle> {
        match self.kind {
            EntityKind::Collidable { body } => Some(body),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&AnimationState> {
        match &self.kind {
            EntityKind::Animated(state) => Some(state),
            _ => None,
        }
    }

    pub fn animation_mut(&mut self) -> Option<&mut AnimationState> {
        match &mut self.kind {
            EntityKind::Animated(state) => Some(state),
            _ => None,
        }
    }

    /// Visibility flag written by the culling filter
    pub fn is_inside_frustum(&self) -> bool {
        self.inside_frustum
    }

    pub fn set_inside_frustum(&mut self, inside: bool) {
        self.inside_frustum = inside;
    }

    /// Cell index into the material's texture atlas
    pub fn texture_pos(&self) -> u32 {
        self.texture_pos
    }

    pub fn set_texture_pos(&mut self, pos: u32) {
        self.texture_pos = pos;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    pub fn set_casts_shadow(&mut self, casts: bool) {
        self.casts_shadow = casts;
    }

    /// `false` keeps the entity visible regardless of the camera frustum
    pub fn frustum_culling(&self) -> bool {
        self.frustum_culling
    }

    pub fn set_frustum_culling(&mut self, enabled: bool) {
        self.frustum_culling = enabled;
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
