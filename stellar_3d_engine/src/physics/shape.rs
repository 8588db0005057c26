/// Rigid body descriptions
///
/// Shapes are validated here, before any solver sees them.

use glam::Vec3;
use crate::error::{Error, Result};
use crate::resource::MeshData;

/// Fewest points spanning a volume
pub const MIN_HULL_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by the solver
    Dynamic,
    /// Never moves
    Fixed,
    /// Moved by game code, pushes dynamic bodies
    Kinematic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
    /// Y-aligned capsule
    Capsule { half_height: f32, radius: f32 },
    ConvexHull { points: Vec<Vec3> },
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl CollisionShape {
    /// Convex hull of every vertex of `data`
    pub fn from_mesh_data(data: &MeshData) -> Self {
        CollisionShape::ConvexHull { points: data.vertices().collect() }
    }

    /// Cuboid enclosing `data`, scaled by `scale`
    pub fn bounding_cuboid(data: &MeshData, scale: f32) -> Result<Self> {
        let aabb = data.aabb().ok_or_else(|| {
            Error::Physics("Cannot bound a mesh without vertices".to_string())
        })?;
        let half = (aabb.max - aabb.min) * 0.5 * scale;
        Ok(CollisionShape::Cuboid { half_extents: half })
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            CollisionShape::Cuboid { half_extents } => {
                if !half_extents.to_array().into_iter().all(positive) {
                    return Err(Error::Physics(format!(
                        "Cuboid half extents must be positive (got {:?})", half_extents
                    )));
                }
            }
            CollisionShape::Ball { radius } => {
                if !positive(*radius) {
                    return Err(Error::Physics(format!("Ball radius must be positive (got {})", radius)));
                }
            }
            CollisionShape::Capsule { half_height, radius } => {
                if !positive(*radius) || !(half_height.is_finite() && *half_height >= 0.0) {
                    return Err(Error::Physics(format!(
                        "Invalid capsule (half height {}, radius {})", half_height, radius
                    )));
                }
            }
            CollisionShape::ConvexHull { points } => {
                if points.len() < MIN_HULL_POINTS {
                    return Err(Error::Physics(format!(
                        "Convex hull needs at least {} points (got {})", MIN_HULL_POINTS, points.len()
                    )));
                }
                if !points.iter().all(|p| p.is_finite()) {
                    return Err(Error::Physics("Convex hull points must be finite".to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Everything needed to register one body
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyDesc {
    pub shape: CollisionShape,
    pub body_type: BodyType,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl RigidBodyDesc {
    pub fn dynamic(shape: CollisionShape) -> Self {
        Self {
            shape,
            body_type: BodyType::Dynamic,
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }

    pub fn fixed(shape: CollisionShape) -> Self {
        Self { body_type: BodyType::Fixed, ..Self::dynamic(shape) }
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        if !(self.density.is_finite() && self.density >= 0.0) {
            return Err(Error::Physics(format!("Density must be non-negative (got {})", self.density)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
