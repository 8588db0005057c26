/// Procedural geometry
///
/// `ShapeDesc` is validated once in `build()`, producing the mesh data and
/// material for a unit-sized primitive centered on the origin.

use std::f32::consts::{PI, TAU};
use std::sync::Arc;
use glam::{Vec3, Vec4};
use crate::error::{Error, Result};
use super::material::Material;
use super::mesh_data::MeshData;
use super::texture::Texture;

/// Minimum subdivision for curved shapes
pub const MIN_SEGMENTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Unit cube, one quad per face
    Cube,
    /// Unit quad in the XY plane facing +Z
    Quad,
    /// UV sphere of radius 0.5
    Sphere { subdivisions: u32 },
    /// Cone of height 1 and base radius 0.5, apex on +Y
    Cone { segments: u32 },
    /// Capped cylinder of height 1 and radius 0.5 along Y
    Cylinder { segments: u32 },
}

/// Geometry construction options
#[derive(Debug, Clone)]
pub struct ShapeDesc {
    pub shape: Shape,
    /// Flat color (exclusive with `texture`)
    pub color: Option<Vec4>,
    /// Color texture (exclusive with `color`)
    pub texture: Option<Arc<Texture>>,
    pub reflectance: f32,
}

impl ShapeDesc {
    pub fn new(shape: Shape) -> Self {
        Self { shape, color: None, texture: None, reflectance: 0.0 }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Validate and generate the mesh data and material
    pub fn build(&self) -> Result<(MeshData, Material)> {
        let material = match (&self.color, &self.texture) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidResource(
                    "Shape accepts a color or a texture, not both".to_string(),
                ));
            }
            (Some(color), None) => Material::from_color(*color, self.reflectance),
            (None, Some(texture)) => Material::from_texture(texture.clone(), self.reflectance),
            (None, None) => Material::from_color(super::material::DEFAULT_COLOR, self.reflectance),
        };

        let data = match self.shape {
            Shape::Cube => cube(),
            Shape::Quad => quad(),
            Shape::Sphere { subdivisions } => {
                check_segments("Sphere subdivisions", subdivisions)?;
                sphere(subdivisions)
            }
            Shape::Cone { segments } => {
                check_segments("Cone segments", segments)?;
                cone(segments)
            }
            Shape::Cylinder { segments } => {
                check_segments("Cylinder segments", segments)?;
                cylinder(segments)
            }
        };

        Ok((data, material))
    }
}

fn check_segments(what: &str, count: u32) -> Result<()> {
    if count < MIN_SEGMENTS {
        return Err(Error::InvalidResource(format!(
            "{} must be at least {} (got {})", what, MIN_SEGMENTS, count
        )));
    }
    Ok(())
}

#[derive(Default)]
struct Builder {
    data: MeshData,
}

impl Builder {
    fn vertex(&mut self, p: Vec3, uv: [f32; 2], n: Vec3) -> u32 {
        let index = (self.data.positions.len() / 3) as u32;
        self.data.positions.extend_from_slice(&p.to_array());
        self.data.tex_coords.extend_from_slice(&uv);
        self.data.normals.extend_from_slice(&n.to_array());
        index
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.data.indices.extend_from_slice(&[a, b, c]);
    }

    /// Counter-clockwise quad a-b-c-d
    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangle(a, b, c);
        self.triangle(a, c, d);
    }
}

fn cube() -> MeshData {
    let mut b = Builder::default();
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (normal, right, up) in faces {
        let center = normal * 0.5;
        let (r, u) = (right * 0.5, up * 0.5);
        let v0 = b.vertex(center - r - u, [0.0, 1.0], normal);
        let v1 = b.vertex(center + r - u, [1.0, 1.0], normal);
        let v2 = b.vertex(center + r + u, [1.0, 0.0], normal);
        let v3 = b.vertex(center - r + u, [0.0, 0.0], normal);
        b.quad(v0, v1, v2, v3);
    }
    b.data
}

fn quad() -> MeshData {
    let mut b = Builder::default();
    let v0 = b.vertex(Vec3::new(-0.5, -0.5, 0.0), [0.0, 1.0], Vec3::Z);
    let v1 = b.vertex(Vec3::new(0.5, -0.5, 0.0), [1.0, 1.0], Vec3::Z);
    let v2 = b.vertex(Vec3::new(0.5, 0.5, 0.0), [1.0, 0.0], Vec3::Z);
    let v3 = b.vertex(Vec3::new(-0.5, 0.5, 0.0), [0.0, 0.0], Vec3::Z);
    b.quad(v0, v1, v2, v3);
    b.data
}

fn sphere(subdivisions: u32) -> MeshData {
    let mut b = Builder::default();
    let stacks = subdivisions;
    let slices = subdivisions * 2;

    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let theta = TAU * j as f32 / slices as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            b.vertex(n * 0.5, [j as f32 / slices as f32, i as f32 / stacks as f32], n);
        }
    }

    let row = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let c = a + row;
            b.quad(a, a + 1, c + 1, c);
        }
    }
    b.data
}

fn cone(segments: u32) -> MeshData {
    let mut b = Builder::default();
    let apex = Vec3::new(0.0, 0.5, 0.0);
    let slope = 0.5_f32.atan2(1.0);

    // Side: one apex vertex per segment so each face gets its own normal
    for i in 0..segments {
        let t0 = TAU * i as f32 / segments as f32;
        let t1 = TAU * (i + 1) as f32 / segments as f32;
        let mid = (t0 + t1) * 0.5;
        let n = Vec3::new(mid.cos() * slope.cos(), slope.sin(), mid.sin() * slope.cos()).normalize();
        let p0 = Vec3::new(t0.cos() * 0.5, -0.5, t0.sin() * 0.5);
        let p1 = Vec3::new(t1.cos() * 0.5, -0.5, t1.sin() * 0.5);
        let a = b.vertex(apex, [0.5, 0.0], n);
        let v0 = b.vertex(p0, [i as f32 / segments as f32, 1.0], n);
        let v1 = b.vertex(p1, [(i + 1) as f32 / segments as f32, 1.0], n);
        b.triangle(a, v1, v0);
    }

    cap(&mut b, segments, -0.5);
    b.data
}

fn cylinder(segments: u32) -> MeshData {
    let mut b = Builder::default();

    // Side: smooth normals, seam column duplicated for the UV wrap
    let first = (b.data.positions.len() / 3) as u32;
    for i in 0..=segments {
        let t = TAU * i as f32 / segments as f32;
        let n = Vec3::new(t.cos(), 0.0, t.sin());
        let u = i as f32 / segments as f32;
        b.vertex(n * 0.5 + Vec3::new(0.0, -0.5, 0.0), [u, 1.0], n);
        b.vertex(n * 0.5 + Vec3::new(0.0, 0.5, 0.0), [u, 0.0], n);
    }
    for i in 0..segments {
        let p0 = first + i * 2;
        let p1 = p0 + 2;
        b.quad(p0, p0 + 1, p1 + 1, p1);
    }

    cap(&mut b, segments, -0.5);
    cap(&mut b, segments, 0.5);
    b.data
}

/// Disc of radius 0.5 at height `y`, facing away from the origin
fn cap(b: &mut Builder, segments: u32, y: f32) {
    let normal = if y < 0.0 { Vec3::NEG_Y } else { Vec3::Y };
    let center = b.vertex(Vec3::new(0.0, y, 0.0), [0.5, 0.5], normal);
    let first = center + 1;
    for i in 0..segments {
        let t = TAU * i as f32 / segments as f32;
        b.vertex(
            Vec3::new(t.cos() * 0.5, y, t.sin() * 0.5),
            [0.5 + t.cos() * 0.5, 0.5 + t.sin() * 0.5],
            normal,
        );
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        if y < 0.0 {
            b.triangle(center, first + i, first + next);
        } else {
            b.triangle(center, first + next, first + i);
        }
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
