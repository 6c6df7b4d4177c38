//! Scene graph for the marketing pages
//!
//! A flat list of nodes (each a set of primitives with a transform) plus the
//! lights that shade them. Renderers read it, viewports own it.
//!
//! # Module Organization
//!
//! - `camera` - Perspective camera with aspect/projection handling
//! - `controls` - Damped orbit controls with zoom clamping
//! - `geometry` - Procedural box/cone meshes and normal generation
//! - `shading` - Ambient + directional vertex lighting

pub mod camera;
pub mod controls;
pub mod geometry;
pub mod shading;

pub use camera::PerspectiveCamera;
pub use controls::{ControlInput, OrbitControls, OrbitSettings};
pub use geometry::{box_mesh, cone_mesh, compute_normals};
pub use shading::shade_vertex;

use macroquad::color::Color;
use macroquad::math::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (XYZ order, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix: translate * rotate * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Surface appearance of a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Flat color, ignores lights
    Unlit(Color),
    /// Shaded by the scene's ambient and directional lights
    Lit(Color),
}

impl Material {
    pub fn base_color(&self) -> Color {
        match self {
            Material::Unlit(c) | Material::Lit(c) => *c,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Lit(_))
    }
}

/// Indexed triangle mesh in object space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Optional per-vertex colors, multiplied with the material color
    pub colors: Option<Vec<Color>>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds, None for an empty mesh
    #[cfg(test)]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))))
    }
}

/// A mesh paired with its material
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub mesh: MeshData,
    pub material: Material,
}

/// A drawable object in the scene
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub primitives: Vec<Primitive>,
    pub transform: Transform,
}

impl Node {
    pub fn new(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            primitives,
            transform: Transform::IDENTITY,
        }
    }

    /// Single-primitive node
    pub fn mesh(name: impl Into<String>, mesh: MeshData, material: Material) -> Self {
        Self::new(name, vec![Primitive { mesh, material }])
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Handle to a node inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Light source kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light on every surface
    Ambient,
    /// Parallel light shining from `position` towards the origin
    Directional { position: Vec3 },
}

/// A light in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self { kind: LightKind::Ambient, color, intensity }
    }

    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Directional { position },
            color,
            intensity,
        }
    }
}

/// Scene root: nodes and lights
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Nodes with their handles
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release all geometry and lights
    pub fn dispose(&mut self) {
        self.nodes.clear();
        self.lights.clear();
    }
}
