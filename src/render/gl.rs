//! macroquad renderer
//!
//! Nodes are flattened into vertex-colored triangle meshes with lighting
//! baked on the CPU, then drawn through a `Camera3D` whose GL viewport is
//! the renderer's region. Meshes are cached per node and rebuilt only when
//! the node's transform changes.

use super::{RenderDevice, Renderer, RendererOptions};
use crate::scene::{shade_vertex, Light, Node, NodeId, PerspectiveCamera, Scene};
use macroquad::math::{Mat3, Mat4, Vec2, Vec3};
use macroquad::prelude::*;
use std::collections::HashMap;

/// Triangles per draw call (macroquad batches at most ~5000 indices)
const MAX_TRIANGLES_PER_MESH: usize = 1600;

/// Painted behind opaque renderers
const OPAQUE_CLEAR: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Creates [`MeshRenderer`]s
#[derive(Debug, Default)]
pub struct MacroquadDevice;

impl RenderDevice for MacroquadDevice {
    fn create_renderer(&self, options: RendererOptions) -> Box<dyn Renderer> {
        Box::new(MeshRenderer::new(options))
    }
}

struct CachedNode {
    matrix: Mat4,
    meshes: Vec<Mesh>,
}

/// GPU renderer drawing into a sub-rectangle of the window
pub struct MeshRenderer {
    options: RendererOptions,
    width: f32,
    height: f32,
    cache: HashMap<NodeId, CachedNode>,
    disposed: bool,
}

impl MeshRenderer {
    pub fn new(options: RendererOptions) -> Self {
        Self {
            options,
            width: 0.0,
            height: 0.0,
            cache: HashMap::new(),
            disposed: false,
        }
    }

    /// Region in GL viewport coordinates (physical pixels, origin bottom-left)
    fn gl_viewport(&self, origin: Vec2) -> (i32, i32, i32, i32) {
        let dpi = screen_dpi_scale();
        let gl_y = screen_height() - (origin.y + self.height);
        (
            (origin.x * dpi) as i32,
            (gl_y * dpi) as i32,
            (self.width * dpi) as i32,
            (self.height * dpi) as i32,
        )
    }
}

impl Renderer for MeshRenderer {
    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn render(&mut self, origin: Vec2, scene: &Scene, camera: &PerspectiveCamera) {
        if self.disposed || self.width < 1.0 || self.height < 1.0 {
            return;
        }

        if !self.options.transparent {
            draw_rectangle(origin.x, origin.y, self.width, self.height, OPAQUE_CLEAR);
        }

        set_camera(&Camera3D {
            position: camera.position,
            target: camera.target,
            up: camera.up,
            fovy: camera.fov.to_radians(),
            aspect: Some(camera.aspect),
            viewport: Some(self.gl_viewport(origin)),
            ..Default::default()
        });

        let lights = scene.lights();
        for (id, node) in scene.nodes() {
            let matrix = node.transform.matrix();
            let stale = self.cache.get(&id).map_or(true, |cached| cached.matrix != matrix);
            if stale {
                log::trace!("baking {} ({} primitives)", node.name, node.primitives.len());
                self.cache.insert(id, CachedNode { matrix, meshes: build_meshes(node, lights) });
            }
            if let Some(cached) = self.cache.get(&id) {
                for mesh in &cached.meshes {
                    draw_mesh(mesh);
                }
            }
        }
        self.cache.retain(|id, _| scene.node(*id).is_some());

        set_default_camera();
    }

    fn dispose(&mut self) {
        self.cache.clear();
        self.disposed = true;
    }

#[cfg(test)]
    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn multiply(a: Color, b: Color) -> Color {
    Color::new(a.r * b.r, a.g * b.g, a.b * b.b, a.a * b.a)
}

/// Flatten a node into world-space, lit, draw-call sized meshes
pub fn build_meshes(node: &Node, lights: &[Light]) -> Vec<Mesh> {
    let model = node.transform.matrix();
    let normal_matrix = Mat3::from_mat4(model).inverse().transpose();

    let mut meshes = Vec::new();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    for primitive in &node.primitives {
        let mesh = &primitive.mesh;
        let base = primitive.material.base_color();

        for tri in mesh.indices.chunks_exact(3) {
            if tri.iter().any(|&i| i as usize >= mesh.positions.len()) {
                continue;
            }
            if indices.len() / 3 >= MAX_TRIANGLES_PER_MESH {
                meshes.push(Mesh {
                    vertices: std::mem::take(&mut vertices),
                    indices: std::mem::take(&mut indices),
                    texture: None,
                });
            }

            for &i in tri {
                let i = i as usize;
                let p = model.transform_point3(mesh.positions[i]);
                let albedo = match mesh.colors.as_ref().and_then(|c| c.get(i)) {
                    Some(vc) => multiply(base, *vc),
                    None => base,
                };
                let color = if primitive.material.is_lit() {
                    let n = mesh.normals.get(i).copied().unwrap_or(Vec3::ZERO);
                    shade_vertex(albedo, normal_matrix * n, lights)
                } else {
                    albedo
                };
                indices.push(vertices.len() as u16);
                vertices.push(Vertex::new(p.x, p.y, p.z, 0.0, 0.0, color));
            }
        }
    }

    if !indices.is_empty() {
        meshes.push(Mesh { vertices, indices, texture: None });
    }
    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{box_mesh, Material, MeshData, Transform};

    const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

    #[test]
    fn test_unlit_keeps_flat_color() {
        let node = Node::mesh("cube", box_mesh(1.0, 1.0, 1.0), Material::Unlit(GREEN));
        let meshes = build_meshes(&node, &[Light::ambient(WHITE, 0.1)]);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].indices.len(), 36);
        let expected: [u8; 4] = GREEN.into();
        assert!(meshes[0].vertices.iter().all(|v| v.color == expected));
    }

    #[test]
    fn test_lit_without_lights_is_black() {
        let node = Node::mesh("cube", box_mesh(1.0, 1.0, 1.0), Material::Lit(GREEN));
        let meshes = build_meshes(&node, &[]);
        assert!(meshes[0].vertices.iter().all(|v| v.color[1] == 0));
    }

    #[test]
    fn test_transform_applied() {
        let node = Node::mesh("cube", box_mesh(1.0, 1.0, 1.0), Material::Unlit(GREEN))
            .with_transform(Transform::from_position(vec3(0.0, 10.0, 0.0)));
        let meshes = build_meshes(&node, &[]);
        assert!(meshes[0].vertices.iter().all(|v| v.position.y > 9.0));
    }

    #[test]
    fn test_large_mesh_is_chunked() {
        // The same triangle 2000 times
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            colors: None,
            indices: [0u32, 1, 2].repeat(2000),
        };
        let node = Node::mesh("big", mesh, Material::Unlit(GREEN));
        let meshes = build_meshes(&node, &[]);
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].indices.len(), MAX_TRIANGLES_PER_MESH * 3);
        assert_eq!(meshes[1].indices.len(), (2000 - MAX_TRIANGLES_PER_MESH) * 3);
        assert!(meshes.iter().all(|m| m.vertices.len() <= u16::MAX as usize));
    }

    #[test]
    fn test_skips_out_of_range_triangles() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            colors: None,
            indices: vec![0, 1, 2, 0, 1, 9],
        };
        let meshes = build_meshes(&Node::mesh("m", mesh, Material::Unlit(GREEN)), &[]);
        assert_eq!(meshes[0].indices.len(), 3);
    }

    #[test]
    fn test_renderer_size_and_dispose() {
        let mut renderer = MeshRenderer::new(RendererOptions::default());
        renderer.set_size(320.0, -5.0);
        assert_eq!(renderer.size(), (320.0, 0.0));
        renderer.dispose();
        assert!(renderer.is_disposed());
    }
}
