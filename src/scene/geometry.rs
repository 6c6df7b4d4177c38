//! Procedural geometry
//!
//! Flat-shaded primitives used by the hero building and the fallback cube,
//! plus normal generation for models that ship without normals.

use super::MeshData;
use macroquad::math::Vec3;

/// Axis-aligned box centered on the origin
///
/// 24 vertices (4 per face) so each face keeps its own normal.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let hx = width * 0.5;
    let hy = height * 0.5;
    let hz = depth * 0.5;

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (Vec3::Z, [
            Vec3::new(-hx, -hy, hz), Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, hz), Vec3::new(-hx, hy, hz),
        ]),
        (Vec3::NEG_Z, [
            Vec3::new(hx, -hy, -hz), Vec3::new(-hx, -hy, -hz),
            Vec3::new(-hx, hy, -hz), Vec3::new(hx, hy, -hz),
        ]),
        (Vec3::Y, [
            Vec3::new(-hx, hy, hz), Vec3::new(hx, hy, hz),
            Vec3::new(hx, hy, -hz), Vec3::new(-hx, hy, -hz),
        ]),
        (Vec3::NEG_Y, [
            Vec3::new(-hx, -hy, -hz), Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, -hy, hz), Vec3::new(-hx, -hy, hz),
        ]),
        (Vec3::X, [
            Vec3::new(hx, -hy, hz), Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, hy, -hz), Vec3::new(hx, hy, hz),
        ]),
        (Vec3::NEG_X, [
            Vec3::new(-hx, -hy, -hz), Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, hy, hz), Vec3::new(-hx, hy, -hz),
        ]),
    ];

    let mut mesh = MeshData::default();
    for (normal, corners) in faces {
        let base = mesh.positions.len() as u32;
        for corner in corners {
            mesh.positions.push(corner);
            mesh.normals.push(normal);
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Cone centered on the origin: apex at +height/2, base at -height/2
///
/// With `radial_segments = 4` this is the square pyramid used as a roof.
/// Side faces are flat shaded.
pub fn cone_mesh(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    let apex = Vec3::new(0.0, half, 0.0);
    let rim: Vec<Vec3> = (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(radius * theta.sin(), -half, radius * theta.cos())
        })
        .collect();

    let mut mesh = MeshData::default();

    for i in 0..segments as usize {
        let a = rim[i];
        let b = rim[(i + 1) % segments as usize];
        let normal = (b - a).cross(apex - a).normalize_or_zero();
        let base = mesh.positions.len() as u32;
        mesh.positions.extend_from_slice(&[a, b, apex]);
        mesh.normals.extend_from_slice(&[normal; 3]);
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    // Base cap, facing down
    let center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, -half, 0.0));
    mesh.normals.push(Vec3::NEG_Y);
    for p in &rim {
        mesh.positions.push(*p);
        mesh.normals.push(Vec3::NEG_Y);
    }
    for i in 0..segments {
        let a = center + 1 + i;
        let b = center + 1 + (i + 1) % segments;
        mesh.indices.extend_from_slice(&[center, b, a]);
    }

    mesh
}

/// Smooth per-vertex normals from triangle faces (area weighted)
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (Some(&p0), Some(&p1), Some(&p2)) = (positions.get(i0), positions.get(i1), positions.get(i2)) else {
            continue;
        };
        let face = (p1 - p0).cross(p2 - p0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}
