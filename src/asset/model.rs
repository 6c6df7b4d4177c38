//! glTF model decoding
//!
//! Accepts binary `.glb`, JSON `.gltf` with embedded buffers, or either of
//! those brotli-compressed. Node transforms are baked into the vertices so
//! the result can be attached to a scene as a single node.

use super::{LoadError, ModelData};
use crate::scene::{compute_normals, Material, MeshData, Primitive};
use macroquad::color::Color;
use macroquad::math::{Mat3, Mat4, Vec3};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io::{self, Read};

/// Binary glTF starts with this magic
const GLB_MAGIC: &[u8; 4] = b"glTF";

/// Largest decompressed model accepted
const MAX_DECOMPRESSED_BYTES: u64 = 256 * 1024 * 1024;

const BROTLI_BUFFER_SIZE: usize = 4096;

fn is_plain_gltf(data: &[u8]) -> bool {
    if data.starts_with(GLB_MAGIC) {
        return true;
    }
    // JSON glTF, possibly after whitespace
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .map(|&b| b == b'{')
        .unwrap_or(false)
}

/// Decode model bytes into primitives
pub fn decode_model(data: &[u8]) -> Result<ModelData, LoadError> {
    if data.is_empty() {
        return Err(LoadError::Empty);
    }

    let bytes: Cow<[u8]> = if is_plain_gltf(data) {
        Cow::Borrowed(data)
    } else {
        Cow::Owned(decompress(data, MAX_DECOMPRESSED_BYTES)?)
    };

    let gltf::Gltf { document, blob } =
        gltf::Gltf::from_slice(&bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    // Images are never decoded, only geometry and base colors are used
    let buffers = gltf::import_buffers(&document, None, blob).map_err(|e| LoadError::Decode(e.to_string()))?;

    let mut primitives = Vec::new();
    let scene = document.default_scene().or_else(|| document.scenes().next());
    match scene {
        Some(scene) => collect_scene(&scene, &buffers, &mut primitives)?,
        None => {
            for mesh in document.meshes() {
                collect_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut primitives)?;
            }
        }
    }

    if primitives.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(ModelData { primitives })
}

/// Brotli-decompress `data`, failing once the output passes `limit` bytes
fn decompress(data: &[u8], limit: u64) -> Result<Vec<u8>, LoadError> {
    let mut decompressed = Vec::new();
    brotli::Decompressor::new(data, BROTLI_BUFFER_SIZE)
        .take(limit + 1)
        .read_to_end(&mut decompressed)?;
    if decompressed.len() as u64 > limit {
        return Err(LoadError::Decompress(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("decompressed model exceeds {} bytes", limit),
        )));
    }
    Ok(decompressed)
}

/// Walk the scene's node trees depth-first, parents before children.
/// A node reached twice means the hierarchy is not a forest.
fn collect_scene(
    scene: &gltf::Scene,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Primitive>,
) -> Result<(), LoadError> {
    let mut visited = HashSet::new();
    let mut stack: Vec<(gltf::Node, Mat4)> = scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        if !visited.insert(node.index()) {
            return Err(LoadError::Decode(format!(
                "node {} appears more than once in the scene hierarchy",
                node.index()
            )));
        }
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            collect_mesh(&mesh, world, buffers, out)?;
        }
        let children: Vec<gltf::Node> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, world)));
    }
    Ok(())
}

fn collect_mesh(
    mesh: &gltf::Mesh,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Primitive>,
) -> Result<(), LoadError> {
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from_array(p)))
            .collect();
        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        if indices.iter().any(|&i| i as usize >= positions.len()) {
            return Err(LoadError::Decode(format!(
                "mesh {} has indices past its {} vertices",
                mesh.index(),
                positions.len()
            )));
        }

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => compute_normals(&positions, &indices),
        };

        let colors = reader.read_colors(0).map(|colors| {
            colors
                .into_rgba_f32()
                .map(|[r, g, b, a]| Color::new(r, g, b, a))
                .collect::<Vec<_>>()
        });

        let [r, g, b, a] = primitive.material().pbr_metallic_roughness().base_color_factor();

        out.push(Primitive {
            mesh: MeshData { positions, normals, colors, indices },
            material: Material::Lit(Color::new(r, g, b, a)),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// One triangle (0,0,0) (1,0,0) (0,1,0) on a node lifted by 2 on Y
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0, "translation": [0.0, 2.0, 0.0] }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }]
    }"#;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        brotli::BrotliCompress(
            &mut Cursor::new(data),
            &mut out,
            &brotli::enc::BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            },
        )
        .unwrap();
        out
    }

    #[test]
    fn test_decode_triangle() {
        let model = decode_model(TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(model.primitives.len(), 1);
        assert_eq!(model.triangle_count(), 1);

        let prim = &model.primitives[0];
        // Node translation baked in
        assert!((prim.mesh.positions[2] - Vec3::new(0.0, 3.0, 0.0)).length() < 0.0001);
        // Generated normals face +Z
        assert!((prim.mesh.normals[0] - Vec3::Z).length() < 0.0001);
        // Default material is opaque white
        assert_eq!(prim.material, Material::Lit(Color::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_decode_compressed() {
        let packed = compress(TRIANGLE_GLTF.as_bytes());
        assert!(!is_plain_gltf(&packed));
        let model = decode_model(&packed).unwrap();
        assert_eq!(model.triangle_count(), 1);
    }

    #[test]
    fn test_detect_plain() {
        assert!(is_plain_gltf(b"glTF\x02\x00\x00\x00"));
        assert!(is_plain_gltf(b"  \n{ }"));
        assert!(!is_plain_gltf(b"\x1b\x03\x00"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode_model(b"definitely not a model").is_err());
        assert!(matches!(decode_model(b""), Err(LoadError::Empty)));
    }

    #[test]
    fn test_rejects_cyclic_nodes() {
        let json = r#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "children": [1] }, { "children": [0] }]
        }"#;
        assert!(matches!(decode_model(json.as_bytes()), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_rejects_shared_child() {
        let json = r#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0, 1] }],
            "nodes": [{ "children": [2] }, { "children": [2] }, {}]
        }"#;
        assert!(matches!(decode_model(json.as_bytes()), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_child_inherits_parent_transform() {
        // Triangle node nested under a parent lifted by 1 on X
        let json = TRIANGLE_GLTF.replace(r#""nodes": [0]"#, r#""nodes": [1]"#).replace(
            r#"{ "mesh": 0, "translation": [0.0, 2.0, 0.0] }"#,
            r#"{ "mesh": 0, "translation": [0.0, 2.0, 0.0] }, { "children": [0], "translation": [1.0, 0.0, 0.0] }"#,
        );
        let model = decode_model(json.as_bytes()).unwrap();
        let p = model.primitives[0].mesh.positions[0];
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 0.0001);
    }

    #[test]
    fn test_rejects_index_past_vertices() {
        // Triangle indexed 0, 1, 5 over three vertices
        let json = r#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "mesh": 0 }],
            "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }],
            "buffers": [{
                "byteLength": 44,
                "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAUAAAA="
            }],
            "bufferViews": [
                { "buffer": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
            ],
            "accessors": [
                {
                    "bufferView": 0,
                    "componentType": 5126,
                    "count": 3,
                    "type": "VEC3",
                    "min": [0.0, 0.0, 0.0],
                    "max": [1.0, 1.0, 0.0]
                },
                { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
            ]
        }"#;
        match decode_model(json.as_bytes()) {
            Err(LoadError::Decode(msg)) => assert!(msg.contains("mesh 0"), "{}", msg),
            other => panic!("expected a decode error, got {:?}", other.map(|m| m.triangle_count())),
        }
    }

    #[test]
    fn test_decompress_limit() {
        let packed = compress(&[b' '; 4096]);
        assert_eq!(decompress(&packed, 4096).unwrap().len(), 4096);
        assert!(matches!(decompress(&packed, 1024), Err(LoadError::Decompress(_))));
    }

    #[test]
    fn test_rejects_model_without_meshes() {
        let json = r#"{ "asset": { "version": "2.0" }, "scenes": [{ "nodes": [] }] }"#;
        assert!(matches!(decode_model(json.as_bytes()), Err(LoadError::Empty)));
    }
}
