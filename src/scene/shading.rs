//! Vertex lighting
//!
//! Ambient plus Lambert directional terms, evaluated per vertex on the CPU.
//! Same accumulate-then-clamp approach as a multi-light software shader.

use super::{Light, LightKind};
use macroquad::color::Color;
use macroquad::math::Vec3;

/// Light a vertex of `albedo` with world-space `normal`
pub fn shade_vertex(albedo: Color, normal: Vec3, lights: &[Light]) -> Color {
    let n = normal.normalize_or_zero();
    let mut r = 0.0;
    let mut g = 0.0;
    let mut b = 0.0;

    for light in lights {
        let factor = match light.kind {
            LightKind::Ambient => light.intensity,
            LightKind::Directional { position } => {
                // Shines from `position` towards the origin
                let to_light = position.normalize_or_zero();
                light.intensity * n.dot(to_light).max(0.0)
            }
        };
        r += light.color.r * factor;
        g += light.color.g * factor;
        b += light.color.b * factor;
    }

    Color::new(
        (albedo.r * r).min(1.0),
        (albedo.g * g).min(1.0),
        (albedo.b * b).min(1.0),
        albedo.a,
    )
}
