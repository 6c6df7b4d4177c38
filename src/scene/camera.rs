//! Perspective camera

use macroquad::math::Vec3;

/// Perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Recompute aspect from a pixel size. Zero or degenerate sizes are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && (width / height).is_finite() {
            self.aspect = width / height;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}
