//! Orbit controls
//!
//! Rotates and dollies a camera around its target using spherical
//! coordinates. With damping enabled, input accumulates into a delta that
//! is applied a fraction at a time and decays every update, so motion
//! eases out after the user lets go.
//!
//! Spherical convention: `theta` is the azimuth around +Y measured from +Z,
//! `phi` the polar angle from +Y.

use super::PerspectiveCamera;
use macroquad::math::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Keeps the camera off the poles where the view would flip
const POLE_EPS: f32 = 0.000_001;

/// Per-step zoom base, one wheel notch scales the radius by this
const ZOOM_BASE: f32 = 0.95;

/// Deltas below this are treated as settled
const SETTLE_EPS: f32 = 0.000_001;

/// Tunables for [`OrbitControls`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            enable_pan: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl OrbitSettings {
    /// Damped, pan-free orbit with a zoom range (role card viewports)
    pub fn clamped(damping_factor: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            enable_pan: false,
            min_distance: min_distance.min(max_distance),
            max_distance: max_distance.max(min_distance),
            ..Self::default()
        }
    }

    /// Damped orbit without a zoom range (landing hero)
    pub fn damped(damping_factor: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            ..Self::default()
        }
    }
}

/// Pointer input gathered for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// Drag delta in pixels
    pub rotate: Vec2,
    /// Wheel steps; positive dollies in towards the target
    pub zoom: f32,
    /// Pan drag delta in pixels, ignored when panning is disabled
    pub pan: Vec2,
    /// Height of the element receiving input, scales drag to angle
    pub viewport_height: f32,
}

#[cfg(test)]
impl ControlInput {
    /// No rotate, zoom or pan this frame
    pub fn is_idle(&self) -> bool {
        self.rotate == Vec2::ZERO && self.zoom == 0.0 && self.pan == Vec2::ZERO
    }
}

/// Orbit camera controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    settings: OrbitSettings,
    target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    disposed: bool,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera, settings: OrbitSettings) -> Self {
        Self {
            settings,
            target: camera.target,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            disposed: false,
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// Queue one frame of pointer input
    pub fn handle_input(&mut self, input: &ControlInput, camera: &PerspectiveCamera) {
        if self.disposed {
            return;
        }

        if input.rotate != Vec2::ZERO && input.viewport_height > 0.0 {
            let per_px = TAU / input.viewport_height * self.settings.rotate_speed;
            self.delta_theta -= input.rotate.x * per_px;
            self.delta_phi -= input.rotate.y * per_px;
        }

        if input.zoom != 0.0 {
            let step = ZOOM_BASE.powf(input.zoom.abs() * self.settings.zoom_speed);
            if input.zoom > 0.0 {
                self.scale *= step;
            } else {
                self.scale /= step;
            }
        }

        if self.settings.enable_pan && input.pan != Vec2::ZERO && input.viewport_height > 0.0 {
            // Scale pixels to world units at the target's depth
            let distance = camera.distance_to_target();
            let world_per_px = 2.0 * distance * (camera.fov.to_radians() * 0.5).tan() / input.viewport_height;
            let forward = (camera.target - camera.position).normalize_or_zero();
            let right = forward.cross(camera.up).normalize_or_zero();
            let up = right.cross(forward);
            self.pan_offset += (-right * input.pan.x + up * input.pan.y) * world_per_px;
        }
    }

    /// Apply pending motion to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if self.disposed {
            return false;
        }

        let offset = camera.position - self.target;
        let prev_radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if prev_radius > 0.0 {
            (offset.y / prev_radius).clamp(-1.0, 1.0).acos()
        } else {
            PI * 0.5
        };

        let factor = if self.settings.enable_damping { self.settings.damping_factor } else { 1.0 };
        theta += self.delta_theta * factor;
        phi += self.delta_phi * factor;
        phi = phi.clamp(POLE_EPS, PI - POLE_EPS);

        let mut radius = prev_radius * self.scale;
        if radius.is_nan() {
            radius = prev_radius;
        }
        radius = radius.clamp(self.settings.min_distance, self.settings.max_distance);

        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(radius * sin_phi * theta.sin(), radius * phi.cos(), radius * sin_phi * theta.cos());
        let new_position = self.target + new_offset;

        if self.settings.enable_damping {
            let decay = 1.0 - self.settings.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
            if self.delta_theta.abs() < SETTLE_EPS {
                self.delta_theta = 0.0;
            }
            if self.delta_phi.abs() < SETTLE_EPS {
                self.delta_phi = 0.0;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = (new_position - camera.position).length_squared() > SETTLE_EPS * SETTLE_EPS
            || camera.target != self.target;
        camera.position = new_position;
        camera.target = self.target;
        moved
    }

    /// Current camera-to-target distance clamped by the zoom range
    pub fn distance(&self, camera: &PerspectiveCamera) -> f32 {
        camera.position.distance(self.target)
    }

    /// Stop reacting to input; later updates do nothing
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(z: f32) -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, z);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn zoom(steps: f32) -> ControlInput {
        ControlInput { zoom: steps, viewport_height: 300.0, ..Default::default() }
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::clamped(0.05, 3.0, 7.0));

        controls.handle_input(&zoom(10_000.0), &cam);
        controls.update(&mut cam);
        assert!((controls.distance(&cam) - 3.0).abs() < 0.001);

        controls.handle_input(&zoom(-10_000.0), &cam);
        controls.update(&mut cam);
        assert!((controls.distance(&cam) - 7.0).abs() < 0.001);
    }

    #[test]
    fn test_zoom_range_under_repeated_input() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::clamped(0.05, 3.0, 7.0));
        for i in 0..200 {
            let steps = if i % 3 == 0 { -57.0 } else { 13.5 };
            controls.handle_input(&zoom(steps), &cam);
            controls.update(&mut cam);
            let d = controls.distance(&cam);
            assert!(d >= 3.0 - 0.001 && d <= 7.0 + 0.001, "distance {} out of range", d);
        }
    }

    #[test]
    fn test_single_notch_zoom() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        controls.handle_input(&zoom(1.0), &cam);
        controls.update(&mut cam);
        assert!((controls.distance(&cam) - 5.0 * 0.95).abs() < 0.001);
    }

    #[test]
    fn test_damping_eases_out() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::clamped(0.05, 3.0, 7.0));
        let drag = ControlInput { rotate: Vec2::new(30.0, 0.0), viewport_height: 300.0, ..Default::default() };
        controls.handle_input(&drag, &cam);

        let before = cam.position;
        assert!(controls.update(&mut cam));
        let first_step = cam.position.distance(before);

        // Keeps drifting after input stops, by smaller amounts
        let before = cam.position;
        assert!(controls.update(&mut cam));
        let second_step = cam.position.distance(before);
        assert!(second_step > 0.0 && second_step < first_step);

        // Orbit never changes the distance
        assert!((controls.distance(&cam) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_undamped_applies_fully() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        // A quarter of the viewport height drags a quarter turn
        let drag = ControlInput { rotate: Vec2::new(-75.0, 0.0), viewport_height: 300.0, ..Default::default() };
        controls.handle_input(&drag, &cam);
        controls.update(&mut cam);
        // theta += TAU/4: camera moves from +Z to +X
        assert!((cam.position - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn test_polar_clamp() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        let drag = ControlInput { rotate: Vec2::new(0.0, 10_000.0), viewport_height: 300.0, ..Default::default() };
        controls.handle_input(&drag, &cam);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.y <= 5.0);
    }

    #[test]
    fn test_pan_disabled() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::clamped(0.05, 3.0, 7.0));
        let input = ControlInput { pan: Vec2::new(40.0, 40.0), viewport_height: 300.0, ..Default::default() };
        controls.handle_input(&input, &cam);
        controls.update(&mut cam);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_dispose_ignores_input() {
        let mut cam = camera_at(5.0);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::clamped(0.05, 3.0, 7.0));
        controls.dispose();
        controls.handle_input(&zoom(5.0), &cam);
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
        assert!(controls.is_disposed());
    }
}
