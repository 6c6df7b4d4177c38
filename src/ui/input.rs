//! Input state for UI interaction

use super::Rect;
use crate::scene::ControlInput;
use macroquad::math::Vec2;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
    pub scroll: f32,        // Scroll wheel delta, positive away from the user
}

impl MouseState {
    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    /// Pointer movement since the previous frame
    pub mouse_delta: Vec2,
    /// ID of the widget currently being dragged (if any)
    pub dragging: Option<u64>,
    /// Counter for generating unique IDs
    id_counter: u64,
    has_previous: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique ID for a widget. Stable while draw order is.
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse_delta = if self.has_previous {
            Vec2::new(mouse.x - self.mouse.x, mouse.y - self.mouse.y)
        } else {
            Vec2::ZERO
        };
        self.has_previous = true;
        self.mouse = mouse;
        self.id_counter = 0;

        // Clear dragging if mouse released
        if !self.mouse.left_down {
            self.dragging = None;
        }
    }

    pub fn is_dragging(&self, id: u64) -> bool {
        self.dragging == Some(id)
    }

    pub fn start_drag(&mut self, id: u64) {
        self.dragging = Some(id);
    }
}

/// Orbit input for a 3D region: drag started inside rotates (even if the
/// pointer leaves), wheel over the region zooms one step per notch
pub fn orbit_input(ctx: &mut UiContext, rect: &Rect) -> ControlInput {
    let id = ctx.next_id();
    if ctx.mouse.clicked(rect) && ctx.dragging.is_none() {
        ctx.start_drag(id);
    }

    let rotate = if ctx.is_dragging(id) { ctx.mouse_delta } else { Vec2::ZERO };
    let zoom = if ctx.mouse.scroll != 0.0 && ctx.mouse.inside(rect) {
        ctx.mouse.scroll.signum()
    } else {
        0.0
    };

    ControlInput {
        rotate,
        zoom,
        pan: Vec2::ZERO,
        viewport_height: rect.h,
    }
}
