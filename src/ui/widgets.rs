//! Basic UI widgets

use super::{theme, Rect, UiContext};
use macroquad::prelude::*;

/// Grid resolution used to approximate gradient color stops
const GRADIENT_CELLS: usize = 16;

/// Position along a CSS-style angled gradient line, 0 at the start corner
///
/// `angle_deg` follows CSS: 0 points up, 90 points right.
pub fn gradient_t(rect: &Rect, angle_deg: f32, x: f32, y: f32) -> f32 {
    let a = angle_deg.to_radians();
    let dir = vec2(a.sin(), -a.cos());
    let length = (rect.w * a.sin()).abs() + (rect.h * a.cos()).abs();
    if length <= 0.0 {
        return 0.0;
    }
    let from_center = vec2(x - rect.center_x(), y - rect.center_y());
    from_center.dot(dir) / length + 0.5
}

/// Two-stop gradient color at `t`, solid outside the stops
pub fn gradient_color(t: f32, start: Color, end: Color, start_stop: f32, end_stop: f32) -> Color {
    let span = end_stop - start_stop;
    let k = if span <= 0.0 {
        if t < start_stop { 0.0 } else { 1.0 }
    } else {
        ((t - start_stop) / span).clamp(0.0, 1.0)
    };
    Color::new(
        start.r + (end.r - start.r) * k,
        start.g + (end.g - start.g) * k,
        start.b + (end.b - start.b) * k,
        start.a + (end.a - start.a) * k,
    )
}

/// Same color with its alpha multiplied by `alpha`
pub fn faded(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, color.a * alpha.clamp(0.0, 1.0))
}

/// Fill `rect` with the page background gradient at `alpha` opacity
pub fn draw_page_background(rect: &Rect, alpha: f32) {
    let n = GRADIENT_CELLS;
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for row in 0..=n {
        for col in 0..=n {
            let x = rect.x + rect.w * col as f32 / n as f32;
            let y = rect.y + rect.h * row as f32 / n as f32;
            let t = gradient_t(rect, 45.0, x, y);
            let color = gradient_color(
                t,
                theme::GRADIENT_START,
                theme::GRADIENT_END,
                theme::GRADIENT_START_STOP,
                theme::GRADIENT_END_STOP,
            );
            vertices.push(Vertex::new(x, y, 0.0, 0.0, 0.0, faded(color, alpha)));
        }
    }

    let mut indices = Vec::with_capacity(n * n * 6);
    for row in 0..n {
        for col in 0..n {
            let i = (row * (n + 1) + col) as u16;
            let below = i + (n + 1) as u16;
            indices.extend_from_slice(&[i, i + 1, below + 1, i, below + 1, below]);
        }
    }

    draw_mesh(&Mesh { vertices, indices, texture: None });
}

/// Button appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonStyle {
    /// Filled with a darker fill on hover
    Contained { fill: Color, hover: Color },
    /// Transparent with a border in `color`
    Outlined { color: Color },
    /// Fully rounded, filled
    Pill { fill: Color, hover: Color },
}

/// Draw a button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str, style: ButtonStyle, font_size: f32) -> bool {
    let hovered = ctx.mouse.inside(&rect) && ctx.dragging.is_none();
    let clicked = ctx.mouse.clicked(&rect) && ctx.dragging.is_none();

    let text_color = match style {
        ButtonStyle::Contained { fill, hover } => {
            draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, if hovered { hover } else { fill });
            WHITE
        }
        ButtonStyle::Outlined { color } => {
            if hovered {
                draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, theme::OUTLINE_HOVER);
            }
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, color);
            color
        }
        ButtonStyle::Pill { fill, hover } => {
            let r = rect.h * 0.5;
            draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, r, if hovered { hover } else { fill });
            WHITE
        }
    };

    draw_text_centered(label, rect.center_x(), rect.center_y() + font_size * 0.3, font_size, text_color);
    clicked
}

/// Rounded card with a soft drop shadow. `shadow` is (y offset, blur, alpha).
pub fn draw_shadowed_card(rect: &Rect, radius: f32, fill: Color, shadow: (f32, f32, f32)) {
    let (offset, blur, alpha) = shadow;
    // Layered rings approximating a blur
    let layers = blur.ceil().max(1.0) as usize;
    for i in (1..=layers).rev() {
        let spread = i as f32;
        let a = alpha * (1.0 - (i - 1) as f32 / layers as f32) / layers as f32 * 2.0;
        draw_rounded_rect(
            rect.x - spread * 0.5,
            rect.y + offset - spread * 0.5,
            rect.w + spread,
            rect.h + spread,
            radius + spread * 0.5,
            Color::new(0.0, 0.0, 0.0, a),
        );
    }
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, radius, fill);
}

/// Two opposite arcs rotating once per second
pub fn draw_spinner(center: Vec2, radius: f32, thickness: f32, color: Color, time: f32) {
    const SEGMENTS: usize = 12;
    const ARC: f32 = std::f32::consts::FRAC_PI_2;
    let rotation = (time % 1.0) * std::f32::consts::TAU;

    for base in [-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2] {
        let start = base + rotation - ARC * 0.5;
        for i in 0..SEGMENTS {
            let a0 = start + ARC * i as f32 / SEGMENTS as f32;
            let a1 = start + ARC * (i + 1) as f32 / SEGMENTS as f32;
            draw_line(
                center.x + radius * a0.cos(),
                center.y + radius * a0.sin(),
                center.x + radius * a1.cos(),
                center.y + radius * a1.sin(),
                thickness,
                color,
            );
        }
    }
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5).max(0.0);
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, r, h - r * 2.0, color);
    draw_rectangle(x + w - r, y + r, r, h - r * 2.0, color);
    if r > 0.0 {
        draw_circle(x + r, y + r, r, color);
        draw_circle(x + w - r, y + r, r, color);
        draw_circle(x + r, y + h - r, r, color);
        draw_circle(x + w - r, y + h - r, r, color);
    }
}

/// Draw text horizontally centered on `center_x` at baseline `y`
pub fn draw_text_centered(text: &str, center_x: f32, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (center_x - dims.width * 0.5).round(), y.round(), font_size, color);
}

/// Greedy word wrap using an approximate glyph width
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let char_width = font_size * 0.5;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if current.is_empty() || candidate_len as f32 * char_width <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    lines
}
