//! Immediate-mode UI helpers for the marketing pages
//!
//! - Rectangle layout
//! - Mouse state, drag tracking and orbit input for 3D regions
//! - Gradient backgrounds, buttons, cards and spinners
//! - Theme colors and font sizes

mod rect;
mod input;
mod widgets;
pub mod theme;

pub use rect::*;
pub use input::*;
pub use widgets::*;
