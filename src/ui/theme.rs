//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Page background
// =============================================================================

/// 45° gradient start (#1a237e), solid until 30%
pub const GRADIENT_START: Color = Color::new(0.102, 0.137, 0.494, 1.0);

/// 45° gradient end (#0d47a1), solid from 90%
pub const GRADIENT_END: Color = Color::new(0.051, 0.278, 0.631, 1.0);

pub const GRADIENT_START_STOP: f32 = 0.3;
pub const GRADIENT_END_STOP: f32 = 0.9;

// =============================================================================
// Text
// =============================================================================

pub const TEXT_LIGHT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const TEXT_DARK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Subtitle opacity on the landing hero
pub const SUBTITLE_ALPHA: f32 = 0.9;

// =============================================================================
// Buttons
// =============================================================================

/// Primary contained button (#1976d2)
pub const PRIMARY: Color = Color::new(0.098, 0.463, 0.824, 1.0);

/// Primary hover (#1565c0)
pub const PRIMARY_DARK: Color = Color::new(0.0824, 0.396, 0.753, 1.0);

/// Outlined button hover wash
pub const OUTLINE_HOVER: Color = Color::new(1.0, 1.0, 1.0, 0.08);

// =============================================================================
// Role accents
// =============================================================================

pub const BLUE_500: Color = Color::new(0.231, 0.51, 0.965, 1.0); // #3b82f6
pub const BLUE_600: Color = Color::new(0.145, 0.388, 0.922, 1.0); // #2563eb
pub const BLUE_800: Color = Color::new(0.118, 0.251, 0.686, 1.0); // #1e40af

pub const GREEN_500: Color = Color::new(0.133, 0.773, 0.369, 1.0); // #22c55e
pub const GREEN_600: Color = Color::new(0.0863, 0.639, 0.29, 1.0); // #16a34a
pub const GREEN_800: Color = Color::new(0.0863, 0.396, 0.204, 1.0); // #166534

pub const RED_500: Color = Color::new(0.937, 0.267, 0.267, 1.0); // #ef4444
pub const RED_600: Color = Color::new(0.863, 0.149, 0.149, 1.0); // #dc2626
pub const RED_800: Color = Color::new(0.6, 0.106, 0.106, 1.0); // #991b1b

// =============================================================================
// Cards
// =============================================================================

pub const CARD_BG: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Loading overlay: gray-100 at half opacity
pub const LOADING_OVERLAY: Color = Color::new(0.953, 0.957, 0.965, 0.5);

pub const CARD_RADIUS: f32 = 12.0;

/// Resting shadow: (y offset, blur, alpha)
pub const SHADOW_REST: (f32, f32, f32) = (2.0, 4.0, 0.1);

/// Hover shadow: (y offset, blur, alpha)
pub const SHADOW_HOVER: (f32, f32, f32) = (4.0, 8.0, 0.2);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_HERO: f32 = 64.0;
pub const FONT_SIZE_HERO_SMALL: f32 = 40.0;
pub const FONT_SIZE_SUBTITLE: f32 = 32.0;
pub const FONT_SIZE_SUBTITLE_SMALL: f32 = 19.0;
pub const FONT_SIZE_PAGE_TITLE: f32 = 36.0;
pub const FONT_SIZE_HEADING: f32 = 24.0;
pub const FONT_SIZE_BODY: f32 = 16.0;

/// Below this window width pages use the single-column layout
pub const BREAKPOINT_MD: f32 = 768.0;
