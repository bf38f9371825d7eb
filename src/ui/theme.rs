//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Panel
// =============================================================================

/// Side panel background (slightly translucent over the viewport)
pub const PANEL_BG: Color = Color::new(0.97, 0.97, 0.98, 0.92);

pub const PANEL_BORDER: Color = Color::new(0.78, 0.78, 0.8, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.13, 0.13, 0.15, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.45, 0.45, 0.5, 1.0);

// =============================================================================
// Buttons
// =============================================================================

pub const BUTTON_BG: Color = Color::new(0.89, 0.89, 0.91, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.82, 0.86, 0.92, 1.0);
pub const BUTTON_PRESSED: Color = Color::new(0.72, 0.79, 0.88, 1.0);

/// Primary action (Upload / Export)
pub const ACCENT_COLOR: Color = Color::new(0.16, 0.47, 0.85, 1.0);
pub const ACCENT_HOVER: Color = Color::new(0.22, 0.55, 0.93, 1.0);
/// Primary action with its task in flight
pub const ACCENT_BUSY: Color = Color::new(0.5, 0.66, 0.86, 1.0);

// =============================================================================
// Status toasts
// =============================================================================

pub const STATUS_INFO: Color = Color::new(0.18, 0.55, 0.34, 0.95);
pub const STATUS_WARNING: Color = Color::new(0.85, 0.55, 0.1, 0.95);
pub const STATUS_ERROR: Color = Color::new(0.78, 0.2, 0.2, 0.95);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_HEADER: f32 = 18.0;
pub const FONT_SIZE_CONTENT: f32 = 15.0;
pub const FONT_SIZE_SMALL: f32 = 13.0;
