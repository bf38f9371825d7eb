//! Basic UI widgets

use super::theme::*;
use super::{Rect, UiContext};
use macroquad::prelude::*;

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Normal,
    Primary,
}

/// Draw a text button, returns true if clicked. A busy button is drawn muted
/// but still reports clicks.
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, style: ButtonStyle, busy: bool) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.take_click(&rect);

    let (bg, fg) = button_colors(style, busy, hovered, pressed);
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);
    draw_text_centered(label, &rect, FONT_SIZE_CONTENT, fg);

    clicked
}

/// Background and text color for a button state
fn button_colors(style: ButtonStyle, busy: bool, hovered: bool, pressed: bool) -> (Color, Color) {
    match style {
        ButtonStyle::Primary if busy => (ACCENT_BUSY, WHITE),
        ButtonStyle::Primary if hovered => (ACCENT_HOVER, WHITE),
        ButtonStyle::Primary => (ACCENT_COLOR, WHITE),
        ButtonStyle::Normal if pressed => (BUTTON_PRESSED, TEXT_COLOR),
        ButtonStyle::Normal if busy => (BUTTON_BG, TEXT_DIM),
        ButtonStyle::Normal if hovered => (BUTTON_HOVER, TEXT_COLOR),
        ButtonStyle::Normal => (BUTTON_BG, TEXT_COLOR),
    }
}

/// Left-aligned single line of text, vertically centered in `rect`
pub fn label(rect: Rect, text: &str, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp rendering
    let y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, rect.x.round(), y, font_size, color);
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`
pub fn fit_text(text: &str, font_size: f32, max_width: f32) -> String {
    if measure_text(text, None, font_size as u16, 1.0).width <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if measure_text(&candidate, None, font_size as u16, 1.0).width <= max_width {
            return candidate;
        }
    }
    String::from("...")
}

/// Panel background with a border
pub fn panel(rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);
}

/// Status message pill, bottom-center of `area`
pub fn toast(area: Rect, text: &str, bg: Color) {
    let dims = measure_text(text, None, FONT_SIZE_CONTENT as u16, 1.0);
    let w = dims.width + 32.0;
    let h = 34.0;
    let x = (area.center_x() - w * 0.5).round();
    let y = (area.bottom() - h - 12.0).round();
    let rect = Rect::new(x, y, w, h);

    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 6.0, bg);
    draw_text_centered(text, &rect, FONT_SIZE_CONTENT, WHITE);
}

fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
