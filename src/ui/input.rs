//! Input state for UI interaction

use super::Rect;
use macroquad::prelude::{
    is_key_down, is_mouse_button_down, is_mouse_button_pressed, mouse_position, mouse_wheel, KeyCode,
    MouseButton,
};

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool, // Just pressed this frame
    pub shift: bool,
    pub scroll: f32, // Scroll wheel delta
}

impl MouseState {
    /// Read this frame's mouse state from macroquad
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
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
    /// Set once a widget has consumed this frame's click
    click_taken: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.click_taken = false;
    }

    /// Claim this frame's click for a widget at `rect`. Only the first
    /// widget under the pointer gets it.
    pub fn take_click(&mut self, rect: &Rect) -> bool {
        if self.click_taken || !self.mouse.clicked(rect) {
            return false;
        }
        self.click_taken = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_requires_press_inside() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let m = MouseState { x: 5.0, y: 5.0, left_down: true, left_pressed: true, ..Default::default() };
        assert!(m.clicked(&r));
        let held = MouseState { left_pressed: false, ..m };
        assert!(!held.clicked(&r));
        assert!(held.clicking(&r));
        let outside = MouseState { x: 50.0, ..m };
        assert!(!outside.clicked(&r));
    }

    #[test]
    fn test_click_taken_once_per_frame() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let press = MouseState { x: 5.0, y: 5.0, left_down: true, left_pressed: true, ..Default::default() };
        let mut ctx = UiContext::new();
        ctx.begin_frame(press);
        assert!(ctx.take_click(&r));
        assert!(!ctx.take_click(&r));
        ctx.begin_frame(press);
        assert!(ctx.take_click(&r));
    }
}
