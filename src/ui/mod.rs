//! Immediate-mode UI for the viewer
//!
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod input;
mod rect;
pub mod shell;
mod theme;
mod widgets;

pub use input::*;
pub use rect::*;
pub use shell::{draw_shell, ShellAction, ShellLayout, ShellView, StatusLevel};
