//! Viewer chrome: upload panel, transform button bar, status toast

use super::theme::*;
use super::widgets::{fit_text, label, panel, text_button, toast, ButtonStyle};
use super::{Rect, UiContext};
use crate::controls::TransformAction;
use macroquad::prelude::Color;

pub const PANEL_WIDTH: f32 = 220.0;
const MARGIN: f32 = 12.0;
const PADDING: f32 = 10.0;
const BUTTON_HEIGHT: f32 = 30.0;
const ROW_GAP: f32 = 6.0;
const LABEL_HEIGHT: f32 = 20.0;
const BAR_HEIGHT: f32 = BUTTON_HEIGHT + PADDING * 2.0;

/// Something the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    ChooseFile,
    Upload,
    Export,
    Transform(TransformAction),
}

/// Severity of a status toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    fn color(self) -> Color {
        match self {
            StatusLevel::Info => STATUS_INFO,
            StatusLevel::Warning => STATUS_WARNING,
            StatusLevel::Error => STATUS_ERROR,
        }
    }
}

/// What the chrome needs to know about the session
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellView<'a> {
    pub selected_file: Option<&'a str>,
    /// Upload or model load in flight
    pub loading: bool,
    pub exporting: bool,
    pub status: Option<(&'a str, StatusLevel)>,
}

/// Vertical layout cursor
struct Column {
    area: Rect,
    y: f32,
}

impl Column {
    fn new(area: Rect) -> Self {
        Self { y: area.y, area }
    }

    fn next(&mut self, height: f32) -> Rect {
        let r = Rect::new(self.area.x, self.y, self.area.w, height);
        self.y += height + ROW_GAP;
        r
    }

    /// Bottom of everything handed out so far
    fn end(&self) -> f32 {
        self.y - ROW_GAP
    }
}

/// Chrome geometry for a given window size
#[derive(Debug, Clone, PartialEq)]
pub struct ShellLayout {
    pub panel: Rect,
    pub title: Rect,
    pub choose: Rect,
    pub file_label: Rect,
    pub upload: Rect,
    pub export: Rect,
    pub bar: Rect,
    /// One per `TransformAction::ALL`, same order
    pub transforms: [Rect; 8],
    /// Free area above the bar, where the toast goes
    pub view_area: Rect,
}

impl ShellLayout {
    pub fn compute(width: f32, height: f32) -> Self {
        let inner = Rect::new(MARGIN + PADDING, MARGIN + PADDING, PANEL_WIDTH - PADDING * 2.0, height);
        let mut col = Column::new(inner);
        let title = col.next(LABEL_HEIGHT + 4.0);
        let choose = col.next(BUTTON_HEIGHT);
        let file_label = col.next(LABEL_HEIGHT);
        let upload = col.next(BUTTON_HEIGHT);
        let export = col.next(BUTTON_HEIGHT);
        let panel = Rect::new(MARGIN, MARGIN, PANEL_WIDTH, col.end() + PADDING - MARGIN);

        let bar = Rect::new(0.0, (height - BAR_HEIGHT).max(0.0), width, BAR_HEIGHT);
        let row = bar.pad(PADDING);
        let mut transforms = [Rect::default(); 8];
        for (i, r) in transforms.iter_mut().enumerate() {
            *r = row.cell(i, TransformAction::ALL.len(), ROW_GAP);
        }

        Self {
            panel,
            title,
            choose,
            file_label,
            upload,
            export,
            bar,
            transforms,
            view_area: Rect::new(0.0, 0.0, width, bar.y),
        }
    }

    /// Whether a point is over the chrome (and so not the 3D view)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.panel.contains(x, y) || self.bar.contains(x, y)
    }
}

/// One button in the upload panel
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelButton {
    rect: Rect,
    label: &'static str,
    style: ButtonStyle,
    /// Task in flight; the button still clicks and supersedes it
    busy: bool,
    action: ShellAction,
}

fn panel_buttons(layout: &ShellLayout, view: &ShellView) -> [PanelButton; 3] {
    [
        PanelButton {
            rect: layout.choose,
            label: "Choose File...",
            style: ButtonStyle::Normal,
            busy: false,
            action: ShellAction::ChooseFile,
        },
        PanelButton {
            rect: layout.upload,
            label: if view.loading { "Uploading..." } else { "Upload" },
            style: ButtonStyle::Primary,
            busy: view.loading,
            action: ShellAction::Upload,
        },
        PanelButton {
            rect: layout.export,
            label: if view.exporting { "Exporting..." } else { "Export to OBJ" },
            style: ButtonStyle::Primary,
            busy: view.exporting,
            action: ShellAction::Export,
        },
    ]
}

/// Draw the chrome; returns the actions clicked this frame
pub fn draw_shell(ctx: &mut UiContext, layout: &ShellLayout, view: &ShellView) -> Vec<ShellAction> {
    let mut actions = Vec::new();

    panel(layout.panel);
    label(layout.title, "Upload 3D Model", FONT_SIZE_HEADER, TEXT_COLOR);

    for button in panel_buttons(layout, view) {
        if text_button(ctx, button.rect, button.label, button.style, button.busy) {
            actions.push(button.action);
        }
    }

    match view.selected_file {
        Some(name) => {
            let text = fit_text(name, FONT_SIZE_SMALL, layout.file_label.w);
            label(layout.file_label, &text, FONT_SIZE_SMALL, TEXT_COLOR);
        }
        None => label(layout.file_label, "No file chosen", FONT_SIZE_SMALL, TEXT_DIM),
    }

    panel(layout.bar);
    for (action, rect) in TransformAction::ALL.iter().zip(layout.transforms.iter()) {
        if text_button(ctx, *rect, action.label(), ButtonStyle::Normal, false) {
            actions.push(ShellAction::Transform(*action));
        }
    }

    if let Some((text, level)) = view.status {
        toast(layout.view_area, text, level.color());
    }

    actions
}
