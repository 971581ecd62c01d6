//! UI components using egui.

use crate::shortcuts::ShortcutRegistry;
use egui::{Color32, Context, RichText};
use vecsketch_core::{MouseButton, OffsetRange, PendingPrompt, ShapeColor, ShapeKind, ToolKind};

/// Message shown in a modal window until acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Replace the canvas with an empty one.
    NewCanvas,
    /// Pick an image file and use it as the background.
    OpenImage,
    /// Pick a path and save the rendered canvas.
    SaveImage,
    /// Remove every shape (and the background, if configured).
    Clear,
    /// Change the current tool.
    SetTool(ToolKind),
    /// Commit the polyline being drawn.
    FinishPolyline,
    /// Change the color of future shapes of one kind.
    SetDrawingColor(ShapeKind, ShapeColor),
    /// Answer the move prompt. `None` cancels.
    ResolveOffset(Option<kurbo::Vec2>),
    /// Answer the recolor prompt. `None` cancels.
    ResolveColor(Option<ShapeColor>),
    /// Open the tips window.
    ShowTips,
}

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    pub tips_open: bool,
    pub notice: Option<Notice>,
    /// Values in the move prompt.
    pub offset_input: [f64; 2],
    /// Value in the recolor prompt.
    pub color_input: Color32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tips_open: false,
            notice: None,
            offset_input: [0.0, 0.0],
            color_input: Color32::BLACK,
        }
    }
}

impl UiState {
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Prepare the move prompt.
    pub fn reset_offset(&mut self) {
        self.offset_input = [0.0, 0.0];
    }

    /// Prepare the recolor prompt with the shape's current color.
    pub fn set_color_input(&mut self, color: ShapeColor) {
        self.color_input = to_color32(color);
    }
}

/// Canvas facts the UI needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub has_canvas: bool,
    pub tool: ToolKind,
    pub pending: Option<PendingPrompt>,
    /// Drawing color of the current drawing tool's shape kind.
    pub drawing_color: Option<(ShapeKind, ShapeColor)>,
    pub shape_count: usize,
    pub canvas_size: (u32, u32),
    pub probe_button: MouseButton,
    pub offset_range: OffsetRange,
}

pub(crate) fn to_color32(color: ShapeColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub(crate) fn from_color32(color: Color32) -> ShapeColor {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    ShapeColor::new(r, g, b, a)
}

fn button_name(button: MouseButton) -> &'static str {
    match button {
        MouseButton::Left => "Left-click",
        MouseButton::Right => "Right-click",
        MouseButton::Middle => "Middle-click",
    }
}

/// Render the whole UI chrome and return the action the user triggered, if any.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, status: &StatusInfo) -> Option<UiAction> {
    let mut action = render_menu_bar(ctx, status);
    if let Some(a) = render_status_bar(ctx, status) {
        action = Some(a);
    }

    if ui_state.tips_open {
        render_tips_window(ctx, ui_state, status);
    }

    match status.pending {
        Some(PendingPrompt::Offset { range, .. }) => {
            if let Some(a) = render_offset_prompt(ctx, ui_state, range) {
                action = Some(a);
            }
        }
        Some(PendingPrompt::Color { .. }) => {
            if let Some(a) = render_color_prompt(ctx, ui_state) {
                action = Some(a);
            }
        }
        None => render_notice(ctx, ui_state),
    }

    action
}

fn render_menu_bar(ctx: &Context, status: &StatusInfo) -> Option<UiAction> {
    let mut action = None;
    let enabled = status.has_canvas && status.pending.is_none();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    action = Some(UiAction::NewCanvas);
                    ui.close();
                }
                if ui.button("Open...").clicked() {
                    action = Some(UiAction::OpenImage);
                    ui.close();
                }
                if ui.button("Save...").clicked() {
                    action = Some(UiAction::SaveImage);
                    ui.close();
                }
            });

            ui.menu_button("Draw", |ui| {
                for tool in [ToolKind::Line, ToolKind::Polyline, ToolKind::Ellipse] {
                    if ui.add_enabled(enabled, egui::RadioButton::new(status.tool == tool, tool.label())).clicked() {
                        action = Some(UiAction::SetTool(tool));
                        ui.close();
                    }
                }
                ui.separator();
                let finishing = enabled && status.tool == ToolKind::Polyline;
                if ui.add_enabled(finishing, egui::Button::new("Finish Polyline")).clicked() {
                    action = Some(UiAction::FinishPolyline);
                    ui.close();
                }
                if ui
                    .add_enabled(enabled, egui::RadioButton::new(status.tool == ToolKind::None, "None"))
                    .clicked()
                {
                    action = Some(UiAction::SetTool(ToolKind::None));
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                for tool in [ToolKind::Select, ToolKind::Move, ToolKind::ChangeColor] {
                    if ui.add_enabled(enabled, egui::RadioButton::new(status.tool == tool, tool.label())).clicked() {
                        action = Some(UiAction::SetTool(tool));
                        ui.close();
                    }
                }
                ui.separator();
                if ui.add_enabled(enabled, egui::Button::new("Clear")).clicked() {
                    action = Some(UiAction::Clear);
                    ui.close();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("Tips").clicked() {
                    action = Some(UiAction::ShowTips);
                    ui.close();
                }
            });
        });
    });

    action
}

fn render_status_bar(ctx: &Context, status: &StatusInfo) -> Option<UiAction> {
    let mut action = None;

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if !status.has_canvas {
                ui.label("No canvas. Use File > New or File > Open... to start.");
                return;
            }

            ui.label(format!("Tool: {}", status.tool));
            ui.separator();
            ui.label(format!("Shapes: {}", status.shape_count));
            ui.separator();
            ui.label(format!("{} x {}", status.canvas_size.0, status.canvas_size.1));

            if let Some((kind, color)) = status.drawing_color {
                ui.separator();
                ui.label(format!("{} color:", kind));
                let mut color32 = to_color32(color);
                if ui.color_edit_button_srgba(&mut color32).changed() {
                    action = Some(UiAction::SetDrawingColor(kind, from_color32(color32)));
                }
            }

            if status.tool == ToolKind::Polyline {
                ui.separator();
                ui.label(RichText::new("Click to add points, Enter to finish").weak());
            } else if status.tool.probes() {
                ui.separator();
                ui.label(RichText::new(format!("{} a shape", button_name(status.probe_button))).weak());
            }
        });
    });

    action
}

fn render_offset_prompt(ctx: &Context, ui_state: &mut UiState, range: OffsetRange) -> Option<UiAction> {
    let mut action = None;

    let response = egui::Modal::new(egui::Id::new("offset_prompt")).show(ctx, |ui| {
        ui.set_width(240.0);
        ui.heading("Move Shape");
        ui.add_space(8.0);

        egui::Grid::new("offset_grid").num_columns(2).show(ui, |ui| {
            ui.label("Offset X:");
            ui.add(egui::DragValue::new(&mut ui_state.offset_input[0]).range(range.min..=range.max));
            ui.end_row();
            ui.label("Offset Y:");
            ui.add(egui::DragValue::new(&mut ui_state.offset_input[1]).range(range.min..=range.max));
            ui.end_row();
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() {
                let [x, y] = ui_state.offset_input;
                action = Some(UiAction::ResolveOffset(Some(kurbo::Vec2::new(x, y))));
            }
            if ui.button("Cancel").clicked() {
                action = Some(UiAction::ResolveOffset(None));
            }
        });
    });

    if action.is_none() && response.should_close() {
        action = Some(UiAction::ResolveOffset(None));
    }
    action
}

fn render_color_prompt(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    let response = egui::Modal::new(egui::Id::new("color_prompt")).show(ctx, |ui| {
        ui.heading("Change Color");
        ui.add_space(8.0);
        egui::color_picker::color_picker_color32(
            ui,
            &mut ui_state.color_input,
            egui::color_picker::Alpha::OnlyBlend,
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() {
                action = Some(UiAction::ResolveColor(Some(from_color32(ui_state.color_input))));
            }
            if ui.button("Cancel").clicked() {
                action = Some(UiAction::ResolveColor(None));
            }
        });
    });

    if action.is_none() && response.should_close() {
        action = Some(UiAction::ResolveColor(None));
    }
    action
}

fn render_notice(ctx: &Context, ui_state: &mut UiState) {
    let Some(notice) = &ui_state.notice else {
        return;
    };

    let mut close = false;
    let response = egui::Modal::new(egui::Id::new("notice")).show(ctx, |ui| {
        ui.set_min_width(220.0);
        ui.heading(&notice.title);
        ui.add_space(8.0);
        ui.label(&notice.body);
        ui.add_space(8.0);
        if ui.button("OK").clicked() {
            close = true;
        }
    });

    if close || response.should_close() {
        ui_state.notice = None;
    }
}

fn render_tips_window(ctx: &Context, ui_state: &mut UiState, status: &StatusInfo) {
    let probe = button_name(status.probe_button);
    let mut open = ui_state.tips_open;

    egui::Window::new("Tips")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.label(RichText::new("Drawing").strong());
            ui.label("Pick Line or Ellipse from the Draw menu, then press, drag and release.");
            ui.label("Polyline: click each vertex. Switching tools or pressing Enter finishes it.");
            ui.add_space(8.0);

            ui.label(RichText::new("Editing").strong());
            ui.label(format!("Select: {} a shape to see its type and length or area.", probe));
            ui.label(format!(
                "Move: {} a shape, then enter an offset between {} and {} per axis.",
                probe, status.offset_range.min, status.offset_range.max
            ));
            ui.label(format!("Change Color: {} a shape and pick a new color.", probe));
            ui.add_space(8.0);

            ui.label(RichText::new("Keyboard Shortcuts").strong());
            egui::Grid::new("shortcuts_grid").num_columns(2).striped(true).show(ui, |ui| {
                for shortcut in ShortcutRegistry::all() {
                    ui.label(
                        RichText::new(shortcut.format())
                            .family(egui::FontFamily::Monospace)
                            .color(Color32::from_rgb(100, 116, 139)),
                    );
                    ui.label(shortcut.description);
                    ui.end_row();
                }
            });
        });

    ui_state.tips_open = open;
}
