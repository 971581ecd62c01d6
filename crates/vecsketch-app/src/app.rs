//! Application state and the eframe integration.

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{Notice, StatusInfo, UiAction, UiState, render_ui};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;
use vecsketch_core::{Canvas, CanvasConfig, CanvasError, Interaction, MouseButton};
use vecsketch_render::{RasterRenderer, RenderContext, RenderError, Renderer, load_background, save_frame};

/// Application errors. None of them stop the app; they are shown as notices.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Window and canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub canvas: CanvasConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "VecSketch".to_string(),
            width: 1024,
            height: 768,
            canvas: CanvasConfig::default(),
        }
    }
}

impl AppConfig {
    /// Environment variable naming a JSON config file.
    pub const ENV_VAR: &'static str = "VECSKETCH_CONFIG";

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.canvas.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Load the file named by [`Self::ENV_VAR`], falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Notice to show for an interaction result, if any.
fn notice_for(interaction: &Interaction) -> Option<Notice> {
    match interaction {
        Interaction::Inspected { kind, metric, .. } => Some(Notice::new(
            "Shape Properties",
            format!("Type: {}\n{}", kind.label(), metric),
        )),
        Interaction::NothingFound => Some(Notice::new(
            "No Shape Selected",
            "No shape found at the selected position.",
        )),
        _ => None,
    }
}

fn map_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Left),
        egui::PointerButton::Secondary => Some(MouseButton::Right),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn to_canvas(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

/// The VecSketch desktop application.
pub struct App {
    config: AppConfig,
    /// Created by File > New or on the first opened image.
    canvas: Option<Canvas>,
    renderer: RasterRenderer,
    texture: Option<egui::TextureHandle>,
    needs_render: bool,
    ui_state: UiState,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self {
            config,
            canvas: None,
            renderer: RasterRenderer::new(),
            texture: None,
            needs_render: true,
            ui_state: UiState::default(),
        }
    }

    /// Open the main window and run until it is closed.
    pub fn run(config: AppConfig) -> eframe::Result<()> {
        let viewport = egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([config.width as f32, config.height as f32])
            .with_min_inner_size([480.0, 360.0]);
        let options = eframe::NativeOptions {
            viewport,
            ..Default::default()
        };
        let title = config.title.clone();
        eframe::run_native(&title, options, Box::new(move |cc| Ok(Box::new(App::new(cc, config)))))
    }

    fn status(&self) -> StatusInfo {
        let Some(canvas) = &self.canvas else {
            return StatusInfo {
                probe_button: self.config.canvas.probe_button,
                offset_range: self.config.canvas.offset_range,
                ..Default::default()
            };
        };
        let tool = canvas.tool();
        let size = canvas.size();
        StatusInfo {
            has_canvas: true,
            tool,
            pending: canvas.pending_prompt(),
            drawing_color: tool
                .shape_kind()
                .map(|kind| (kind, canvas.store().drawing_color(kind))),
            shape_count: canvas.store().len(),
            canvas_size: (size.width.ceil() as u32, size.height.ceil() as u32),
            probe_button: canvas.config().probe_button,
            offset_range: canvas.config().offset_range,
        }
    }

    fn accepts_shortcuts(&self, ctx: &egui::Context) -> bool {
        self.ui_state.notice.is_none()
            && self.canvas.as_ref().is_none_or(|c| c.pending_prompt().is_none())
            && !ctx.wants_keyboard_input()
    }

    fn report(&mut self, title: &str, error: &dyn Display) {
        log::error!("{}: {}", title, error);
        self.ui_state.show_notice(Notice::new(title, error.to_string()));
    }

    fn new_canvas(&mut self) {
        log::info!("New canvas");
        self.canvas = Some(Canvas::with_config(self.config.canvas.clone()));
        self.needs_render = true;
    }

    fn open_image(&mut self) -> Result<(), AppError> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open Image File")
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return Ok(());
        };

        let image = match load_background(&path) {
            Ok(image) => image,
            Err(e) => {
                self.report("Failed to load image.", &e);
                return Ok(());
            }
        };

        let canvas = self
            .canvas
            .get_or_insert_with(|| Canvas::with_config(self.config.canvas.clone()));
        canvas.clear()?;
        canvas.set_background(image)?;
        self.needs_render = true;
        Ok(())
    }

    fn save_image(&mut self) -> Result<(), AppError> {
        let Some(canvas) = &self.canvas else {
            self.ui_state.show_notice(Notice::new("Save Error", "No canvas to save."));
            return Ok(());
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save Image File")
            .add_filter("Images", &["png", "jpg"])
            .set_file_name("untitled.png")
            .save_file()
        else {
            return Ok(());
        };

        let frame = self.renderer.render(&RenderContext::new(canvas).without_preview())?;
        if let Err(e) = save_frame(&frame, &path) {
            self.report("Failed to save image.", &e);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UiAction) -> Result<(), AppError> {
        match action {
            UiAction::NewCanvas => self.new_canvas(),
            UiAction::OpenImage => self.open_image()?,
            UiAction::SaveImage => self.save_image()?,
            UiAction::ShowTips => self.ui_state.tips_open = true,
            other => {
                let Some(canvas) = self.canvas.as_mut() else {
                    return Ok(());
                };
                let interaction = match other {
                    UiAction::Clear => {
                        canvas.clear()?;
                        None
                    }
                    UiAction::SetTool(tool) => {
                        canvas.set_tool(tool)?;
                        None
                    }
                    UiAction::FinishPolyline => {
                        canvas.finish_polyline()?;
                        None
                    }
                    UiAction::SetDrawingColor(kind, color) => {
                        canvas.set_drawing_color(kind, color)?;
                        None
                    }
                    UiAction::ResolveOffset(offset) => Some(canvas.resolve_offset(offset)?),
                    UiAction::ResolveColor(color) => Some(canvas.resolve_color(color)?),
                    _ => None,
                };
                self.needs_render = true;
                if let Some(interaction) = interaction {
                    self.on_interaction(interaction);
                }
            }
        }
        Ok(())
    }

    fn on_interaction(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::OffsetRequested { .. } => self.ui_state.reset_offset(),
            Interaction::ColorRequested { current, .. } => self.ui_state.set_color_input(current),
            Interaction::None => return,
            _ => {}
        }
        if let Some(notice) = notice_for(&interaction) {
            self.ui_state.show_notice(notice);
        }
        self.needs_render = true;
    }

    fn sync_texture(&mut self, ctx: &egui::Context) -> Result<(), AppError> {
        if !self.needs_render {
            return Ok(());
        }
        self.needs_render = false;

        let Some(canvas) = &self.canvas else {
            self.texture = None;
            return Ok(());
        };
        let frame = self.renderer.render(&RenderContext::new(canvas))?;
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width() as usize, frame.height() as usize],
            frame.pixels(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST)),
        }
        Ok(())
    }

    fn show_canvas(&self, ctx: &egui::Context) -> Option<egui::Response> {
        egui::CentralPanel::default()
            .show(ctx, |ui| {
                let (Some(canvas), Some(texture)) = (&self.canvas, &self.texture) else {
                    ui.centered_and_justified(|ui| {
                        ui.label("Use File > New or File > Open... to start drawing.");
                    });
                    return None;
                };
                let size = canvas.size();
                egui::ScrollArea::both()
                    .show(ui, |ui| {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(size.width as f32, size.height as f32),
                            egui::Sense::click_and_drag(),
                        );
                        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
                        Some(response)
                    })
                    .inner
            })
            .inner
    }

    /// Forward this frame's pointer events over the canvas.
    fn forward_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) -> Result<(), AppError> {
        if self.ui_state.notice.is_some() {
            return Ok(());
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return Ok(());
        };

        let origin = response.rect.min;
        let events = ctx.input(|i| i.events.clone());
        let mut interactions = Vec::new();

        for event in events {
            if canvas.pending_prompt().is_some() {
                break;
            }
            match event {
                egui::Event::PointerButton {
                    pos, button, pressed, ..
                } => {
                    let Some(button) = map_button(button) else {
                        continue;
                    };
                    let position = to_canvas(pos, origin);
                    if pressed {
                        if response.rect.contains(pos) && response.contains_pointer() {
                            interactions.push(canvas.pointer_down(position, button)?);
                        }
                    } else {
                        interactions.push(canvas.pointer_up(position, button)?);
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    if canvas.pointer_move(to_canvas(pos, origin))? {
                        self.needs_render = true;
                    }
                }
                _ => {}
            }
        }

        for interaction in interactions {
            self.on_interaction(interaction);
        }
        Ok(())
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = None;
        if self.accepts_shortcuts(ctx) {
            action = ShortcutRegistry::check(ctx);
        }

        let status = self.status();
        if let Some(ui_action) = render_ui(ctx, &mut self.ui_state, &status) {
            action = Some(ui_action);
        }
        if let Some(action) = action {
            if let Err(e) = self.handle_action(action) {
                self.report("Error", &e);
            }
        }

        if let Err(e) = self.sync_texture(ctx) {
            self.report("Render Error", &e);
        }

        if let Some(response) = self.show_canvas(ctx) {
            if let Err(e) = self.forward_pointer(ctx, &response) {
                self.report("Error", &e);
            }
        }

        if self.needs_render {
            ctx.request_repaint();
        }
    }
}
