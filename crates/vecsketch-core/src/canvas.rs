//! Canvas state and pointer event handling.

use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::input::{MouseButton, PointerEvent};
use crate::prompt::{OffsetRange, Prompter};
use crate::selection::Selection;
use crate::shapes::{Metric, Shape, ShapeColor, ShapeKind};
use crate::store::ShapeStore;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Size, Vec2};

/// Decoded raster drawn behind every shape, as straight-alpha RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl BackgroundImage {
    /// Wrap a pixel buffer. `rgba` must hold exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> CanvasResult<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(CanvasError::Config(format!(
                "background buffer of {} bytes does not match {}x{}",
                rgba.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Prompt the canvas is waiting on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingPrompt {
    /// Waiting for a move offset for `target`.
    Offset { target: Selection, range: OffsetRange },
    /// Waiting for a new color for `target`.
    Color { target: Selection, current: ShapeColor },
}

/// What a pointer event or prompt answer did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// The event had no effect.
    None,
    /// A drawing interaction started or a polyline point was added.
    Drawing,
    /// A shape was committed to the store.
    Committed(Selection),
    /// The select tool found a shape.
    Inspected {
        selection: Selection,
        kind: ShapeKind,
        metric: Metric,
    },
    /// A probe found no shape under the pointer.
    NothingFound,
    /// The move tool found `target` and waits for [`Canvas::resolve_offset`].
    OffsetRequested { target: Selection, range: OffsetRange },
    /// The recolor tool found `target` and waits for [`Canvas::resolve_color`].
    ColorRequested { target: Selection, current: ShapeColor },
    /// A shape was translated by the (clamped) offset.
    Moved { target: Selection, offset: Vec2 },
    /// A shape got a new color.
    Recolored { target: Selection, color: ShapeColor },
    /// A prompt was dismissed without an answer.
    Cancelled,
}

/// In-progress shape and the color it is previewed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub shape: Shape,
    pub color: ShapeColor,
}

/// Drawing canvas: committed shapes, the active tool, the selection and an
/// optional background image.
///
/// While a prompt is pending, every mutating call other than the matching
/// `resolve_*` fails with [`CanvasError::PromptPending`] and changes nothing.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    store: ShapeStore,
    tool_manager: ToolManager,
    selection: Selection,
    background: Option<BackgroundImage>,
    pending: Option<PendingPrompt>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create an empty canvas with `config`.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            store: ShapeStore::with_drawing_color(config.drawing_color),
            config,
            tool_manager: ToolManager::new(),
            selection: Selection::None,
            background: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool()
    }

    pub fn tool_manager(&self) -> &ToolManager {
        &self.tool_manager
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn pending_prompt(&self) -> Option<PendingPrompt> {
        self.pending
    }

    /// Pixel size of the drawing surface: the configured size, grown to fit
    /// the background image.
    pub fn size(&self) -> Size {
        let base = self.config.size;
        match &self.background {
            Some(image) => {
                let image = image.size();
                Size::new(base.width.max(image.width), base.height.max(image.height))
            }
            None => base,
        }
    }

    fn ensure_no_prompt(&self) -> CanvasResult<()> {
        match self.pending {
            Some(_) => Err(CanvasError::PromptPending),
            None => Ok(()),
        }
    }

    /// Switch tools. Leaving the polyline tool commits the unfinished
    /// polyline, whose selection is returned.
    pub fn set_tool(&mut self, tool: ToolKind) -> CanvasResult<Option<Selection>> {
        self.ensure_no_prompt()?;
        log::info!("Tool: {} -> {}", self.tool(), tool);
        Ok(self
            .tool_manager
            .set_tool(tool)
            .map(|polyline| self.store.push_polyline(polyline)))
    }

    /// Commit the polyline being drawn without switching tools.
    pub fn finish_polyline(&mut self) -> CanvasResult<Option<Selection>> {
        self.ensure_no_prompt()?;
        Ok(self
            .tool_manager
            .finish_polyline()
            .map(|polyline| self.store.push_polyline(polyline)))
    }

    /// Change the color of future shapes of `kind`.
    pub fn set_drawing_color(&mut self, kind: ShapeKind, color: ShapeColor) -> CanvasResult<()> {
        self.ensure_no_prompt()?;
        self.store.set_drawing_color(kind, color);
        Ok(())
    }

    /// Replace the background image.
    pub fn set_background(&mut self, image: BackgroundImage) -> CanvasResult<()> {
        self.ensure_no_prompt()?;
        log::info!("Background set to {}x{}", image.width(), image.height());
        self.background = Some(image);
        Ok(())
    }

    /// Remove every shape, the polyline being drawn and the selection. The
    /// background is removed too when `clear_background` is configured.
    pub fn clear(&mut self) -> CanvasResult<()> {
        self.ensure_no_prompt()?;
        self.store.clear();
        self.tool_manager.cancel();
        self.selection = Selection::None;
        if self.config.clear_background {
            self.background = None;
        }
        log::info!("Canvas cleared");
        Ok(())
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> CanvasResult<Interaction> {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            PointerEvent::Move { position } => {
                self.pointer_move(position)?;
                Ok(Interaction::None)
            }
        }
    }

    /// Pointer pressed at `position`.
    pub fn pointer_down(&mut self, position: Point, button: MouseButton) -> CanvasResult<Interaction> {
        self.ensure_no_prompt()?;
        let tool = self.tool();

        if tool.draws() {
            self.tool_manager.begin(position);
            return Ok(Interaction::Drawing);
        }
        if !tool.probes() || button != self.config.probe_button {
            return Ok(Interaction::None);
        }

        let found = self.store.hit_test(position, self.config.tolerance);
        log::debug!("{} probe at ({}, {}) found {:?}", tool, position.x, position.y, found);

        if found.is_none() {
            if tool == ToolKind::Select {
                self.selection = Selection::None;
            }
            return Ok(Interaction::NothingFound);
        }
        self.selection = found;

        match tool {
            ToolKind::Select => {
                let metric = self.store.metric(found)?;
                let kind = found.kind().ok_or(CanvasError::InvalidSelection(found))?;
                Ok(Interaction::Inspected {
                    selection: found,
                    kind,
                    metric,
                })
            }
            ToolKind::Move => {
                let range = self.config.offset_range;
                self.pending = Some(PendingPrompt::Offset { target: found, range });
                Ok(Interaction::OffsetRequested { target: found, range })
            }
            ToolKind::ChangeColor => {
                let current = self.store.color(found)?;
                self.pending = Some(PendingPrompt::Color { target: found, current });
                Ok(Interaction::ColorRequested { target: found, current })
            }
            _ => Ok(Interaction::None),
        }
    }

    /// Pointer moved to `position`. Returns whether the preview changed.
    pub fn pointer_move(&mut self, position: Point) -> CanvasResult<bool> {
        self.ensure_no_prompt()?;
        if !self.tool_manager.is_active() {
            return Ok(false);
        }
        let before = self.tool_manager.state();
        self.tool_manager.update(position);
        Ok(before != self.tool_manager.state())
    }

    /// Pointer released at `position`.
    pub fn pointer_up(&mut self, position: Point, _button: MouseButton) -> CanvasResult<Interaction> {
        self.ensure_no_prompt()?;
        match self.tool_manager.end(position) {
            Some(shape) => Ok(Interaction::Committed(self.store.push(shape))),
            None => Ok(Interaction::None),
        }
    }

    /// Answer a pending offset prompt. `None` cancels.
    ///
    /// Each axis is clamped to the configured range before translating. A
    /// non-finite offset cancels the move.
    pub fn resolve_offset(&mut self, offset: Option<Vec2>) -> CanvasResult<Interaction> {
        let Some(PendingPrompt::Offset { target, range }) = self.pending else {
            return Err(CanvasError::NoPendingPrompt);
        };
        self.pending = None;

        let Some(offset) = offset.filter(|o| o.is_finite()) else {
            log::debug!("Move of {:?} cancelled", target);
            return Ok(Interaction::Cancelled);
        };
        let offset = range.clamp(offset);
        self.store.translate(target, offset)?;
        log::debug!("Moved {:?} by ({}, {})", target, offset.x, offset.y);
        Ok(Interaction::Moved { target, offset })
    }

    /// Answer a pending color prompt. `None` cancels. A successful recolor
    /// clears the selection.
    pub fn resolve_color(&mut self, color: Option<ShapeColor>) -> CanvasResult<Interaction> {
        let Some(PendingPrompt::Color { target, .. }) = self.pending else {
            return Err(CanvasError::NoPendingPrompt);
        };
        self.pending = None;

        let Some(color) = color else {
            log::debug!("Recolor of {:?} cancelled", target);
            return Ok(Interaction::Cancelled);
        };
        self.store.set_color(target, color)?;
        self.selection = Selection::None;
        Ok(Interaction::Recolored { target, color })
    }

    /// Pointer press that answers any prompt immediately through `prompter`.
    ///
    /// This gives blocking modal semantics: by the time it returns, no prompt
    /// is pending.
    pub fn handle_pointer_down<P: Prompter + ?Sized>(
        &mut self,
        position: Point,
        button: MouseButton,
        prompter: &mut P,
    ) -> CanvasResult<Interaction> {
        match self.pointer_down(position, button)? {
            Interaction::OffsetRequested { range, .. } => {
                let answer = prompter.request_offset(range);
                self.resolve_offset(answer)
            }
            Interaction::ColorRequested { current, .. } => {
                let answer = prompter.request_color(current);
                self.resolve_color(answer)
            }
            other => Ok(other),
        }
    }

    /// The shape being drawn, with its kind's drawing color.
    pub fn preview(&self) -> Option<Preview> {
        let shape = self.tool_manager.preview_shape()?;
        let color = self.store.drawing_color(shape.kind());
        Some(Preview { shape, color })
    }
}
