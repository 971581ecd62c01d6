//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use vecsketch_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn modifiers(&self) -> egui::Modifiers {
        let mut modifiers = egui::Modifiers::NONE;
        if self.ctrl {
            modifiers = modifiers | egui::Modifiers::COMMAND;
        }
        if self.shift {
            modifiers = modifiers | egui::Modifiers::SHIFT;
        }
        modifiers
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("N", true, false, "New canvas", UiAction::NewCanvas),
            Shortcut::new("O", true, false, "Open image...", UiAction::OpenImage),
            Shortcut::new("S", true, false, "Save image...", UiAction::SaveImage),
            Shortcut::new("Delete", true, false, "Clear canvas", UiAction::Clear),
            Shortcut::new("L", false, false, "Line tool", UiAction::SetTool(ToolKind::Line)),
            Shortcut::new("P", false, false, "Polyline tool", UiAction::SetTool(ToolKind::Polyline)),
            Shortcut::new("E", false, false, "Ellipse tool", UiAction::SetTool(ToolKind::Ellipse)),
            Shortcut::new("S", false, false, "Select tool", UiAction::SetTool(ToolKind::Select)),
            Shortcut::new("M", false, false, "Move tool", UiAction::SetTool(ToolKind::Move)),
            Shortcut::new("C", false, false, "Change color tool", UiAction::SetTool(ToolKind::ChangeColor)),
            Shortcut::new("Enter", false, false, "Finish polyline", UiAction::FinishPolyline),
            Shortcut::new("Escape", false, false, "Stop drawing (no tool)", UiAction::SetTool(ToolKind::None)),
            Shortcut::new("F1", false, false, "Show tips", UiAction::ShowTips),
        ]
    }

    /// Consume the first shortcut pressed this frame and return its action.
    pub fn check(ctx: &egui::Context) -> Option<UiAction> {
        ctx.input_mut(|input| {
            Self::all().into_iter().find_map(|shortcut| {
                let key = egui::Key::from_name(shortcut.key)?;
                input
                    .consume_key(shortcut.modifiers(), key)
                    .then_some(shortcut.action)
            })
        })
    }
}
