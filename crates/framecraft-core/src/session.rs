//! Editing session: routes raw input through the gesture recognizer to the
//! active creation tool and keeps tool lifecycle in step with the host mode.

use crate::editor::Editor;
use crate::input::{GestureRecognizer, KeyEvent, PointerEvent, ToolEvent};
use crate::settings::Settings;
use crate::tools::{ToolAction, ToolError, ToolRegistry};

/// A host engine together with the tools that drive it.
pub struct EditingSession<E: Editor> {
    editor: E,
    registry: ToolRegistry,
    recognizer: GestureRecognizer,
    /// Creation tool whose `on_enter` has run and `on_exit` has not.
    active_tool: Option<&'static str>,
}

impl<E: Editor> EditingSession<E> {
    pub fn new(editor: E, settings: &Settings) -> Self {
        Self::with_registry(editor, ToolRegistry::new(settings), settings.drag_threshold)
    }

    pub fn with_registry(editor: E, registry: ToolRegistry, drag_threshold: f64) -> Self {
        Self {
            editor,
            registry,
            recognizer: GestureRecognizer::new(drag_threshold),
            active_tool: None,
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Direct access to the host. Mode changes made here are picked up on
    /// the next input event.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn active_tool(&self) -> Option<&'static str> {
        self.active_tool
    }

    pub fn into_editor(mut self) -> E {
        self.exit_active_tool();
        self.editor
    }

    /// Activate a toolbar entry.
    ///
    /// Side-channel actions are returned to the caller without touching the
    /// mode. Unknown ids leave the session as it was.
    pub fn select_tool(&mut self, id: &str) -> Result<ToolAction, ToolError> {
        let action = self.registry.switch_to_tool(id)?;
        match action {
            ToolAction::Builtin(mode) => {
                self.exit_active_tool();
                self.recognizer.reset();
                self.editor.set_active_mode(mode);
            }
            ToolAction::Creation(tool_id) => {
                self.exit_active_tool();
                self.recognizer.reset();
                self.editor.set_active_mode(tool_id);
                if let Some(tool) = self.registry.tool_mut(tool_id) {
                    tool.on_enter(&mut self.editor);
                    self.active_tool = Some(tool_id);
                }
            }
            ToolAction::SideChannel(side) => {
                log::debug!("side channel action {side:?} for {id}");
            }
        }
        Ok(action)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        for event in self.recognizer.handle_pointer_event(event) {
            self.dispatch(event);
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(event) = self.recognizer.handle_key_event(event) {
            self.dispatch(event);
        }
    }

    /// Host-initiated interrupt, e.g. focus loss.
    pub fn cancel(&mut self) {
        self.recognizer.reset();
        if let Some(tool) = self.active_tool.and_then(|id| self.registry.tool_mut(id)) {
            tool.on_cancel(&mut self.editor);
        }
        self.sync_mode();
    }

    /// Exit the active tool if the host has moved to another mode.
    pub fn sync_mode(&mut self) {
        if let Some(id) = self.active_tool {
            if self.editor.active_mode() != id {
                log::debug!("mode left {id}, exiting tool");
                self.exit_active_tool();
            }
        }
    }

    fn dispatch(&mut self, event: ToolEvent) {
        self.sync_mode();
        match self.active_tool.and_then(|id| self.registry.tool_mut(id)) {
            Some(tool) => tool.handle_event(&mut self.editor, event),
            None => log::trace!("no active tool for {event:?}"),
        }
        self.sync_mode();
    }

    fn exit_active_tool(&mut self) {
        if let Some(id) = self.active_tool.take() {
            if let Some(tool) = self.registry.tool_mut(id) {
                tool.on_exit(&mut self.editor);
            }
        }
    }
}
