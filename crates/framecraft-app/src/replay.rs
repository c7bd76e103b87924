//! Replays a recorded input script against the reference canvas.

use framecraft_core::tools::SideAction;
use framecraft_core::{
    Canvas, CanvasDocument, EditingSession, Editor, KeyEvent, MouseButton, PointerEvent, Settings,
    SettingsError, ToolAction,
};
use kurbo::{Point, Vec2};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

fn primary_button() -> MouseButton {
    MouseButton::Left
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Toolbar click.
    Tool { id: String },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "primary_button")]
        button: MouseButton,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "primary_button")]
        button: MouseButton,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    /// Focus loss or similar interrupt.
    Cancel,
    /// Scroll the view by a device-space delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom around a device point.
    Zoom { x: f64, y: f64, factor: f64 },
}

/// Initial view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct View {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// A recorded session: the view to start from and the inputs to feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub view: View,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Result of a replay.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub document: CanvasDocument,
    /// Mode the canvas was left in.
    pub mode: String,
    /// Side-channel requests raised by the toolbar, in order.
    pub side_actions: Vec<SideAction>,
}

/// Drives an editing session from script events.
pub struct Replayer {
    session: EditingSession<Canvas>,
    side_actions: Vec<SideAction>,
}

impl Replayer {
    pub fn new(settings: &Settings, view: &View) -> Self {
        let mut canvas = Canvas::new();
        canvas.camera.zoom_at(Point::ZERO, view.zoom);
        canvas.camera.pan(Vec2::new(view.offset_x, view.offset_y));
        Self {
            session: EditingSession::new(canvas, settings),
            side_actions: Vec::new(),
        }
    }

    pub fn session(&self) -> &EditingSession<Canvas> {
        &self.session
    }

    pub fn apply(&mut self, event: &ScriptEvent) {
        match event {
            ScriptEvent::Tool { id } => self.select_tool(id),
            ScriptEvent::PointerDown { x, y, button } => {
                self.session.handle_pointer(PointerEvent::Down {
                    position: Point::new(*x, *y),
                    button: *button,
                });
            }
            ScriptEvent::PointerMove { x, y } => {
                self.session.handle_pointer(PointerEvent::Move {
                    position: Point::new(*x, *y),
                });
            }
            ScriptEvent::PointerUp { x, y, button } => {
                self.session.handle_pointer(PointerEvent::Up {
                    position: Point::new(*x, *y),
                    button: *button,
                });
            }
            ScriptEvent::Key { key, ctrl, shift } => self.key(key, *ctrl, *shift),
            ScriptEvent::Cancel => self.session.cancel(),
            ScriptEvent::Pan { dx, dy } => {
                self.session.editor_mut().camera.pan(Vec2::new(*dx, *dy));
            }
            ScriptEvent::Zoom { x, y, factor } => {
                self.session
                    .editor_mut()
                    .camera
                    .zoom_at(Point::new(*x, *y), *factor);
            }
        }
    }

    fn select_tool(&mut self, id: &str) {
        // Errors are logged by the registry; the mode stays as it was
        if let Ok(ToolAction::SideChannel(action)) = self.session.select_tool(id) {
            self.side_actions.push(action);
        }
    }

    fn key(&mut self, key: &str, ctrl: bool, shift: bool) {
        if ctrl {
            // Undo and redo never run with a gesture in flight
            self.session.cancel();
            let document = &mut self.session.editor_mut().document;
            match key {
                "z" | "Z" if shift => {
                    document.redo();
                }
                "z" | "Z" => {
                    document.undo();
                }
                "y" | "Y" => {
                    document.redo();
                }
                _ => {}
            }
            return;
        }

        let shortcut = match key.chars().collect::<Vec<_>>().as_slice() {
            [c] => self
                .session
                .registry()
                .catalogue()
                .by_shortcut(*c)
                .map(|entry| entry.id.clone()),
            _ => None,
        };
        match shortcut {
            Some(id) => {
                log::info!("Tool: {id}");
                self.select_tool(&id);
            }
            None => {
                self.session.handle_key(KeyEvent::Pressed(key.to_string()));
                self.session.handle_key(KeyEvent::Released(key.to_string()));
            }
        }
    }

    pub fn finish(self) -> ReplayOutcome {
        let side_actions = self.side_actions;
        let canvas = self.session.into_editor();
        let mode = canvas.active_mode().to_string();
        ReplayOutcome {
            document: canvas.document,
            mode,
            side_actions,
        }
    }
}

/// Replay `script` from an empty canvas.
pub fn replay(script: &Script, settings: &Settings) -> ReplayOutcome {
    let mut replayer = Replayer::new(settings, &script.view);
    for event in &script.events {
        log::trace!("replay {event:?}");
        replayer.apply(event);
    }
    replayer.finish()
}
