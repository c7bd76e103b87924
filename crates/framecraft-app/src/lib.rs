//! FrameCraft Application
//!
//! Headless shell that feeds recorded toolbar, pointer and keyboard input
//! through an editing session on the reference canvas.

mod cli;
mod replay;

pub use cli::{Cli, Command, format_shortcuts, run};
pub use replay::{ReplayError, ReplayOutcome, Replayer, Script, ScriptEvent, View, replay};
