//! Command line handling for the `framecraft` binary.

use crate::replay::{ReplayError, Script, replay};
use clap::Parser;
use framecraft_core::tools::ToolCatalogue;
use framecraft_core::{Settings, ToolRegistry};
use std::io::Write;
use std::path::PathBuf;

/// Replay recorded canvas input and print the resulting document.
#[derive(Debug, Parser)]
#[command(name = "framecraft", version)]
#[command(about = "Replay recorded canvas input and print the resulting document as JSON")]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Print the toolbar catalogue as JSON
    #[arg(long, conflicts_with = "shortcuts")]
    pub catalogue: bool,

    /// Print the keyboard shortcuts
    #[arg(long)]
    pub shortcuts: bool,

    /// Input script to replay
    #[arg(
        value_name = "SCRIPT",
        required_unless_present_any = ["catalogue", "shortcuts"],
        conflicts_with_all = ["catalogue", "shortcuts"]
    )]
    pub script: Option<PathBuf>,
}

impl Cli {
    pub fn into_command(self) -> Command {
        match self.script {
            Some(script) => Command::Replay {
                script,
                settings: self.settings,
            },
            None if self.shortcuts => Command::Shortcuts,
            None => Command::Catalogue {
                settings: self.settings,
            },
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replay a script and print the resulting document as JSON.
    Replay {
        script: PathBuf,
        settings: Option<PathBuf>,
    },
    /// Print the toolbar catalogue as JSON.
    Catalogue { settings: Option<PathBuf> },
    /// Print the keyboard shortcuts.
    Shortcuts,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, ReplayError> {
    match path {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            Ok(Settings::load(path)?)
        }
        None => Ok(Settings::default()),
    }
}

/// Format the shortcut table, one tool per line.
pub fn format_shortcuts(catalogue: &ToolCatalogue) -> String {
    let mut out = String::from("\n=== Tool Shortcuts ===\n");
    for entry in catalogue.entries() {
        if let Some(key) = entry.shortcut {
            out.push_str(&format!("  {:4} {}\n", key.to_ascii_uppercase(), entry.label));
        }
    }
    out.push_str(&format!("  {:4} {}\n", "Esc", "Cancel current action"));
    out
}

/// Execute a command, writing its output to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> Result<(), ReplayError> {
    match command {
        Command::Shortcuts => {
            let registry = ToolRegistry::default();
            write!(out, "{}", format_shortcuts(registry.catalogue()))?;
        }
        Command::Catalogue { settings } => {
            let registry = ToolRegistry::new(&load_settings(settings.as_ref())?);
            writeln!(out, "{}", serde_json::to_string_pretty(registry.catalogue())?)?;
        }
        Command::Replay { script, settings } => {
            let settings = load_settings(settings.as_ref())?;
            let script = Script::load(script)?;
            let outcome = replay(&script, &settings);
            log::info!(
                "Replayed {} events: {} shapes, mode {}",
                script.events.len(),
                outcome.document.len(),
                outcome.mode
            );
            for action in &outcome.side_actions {
                log::info!("Unhandled side action: {action:?}");
            }
            writeln!(out, "{}", outcome.document.to_json()?)?;
        }
    }
    Ok(())
}
