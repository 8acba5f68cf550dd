//! Host command interface.
//!
//! An embedding shell (menu bar, keyboard shortcuts, a CLI) triggers editor
//! actions by name. The shell builds a [`CommandTable`], registers one
//! callback per action it supports and dispatches names into it; there is
//! no process-wide registry.
//!
//! ```
//! # use mudtote::host::{CommandOutput, CommandTable};
//! let mut table = CommandTable::new();
//! table.register("export-json", || Ok(CommandOutput::Text("{}".to_string())));
//!
//! let output = table.dispatch("export-json").unwrap();
//! assert_eq!(output, CommandOutput::Text("{}".to_string()));
//! assert!(table.dispatch("undo").is_err());
//! ```

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::error::MudtoteError;

/// Well-known command names.
pub mod commands {
    pub const UNDO: &str = "undo";
    pub const REDO: &str = "redo";
    pub const EXPORT_SVG: &str = "export-svg";
    pub const EXPORT_TIKZ: &str = "export-tikz";
    pub const EXPORT_JSON: &str = "export-json";
    pub const EXPORT_CANVAS: &str = "export-canvas";
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// The command completed without producing anything.
    None,
    /// The command produced a document or message.
    Text(String),
}

impl CommandOutput {
    /// Returns the produced text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Callback registered for a command.
pub type CommandCallback<'a> = Box<dyn FnMut() -> Result<CommandOutput, MudtoteError> + 'a>;

/// Named callbacks injected by the embedding shell.
#[derive(Default)]
pub struct CommandTable<'a> {
    commands: IndexMap<String, CommandCallback<'a>>,
}

impl<'a> CommandTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`, replacing any previous callback.
    pub fn register<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut() -> Result<CommandOutput, MudtoteError> + 'a,
    {
        self.commands.insert(name.into(), Box::new(callback));
    }

    /// Returns `true` if a callback is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Runs the callback registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::UnknownCommand`] if nothing is registered
    /// under `name`, or whatever error the callback returns.
    pub fn dispatch(&mut self, name: &str) -> Result<CommandOutput, MudtoteError> {
        let callback = self
            .commands
            .get_mut(name)
            .ok_or_else(|| MudtoteError::UnknownCommand(name.to_string()))?;
        debug!(command = name; "Dispatching command");
        callback()
    }
}

impl fmt::Debug for CommandTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
