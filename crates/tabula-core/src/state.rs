//! State management for table applications.
//!
//! This module implements the Elm Architecture pattern for predictable state
//! management: `State + Message → (State, Command)`. Widgets emit messages,
//! the owning state folds them in and hands back side effects as
//! [`Command`] values for a [`CommandExecutor`](crate::CommandExecutor).
//!
//! # Examples
//!
//! ```
//! use tabula_core::{Command, State};
//!
//! #[derive(Clone, Default)]
//! struct Toggle {
//!     open: bool,
//! }
//!
//! enum ToggleMessage {
//!     Flip,
//! }
//!
//! impl State for Toggle {
//!     type Message = ToggleMessage;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         match msg {
//!             ToggleMessage::Flip => self.open = !self.open,
//!         }
//!         Command::None
//!     }
//! }
//!
//! let mut state = Toggle::default();
//! state.update(ToggleMessage::Flip);
//! assert!(state.open);
//! ```

use crate::error::TableError;
use crate::row::TableRow;
use std::fmt;

/// Application state trait.
pub trait State: Clone + Send + Sync {
    /// Message type for state updates
    type Message: Send;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Commands for side effects.
#[derive(Default)]
pub enum Command<M> {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command<M>>),
    /// Export rows as `data.csv`
    ExportCsv {
        /// Rows to export, in display order
        rows: Vec<TableRow>,
        /// Message produced once the export finished or failed
        on_complete: fn(Result<(), TableError>) -> M,
    },
}

impl<M> Command<M> {
    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Rows of an export command, if this is one.
    #[must_use]
    pub fn export_rows(&self) -> Option<&[TableRow]> {
        match self {
            Self::ExportCsv { rows, .. } => Some(rows),
            _ => None,
        }
    }
}

impl<M> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Command::None"),
            Self::Batch(cmds) => f.debug_tuple("Command::Batch").field(cmds).finish(),
            Self::ExportCsv { rows, .. } => f
                .debug_struct("Command::ExportCsv")
                .field("rows", &rows.len())
                .finish_non_exhaustive(),
        }
    }
}
