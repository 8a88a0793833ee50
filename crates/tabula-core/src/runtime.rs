//! Command runtime for executing side effects.
//!
//! Saving files is a host capability behind [`FileSaver`]; the browser build
//! downloads through an anchor element, native builds write to disk and
//! tests record saves in a [`MemoryFileSaver`].

use crate::csv::to_csv;
use crate::error::{SaveError, TableError};
use crate::row::TableRow;
use crate::state::Command;
use std::sync::{Arc, Mutex};

/// MIME type of exported CSV files.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// File name of exported CSV files.
pub const EXPORT_FILENAME: &str = "data.csv";

/// Host capability for saving a file.
pub trait FileSaver: Send + Sync {
    /// Save `content` under `filename` with the given MIME type.
    fn save(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError>;
}

impl<S: FileSaver + ?Sized> FileSaver for Arc<S> {
    fn save(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError> {
        (**self).save(content, filename, mime_type)
    }
}

/// A file handed to a [`MemoryFileSaver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// File content
    pub content: Vec<u8>,
    /// File name
    pub filename: String,
    /// MIME type
    pub mime_type: String,
}

impl SavedFile {
    /// Content as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// In-memory file saver for testing.
#[derive(Debug, Default)]
pub struct MemoryFileSaver {
    saved: Mutex<Vec<SavedFile>>,
    reject: Option<String>,
}

impl MemoryFileSaver {
    /// Create a new empty saver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a saver that refuses every save with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            saved: Mutex::default(),
            reject: Some(reason.into()),
        }
    }

    /// Every file saved so far, oldest first.
    #[must_use]
    pub fn saved(&self) -> Vec<SavedFile> {
        self.saved
            .lock()
            .expect("MemoryFileSaver mutex poisoned")
            .clone()
    }

    /// The most recent save.
    #[must_use]
    pub fn last(&self) -> Option<SavedFile> {
        self.saved
            .lock()
            .expect("MemoryFileSaver mutex poisoned")
            .last()
            .cloned()
    }

    /// Get the number of saves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saved
            .lock()
            .expect("MemoryFileSaver mutex poisoned")
            .len()
    }

    /// Check if nothing was saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget recorded saves.
    pub fn clear(&self) {
        self.saved
            .lock()
            .expect("MemoryFileSaver mutex poisoned")
            .clear();
    }
}

impl FileSaver for MemoryFileSaver {
    fn save(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError> {
        if let Some(reason) = &self.reject {
            return Err(SaveError::Rejected(reason.clone()));
        }
        self.saved
            .lock()
            .expect("MemoryFileSaver mutex poisoned")
            .push(SavedFile {
                content: content.to_vec(),
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
            });
        Ok(())
    }
}

/// Convert `rows` to CSV and save them as `data.csv`.
///
/// Nothing is saved when conversion fails.
pub fn export_csv<S: FileSaver + ?Sized>(rows: &[TableRow], saver: &S) -> Result<(), TableError> {
    let csv = to_csv(rows)?;
    tracing::debug!(rows = rows.len(), bytes = csv.len(), "exporting CSV");
    saver.save(csv.as_bytes(), EXPORT_FILENAME, CSV_MIME_TYPE)?;
    Ok(())
}

/// Result of command execution.
#[derive(Debug)]
pub enum ExecutionResult<M> {
    /// No result (`Command::None` or non-message-producing commands)
    None,
    /// A single message was produced
    Message(M),
    /// Multiple messages were produced
    Messages(Vec<M>),
}

impl<M> ExecutionResult<M> {
    /// Check if the result has no messages.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if there are messages.
    #[must_use]
    pub const fn has_messages(&self) -> bool {
        matches!(self, Self::Message(_) | Self::Messages(_))
    }

    /// Get messages as a vector.
    pub fn into_messages(self) -> Vec<M> {
        match self {
            Self::None => vec![],
            Self::Message(m) => vec![m],
            Self::Messages(ms) => ms,
        }
    }
}

/// Executes commands against a file saver.
#[derive(Debug)]
pub struct CommandExecutor<S> {
    saver: Arc<S>,
}

impl<S: FileSaver> CommandExecutor<S> {
    /// Create a new command executor.
    pub fn new(saver: S) -> Self {
        Self {
            saver: Arc::new(saver),
        }
    }

    /// Create an executor sharing an existing saver.
    pub const fn shared(saver: Arc<S>) -> Self {
        Self { saver }
    }

    /// Execute a command.
    ///
    /// Failures are reported through the command's completion message.
    pub fn execute<M: Send>(&self, command: Command<M>) -> ExecutionResult<M> {
        match command {
            Command::None => ExecutionResult::None,
            Command::Batch(commands) => {
                let mut messages = Vec::new();
                for cmd in commands {
                    messages.extend(self.execute(cmd).into_messages());
                }
                if messages.is_empty() {
                    ExecutionResult::None
                } else {
                    ExecutionResult::Messages(messages)
                }
            }
            Command::ExportCsv { rows, on_complete } => {
                let result = export_csv(&rows, &*self.saver);
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "CSV export failed");
                }
                ExecutionResult::Message(on_complete(result))
            }
        }
    }

    /// Get the saver.
    pub fn saver(&self) -> &S {
        &self.saver
    }
}

/// Create an executor that records saves in memory.
#[must_use]
pub fn memory_executor() -> CommandExecutor<MemoryFileSaver> {
    CommandExecutor::new(MemoryFileSaver::new())
}
