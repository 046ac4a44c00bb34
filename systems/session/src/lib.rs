#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Editing session that owns the document, its undo history and the tool state.
//!
//! Tool commands flow through [`EditorSession::execute`]: a
//! [`Command::Checkpoint`] snapshots the current document into the history and
//! every other command is applied to the document. File operations are refused
//! while a pointer button is held so a half-finished stroke never reaches disk.

mod config;

pub use config::{HistoryConfig, SessionConfig};

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;
use tilemap_editor_core::{Command, Event, PointerEvent, Resize, TileRef, Tool};
use tilemap_editor_document::{apply, query, Document};
use tilemap_editor_system_history::History;
use tilemap_editor_system_persistence::{binary, json, PersistError};
use tilemap_editor_system_tools::{ObjectTemplate, ResizeGate, ToolController};

/// Failures reported by session-level file operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Plain save requested before the document was ever saved or loaded.
    #[error("the document has no associated file; choose a path first")]
    NoPath,
    /// The request arrived while a pointer button was held.
    #[error("cannot run file operations while a pointer button is held")]
    PointerHeld,
    /// The underlying read or write failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Complete state of one editing session.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    history: History,
    tools: ToolController,
    path: Option<PathBuf>,
    modified: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl EditorSession {
    /// Starts a session on a fresh 1x1 document with no associated file.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        debug!(
            "starting editor session with history capacity {}",
            config.history.capacity
        );
        Self {
            document: Document::new(),
            history: History::with_capacity(config.history.capacity),
            tools: ToolController::new(),
            path: None,
            modified: false,
        }
    }

    /// Document being edited.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Undo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Number of undo steps currently available.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Tool state used for previews and hover feedback.
    #[must_use]
    pub const fn tools(&self) -> &ToolController {
        &self.tools
    }

    /// File the document was last saved to or loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the history changed since the last save or load.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Switches the active tool, discarding any drag in progress.
    pub fn select_tool(&mut self, tool: Tool) {
        debug!("selecting tool {}", tool.label());
        self.tools.select_tool(tool);
    }

    /// Switches the active tool by its palette index.
    ///
    /// Returns `false` for an index outside the palette.
    pub fn select_tool_index(&mut self, index: usize) -> bool {
        match Tool::from_index(index) {
            Some(tool) => {
                self.select_tool(tool);
                true
            }
            None => false,
        }
    }

    /// Chooses the tile painted by the tile tools.
    pub fn select_tile(&mut self, tile: TileRef) {
        self.tools.select_tile(tile);
    }

    /// Sets the type and parameter text stamped onto new objects.
    pub fn set_object_template(&mut self, kind: impl Into<String>, param: impl Into<String>) {
        self.tools
            .set_object_template(ObjectTemplate::new(kind, param));
    }

    /// Feeds a pointer event to the active tool and applies what it emits.
    pub fn pointer(&mut self, event: PointerEvent) -> Vec<Event> {
        let mut commands = Vec::new();
        self.tools
            .handle_pointer(event, query::view(&self.document), &mut commands);
        self.execute(commands)
    }

    /// Grows or shrinks the grid by one row or column.
    ///
    /// Returns `false` when the gate is closed or the grid is already at its
    /// minimum size; no undo step is recorded in that case.
    pub fn resize(&mut self, resize: Resize, gate: ResizeGate) -> bool {
        let mut commands = Vec::new();
        let accepted =
            self.tools
                .request_resize(resize, gate, query::view(&self.document), &mut commands);
        let _ = self.execute(commands);
        accepted
    }

    /// Applies a command batch, routing checkpoints into the history.
    pub fn execute(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            match command {
                Command::Checkpoint => {
                    self.history.snapshot(&self.document);
                    self.modified = true;
                }
                command => apply(&mut self.document, command, &mut events),
            }
        }
        for event in &events {
            debug!("document event: {event:?}");
        }
        events
    }

    /// Restores the most recent snapshot.
    ///
    /// Returns `false` when the history is empty or a pointer button is held.
    pub fn undo(&mut self) -> bool {
        if self.tools.is_pointer_held() {
            warn!("ignoring undo while a pointer button is held");
            return false;
        }
        match self.history.undo() {
            Some(document) => {
                self.document = document;
                self.modified = true;
                debug!("undo restored a {:?} document", self.document.dimensions());
                true
            }
            None => false,
        }
    }

    /// Saves the binary format to `path`, or to the current path when `None`.
    ///
    /// A successful save makes the target the current path.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        self.ensure_idle()?;
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.path.clone().ok_or(SessionError::NoPath)?,
        };

        binary::save(&target, &self.document).map_err(|error| report("save", error))?;

        info!("saved document to {}", target.display());
        self.path = Some(target.clone());
        self.modified = false;
        Ok(target)
    }

    /// Replaces the document with the one stored at `path`.
    ///
    /// On success the history is cleared and `path` becomes the current path.
    /// On failure the session is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let document = binary::load(path).map_err(|error| report("load", error))?;

        info!(
            "loaded {}x{} document from {}",
            document.columns(),
            document.rows(),
            path.display()
        );
        self.document = document;
        self.history.clear();
        self.tools.reset_interaction();
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Writes the JSON export to `path` without changing the current path.
    pub fn export_json(&mut self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        json::export(path, &self.document).map_err(|error| report("export", error))?;
        info!("exported document to {}", path.display());
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.tools.is_pointer_held() {
            warn!("ignoring file operation while a pointer button is held");
            return Err(SessionError::PointerHeld);
        }
        Ok(())
    }
}

fn report(operation: &str, error: PersistError) -> SessionError {
    warn!("{operation} failed: {error}");
    SessionError::Persist(error)
}
