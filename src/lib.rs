// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. dialog::FileDialog)
    clippy::module_name_repetitions
)]

//! # txtedit
//!
//! A minimal terminal text editor with an unsaved-changes guard.
//!
//! The window offers three commands, Open, Save, and Close, over a single
//! text buffer. Opening over modified text or closing with modified text
//! asks first. "Modified" is decided by comparing a SHA-256 fingerprint of
//! the live text against the fingerprint taken at the last load or save, so
//! typing a character and deleting it again leaves the document clean.
//!
//! ## Architecture
//!
//! txtedit uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`config`]: Saved defaults and config file locations
//! - [`dialog`]: Open/save file browser
//! - [`editor`]: Rope-backed text buffer with a cursor
//! - [`guard`]: Content fingerprints and the confirm-before-discard rule
//! - [`session`]: Current file, load/save, and window title
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod dialog;
pub mod editor;
pub mod guard;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::TextBuffer;
    pub use crate::session::{EditorSession, FileError};
}
