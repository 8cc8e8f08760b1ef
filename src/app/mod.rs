//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Disk access never happens inside `update`; it queues a [`FileOp`] that
//! the effects step carries out before the next frame.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{FileOp, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    default_dir: PathBuf,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application whose first dialog opens in `default_dir`.
    pub fn new(default_dir: PathBuf) -> Self {
        Self {
            default_dir,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
