use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::dialog::FileDialog;
use crate::editor::TextBuffer;
use crate::guard::ConfirmPrompt;
use crate::session::EditorSession;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// File work requested by `update` and carried out in the effects step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    Load(PathBuf),
    Save(PathBuf),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The text being edited
    pub buffer: TextBuffer,
    /// Path, fingerprint, and title of the open document
    pub session: EditorSession,
    /// First buffer line shown in the text area
    pub scroll_offset: usize,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// Yes/cancel question blocking a destructive action
    pub confirm: Option<ConfirmPrompt>,
    /// Open or save browser waiting for a choice
    pub file_dialog: Option<FileDialog>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pending_file_op: Option<FileOp>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("session", &self.session)
            .field("buffer", &self.buffer)
            .field("confirm", &self.confirm)
            .field("dialog_open", &self.file_dialog.is_some())
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(session: EditorSession, terminal_size: (u16, u16)) -> Self {
        Self {
            buffer: TextBuffer::empty(),
            session,
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            confirm: None,
            file_dialog: None,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            pending_file_op: None,
            toast: None,
            should_quit: false,
        }
    }

    /// Recomputed from the live text every time; there is no dirty flag.
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty(&self.buffer.text())
    }

    /// True while a prompt, dialog, or help overlay owns the keyboard.
    pub const fn modal_active(&self) -> bool {
        self.confirm.is_some() || self.file_dialog.is_some() || self.help_visible
    }

    /// Rows available to buffer text.
    pub fn text_area_height(&self) -> usize {
        crate::ui::ScreenLayout::for_model(self).text.height as usize
    }

    pub fn pending_file_op(&self) -> Option<&FileOp> {
        self.pending_file_op.as_ref()
    }

    pub(super) fn queue_file_op(&mut self, op: FileOp) {
        tracing::debug!(?op, "file operation queued");
        self.pending_file_op = Some(op);
    }

    /// Run the queued load or save, reporting the outcome as a toast.
    ///
    /// Returns `false` when nothing was queued.
    pub fn apply_pending_file_op(&mut self) -> bool {
        let Some(op) = self.pending_file_op.take() else {
            return false;
        };
        match op {
            FileOp::Load(path) => match self.session.load(&path, &mut self.buffer) {
                Ok(()) => {
                    self.ensure_cursor_visible();
                    self.show_toast(ToastLevel::Info, format!("Opened {}", display_name(&path)));
                }
                Err(err) => {
                    tracing::warn!(%err, "open failed");
                    self.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                }
            },
            FileOp::Save(path) => match self.session.save(&path, &self.buffer) {
                Ok(written) => {
                    self.show_toast(ToastLevel::Info, format!("Saved {}", written.display()));
                }
                Err(err) => {
                    tracing::warn!(%err, "save failed");
                    self.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                }
            },
        }
        true
    }

    /// Scroll so the cursor line is inside the text area.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.buffer.cursor().line;
        let visible = self.text_area_height();
        if visible == 0 || cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + visible {
            self.scroll_offset = cursor_line + 1 - visible;
        }
    }

    pub(super) fn clamp_scroll(&mut self) {
        let max = self.buffer.line_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

impl Default for Model {
    fn default() -> Self {
        Self::new(EditorSession::new("."), (80, 24))
    }
}
