use crate::app::Model;
use crate::app::model::FileOp;
use crate::dialog::{DialogKind, DialogOutcome, FileDialog, FileFilter};
use crate::editor::Motion;
use crate::guard::{DestructiveAction, GuardDecision};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted or expanded text at the cursor
    InsertText(String),
    /// Break the line at the cursor (Enter)
    Newline,
    /// Delete character before cursor (Backspace)
    Backspace,
    /// Delete character at cursor (Delete)
    Delete,
    /// Move the cursor
    Move(Motion),
    /// Move cursor to absolute position (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    /// Scroll text area up by n lines
    ScrollUp(usize),
    /// Scroll text area down by n lines
    ScrollDown(usize),
    /// Move the cursor one screen up
    PageUp,
    /// Move the cursor one screen down
    PageDown,

    // Menu
    /// Replace the buffer with a file chosen in an open dialog
    Open,
    /// Write the buffer to a file chosen in a save dialog
    Save,
    /// Menu Close or the window-close signal
    Close,

    // Confirmation prompt
    /// User answered yes
    ConfirmAccept,
    /// User answered cancel or dismissed the prompt
    ConfirmCancel,

    // File dialog
    DialogUp,
    DialogDown,
    /// Select entry by index (mouse)
    DialogSelect(usize),
    /// Enter: descend, choose a file, or accept the typed name
    DialogActivate,
    /// Type into the filename field
    DialogInput(char),
    /// Backspace: edit the filename or go to the parent directory
    DialogBackspace,
    /// Switch between filename field and listing (save only)
    DialogToggleFocus,
    /// Close the dialog without choosing
    DialogCancel,

    // Help
    ToggleHelp,
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
}

impl Message {
    const fn edits_buffer(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::Newline
                | Self::Backspace
                | Self::Delete
                | Self::Move(_)
                | Self::MoveTo(..)
                | Self::ScrollUp(_)
                | Self::ScrollDown(_)
                | Self::PageUp
                | Self::PageDown
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// File reads and writes never happen here: a chosen path is queued as a
/// [`FileOp`] and carried out by [`Model::apply_pending_file_op`].
pub fn update(mut model: Model, msg: Message) -> Model {
    // Overlays are modal: nothing reaches the buffer behind them.
    if model.modal_active() && msg.edits_buffer() {
        return model;
    }

    match msg {
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.ensure_cursor_visible();
        }
        Message::InsertText(text) => {
            model.buffer.insert_str(&text);
            model.ensure_cursor_visible();
        }
        Message::Newline => {
            model.buffer.newline();
            model.ensure_cursor_visible();
        }
        Message::Backspace => {
            model.buffer.backspace();
            model.ensure_cursor_visible();
        }
        Message::Delete => {
            model.buffer.delete();
        }
        Message::Move(motion) => {
            model.buffer.apply_motion(motion);
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.buffer.set_cursor(line, col);
            model.ensure_cursor_visible();
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            model.scroll_offset += n;
            model.clamp_scroll();
        }
        Message::PageUp => page(&mut model, Motion::Up),
        Message::PageDown => page(&mut model, Motion::Down),

        Message::Open => {
            let decision = model.session.check_open(&model.buffer.text());
            request_destructive(&mut model, decision, DestructiveAction::OpenFile);
        }
        Message::Save => {
            model.confirm = None;
            model.help_visible = false;
            start_dialog(&mut model, DialogKind::Save);
        }
        Message::Close => {
            model.help_visible = false;
            model.confirm = None;
            let decision = model.session.check_close(&model.buffer.text());
            request_destructive(&mut model, decision, DestructiveAction::Close);
        }

        Message::ConfirmAccept => {
            if let Some(prompt) = model.confirm.take() {
                tracing::debug!(action = ?prompt.action, "destructive action confirmed");
                perform_destructive(&mut model, prompt.action);
            }
        }
        Message::ConfirmCancel => {
            if let Some(prompt) = model.confirm.take() {
                tracing::debug!(action = ?prompt.action, "destructive action cancelled");
            }
        }

        Message::DialogUp => {
            with_dialog(&mut model, FileDialog::select_prev);
        }
        Message::DialogDown => {
            with_dialog(&mut model, FileDialog::select_next);
        }
        Message::DialogSelect(idx) => {
            with_dialog(&mut model, |d| d.select(idx));
        }
        Message::DialogInput(ch) => {
            with_dialog(&mut model, |d| d.push_char(ch));
        }
        Message::DialogBackspace => {
            with_dialog(&mut model, FileDialog::pop_char);
        }
        Message::DialogToggleFocus => {
            with_dialog(&mut model, FileDialog::toggle_focus);
        }
        Message::DialogActivate => {
            let outcome = model.file_dialog.as_mut().map(FileDialog::activate);
            match outcome {
                Some(DialogOutcome::Chosen(path)) => {
                    if let Some(dialog) = model.file_dialog.take() {
                        let op = match dialog.kind {
                            DialogKind::Open => FileOp::Load(path),
                            DialogKind::Save => FileOp::Save(path),
                        };
                        model.queue_file_op(op);
                    }
                }
                Some(DialogOutcome::Pending) => {
                    with_dialog(&mut model, |_| {});
                }
                None => {}
            }
        }
        Message::DialogCancel => {
            if model.file_dialog.take().is_some() {
                tracing::debug!("dialog cancelled");
            }
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
            with_dialog(&mut model, |_| {});
        }
    }

    model
}

/// Move the cursor a full text-area height.
fn page(model: &mut Model, motion: Motion) {
    for _ in 0..model.text_area_height().max(1) {
        model.buffer.apply_motion(motion);
    }
    model.ensure_cursor_visible();
}

/// Perform `action` now, or park it behind a confirmation prompt.
fn request_destructive(model: &mut Model, decision: GuardDecision, action: DestructiveAction) {
    match decision {
        GuardDecision::Proceed => perform_destructive(model, action),
        GuardDecision::Confirm(prompt) => {
            tracing::debug!(?action, "unsaved changes, asking first");
            model.confirm = Some(prompt);
        }
    }
}

fn perform_destructive(model: &mut Model, action: DestructiveAction) {
    match action {
        DestructiveAction::OpenFile => start_dialog(model, DialogKind::Open),
        DestructiveAction::Close => {
            model.file_dialog = None;
            model.should_quit = true;
        }
    }
}

fn start_dialog(model: &mut Model, kind: DialogKind) {
    let dir = model.session.dialog_directory();
    let dialog = match kind {
        DialogKind::Open => FileDialog::open(&dir, FileFilter::TEXT),
        DialogKind::Save => FileDialog::save(&dir, FileFilter::TEXT),
    };
    model.file_dialog = Some(dialog);
}

/// Apply `f` to the open dialog and keep its selection on screen.
fn with_dialog(model: &mut Model, f: impl FnOnce(&mut FileDialog)) {
    let rows = crate::ui::file_dialog_list_rows(model.width, model.height);
    if let Some(dialog) = model.file_dialog.as_mut() {
        f(dialog);
        dialog.ensure_visible(rows);
    }
}
