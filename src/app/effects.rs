use std::io::stdout;

use crossterm::execute;
use crossterm::terminal::SetTitle;

use crate::app::{App, Model};

impl App {
    /// Work that must follow `update` but cannot live inside it: the queued
    /// disk access, then keeping the terminal title in step with the session.
    pub(super) fn handle_message_side_effects(model: &mut Model, shown_title: &mut String) {
        if model.apply_pending_file_op() {
            tracing::debug!(path = %model.session.current_path().display(), "file op applied");
        }
        if let Some(title) = title_change(model, shown_title) {
            if let Err(err) = execute!(stdout(), SetTitle(title)) {
                tracing::debug!(%err, "could not set terminal title");
            }
            shown_title.clear();
            shown_title.push_str(title);
        }
    }
}

/// The session title when it differs from what the terminal shows.
pub(super) fn title_change<'a>(model: &'a Model, shown: &str) -> Option<&'a str> {
    let title = model.session.title();
    (title != shown).then_some(title)
}
