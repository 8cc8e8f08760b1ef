//! Editor session: the path, fingerprint, and title of the open document.
//!
//! The session is the only place that commits a fingerprint. It happens in
//! exactly two spots, [`EditorSession::load`] and [`EditorSession::save`],
//! and only after the file operation itself succeeded.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::editor::TextBuffer;
use crate::guard::{self, DestructiveAction, Fingerprint, GuardDecision};

/// Title shown before any file has been loaded.
pub const APP_TITLE: &str = "Simple Text Editor";

/// Suffix every saved file ends with.
pub const TEXT_SUFFIX: &str = ".txt";

/// Failure reading or writing the document.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    current_path: PathBuf,
    /// Whether `current_path` names a file yet, rather than the default dir.
    has_file: bool,
    fingerprint: Fingerprint,
    app_title: String,
    title: String,
}

impl EditorSession {
    /// A session over an empty buffer. `default_dir` seeds the first dialog.
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self::with_app_title(default_dir, APP_TITLE)
    }

    pub fn with_app_title(default_dir: impl Into<PathBuf>, app_title: impl Into<String>) -> Self {
        let app_title = app_title.into();
        Self {
            current_path: default_dir.into(),
            has_file: false,
            fingerprint: guard::fingerprint(""),
            title: app_title.clone(),
            app_title,
        }
    }

    /// Last loaded or saved file, or the default directory before that.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Base name of the loaded or saved file, if there is one.
    pub fn file_name(&self) -> Option<String> {
        self.has_file.then(|| base_name(&self.current_path))
    }

    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether `text` differs from what was last loaded or saved.
    pub fn is_dirty(&self, text: &str) -> bool {
        guard::has_unsaved_changes(text, &self.fingerprint)
    }

    /// Consult the guard before replacing the buffer with another file.
    pub fn check_open(&self, text: &str) -> GuardDecision {
        guard::check(DestructiveAction::OpenFile, text, &self.fingerprint)
    }

    /// Consult the guard before exiting.
    pub fn check_close(&self, text: &str) -> GuardDecision {
        guard::check(DestructiveAction::Close, text, &self.fingerprint)
    }

    /// Directory that open and save dialogs start in.
    pub fn dialog_directory(&self) -> PathBuf {
        if self.current_path.is_dir() {
            return self.current_path.clone();
        }
        self.current_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Replace the buffer with the trimmed contents of `path`.
    ///
    /// On error nothing is touched: buffer, path, fingerprint, and title keep
    /// their previous values.
    pub fn load(&mut self, path: &Path, buffer: &mut TextBuffer) -> Result<(), FileError> {
        let raw = fs::read_to_string(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        buffer.replace_text(raw.trim());
        self.current_path = path.to_path_buf();
        self.has_file = true;
        self.fingerprint = guard::fingerprint(&buffer.text());
        self.title = format!("{} - {}", self.app_title, base_name(path));
        tracing::info!(path = %path.display(), "loaded file");
        Ok(())
    }

    /// Write the buffer verbatim to `chosen`, with `.txt` appended if needed.
    ///
    /// Returns the path actually written. On error the session keeps its
    /// pre-save path and fingerprint.
    pub fn save(&mut self, chosen: &Path, buffer: &TextBuffer) -> Result<PathBuf, FileError> {
        let path = normalize_txt_path(chosen);
        let contents = buffer.text();
        fs::write(&path, &contents).map_err(|source| FileError::Write {
            path: path.clone(),
            source,
        })?;
        self.fingerprint = guard::fingerprint(&contents);
        self.current_path.clone_from(&path);
        self.has_file = true;
        tracing::info!(path = %path.display(), bytes = contents.len(), "saved file");
        Ok(path)
    }
}

/// Append `.txt` unless the name already ends with exactly `.txt`.
///
/// The check is case-sensitive: `NOTES.TXT` becomes `NOTES.TXT.txt`.
pub fn normalize_txt_path(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(TEXT_SUFFIX) {
        return path.to_path_buf();
    }
    let mut raw = OsString::from(path.as_os_str());
    raw.push(TEXT_SUFFIX);
    PathBuf::from(raw)
}

fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session_in(dir: &Path) -> (EditorSession, TextBuffer) {
        (EditorSession::new(dir), TextBuffer::empty())
    }

    // --- Initial state ---

    #[test]
    fn test_new_session_is_clean_for_empty_buffer() {
        let session = EditorSession::new("/home/someone");
        assert!(!session.is_dirty(""));
        assert!(session.is_dirty("x"));
        assert_eq!(session.title(), APP_TITLE);
        assert_eq!(session.current_path(), Path::new("/home/someone"));
        assert_eq!(session.file_name(), None);
    }

    #[test]
    fn test_dialog_directory_is_default_dir_before_any_file() {
        let dir = tempdir().unwrap();
        let session = EditorSession::new(dir.path());
        assert_eq!(session.dialog_directory(), dir.path());
    }

    #[test]
    fn test_dialog_directory_is_parent_of_current_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a").unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        session.load(&path, &mut buf).unwrap();
        assert_eq!(session.dialog_directory(), dir.path());
    }

    // --- Path normalization ---

    #[test]
    fn test_normalize_appends_suffix() {
        assert_eq!(
            normalize_txt_path(Path::new("report")),
            PathBuf::from("report.txt")
        );
        assert_eq!(
            normalize_txt_path(Path::new("dir/notes.md")),
            PathBuf::from("dir/notes.md.txt")
        );
    }

    #[test]
    fn test_normalize_keeps_existing_suffix() {
        assert_eq!(
            normalize_txt_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt")
        );
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(
            normalize_txt_path(Path::new("NOTES.TXT")),
            PathBuf::from("NOTES.TXT.txt")
        );
    }

    // --- Load ---

    #[test]
    fn test_load_trims_and_commits_fingerprint() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hi.txt");
        fs::write(&path, "  hi  \n").unwrap();
        let (mut session, mut buf) = session_in(dir.path());

        session.load(&path, &mut buf).unwrap();

        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor().col, 2);
        assert!(!session.is_dirty(&buf.text()));
        assert_eq!(session.current_path(), path);
        assert_eq!(session.title(), "Simple Text Editor - hi.txt");
        assert_eq!(session.file_name().as_deref(), Some("hi.txt"));
    }

    #[test]
    fn test_load_failure_changes_nothing() {
        let dir = tempdir().unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("unsaved");

        let err = session
            .load(&dir.path().join("missing.txt"), &mut buf)
            .unwrap_err();

        assert!(matches!(err, FileError::Read { .. }));
        assert_eq!(buf.text(), "unsaved");
        assert_eq!(session.current_path(), dir.path());
        assert_eq!(session.title(), APP_TITLE);
        assert!(session.is_dirty("unsaved"));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        assert!(session.load(&path, &mut buf).is_err());
        assert!(buf.is_empty());
    }

    // --- Save ---

    #[test]
    fn test_save_writes_verbatim_and_normalizes() {
        let dir = tempdir().unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("  keep spaces \n");

        let written = session.save(&dir.path().join("report"), &buf).unwrap();

        assert_eq!(written, dir.path().join("report.txt"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "  keep spaces \n");
        assert_eq!(session.current_path(), written);
        assert!(!session.is_dirty(&buf.text()));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "old contents that are longer").unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("new");

        session.save(&path, &buf).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_failure_keeps_previous_state() {
        let dir = tempdir().unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("draft");
        let before = *session.fingerprint();

        let target = dir.path().join("no_such_dir").join("out");
        let err = session.save(&target, &buf).unwrap_err();

        assert!(matches!(err, FileError::Write { .. }));
        assert_eq!(*session.fingerprint(), before);
        assert_eq!(session.current_path(), dir.path());
        assert!(session.is_dirty("draft"));
    }

    #[test]
    fn test_save_does_not_retitle() {
        let dir = tempdir().unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("x");
        session.save(&dir.path().join("x"), &buf).unwrap();
        assert_eq!(session.title(), APP_TITLE);
    }

    #[test]
    fn test_save_then_load_round_trip_trims() {
        let dir = tempdir().unwrap();
        let (mut session, mut buf) = session_in(dir.path());
        buf.insert_str("\n\n  body text\t\n");
        let path = session.save(&dir.path().join("round"), &buf).unwrap();

        let mut reopened = TextBuffer::empty();
        session.load(&path, &mut reopened).unwrap();

        assert_eq!(reopened.text(), "body text");
    }

    // --- Guard decisions ---

    #[test]
    fn test_check_close_follows_fingerprint() {
        let session = EditorSession::new(".");
        assert_eq!(session.check_close(""), GuardDecision::Proceed);
        assert!(matches!(
            session.check_close("hello"),
            GuardDecision::Confirm(p) if p.action == DestructiveAction::Close
        ));
    }

    #[test]
    fn test_check_open_follows_fingerprint() {
        let session = EditorSession::new(".");
        assert!(matches!(
            session.check_open("hello"),
            GuardDecision::Confirm(p) if p.action == DestructiveAction::OpenFile
        ));
    }
}
