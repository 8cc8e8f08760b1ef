//! Modal file browser used for the Open and Save dialogs.
//!
//! A dialog is a request: it is created with a starting directory and a
//! filter, lives on the model while the user navigates, and resolves to
//! either a chosen path or a cancellation. Cancelling is not an error.

use std::fs;
use std::path::{Path, PathBuf};

/// A `label` + glob-style `pattern` pair like `("Text File", "*.txt")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

impl FileFilter {
    pub const TEXT: Self = Self {
        label: "Text File",
        pattern: "*.txt",
    };

    /// Patterns are `*` followed by a literal suffix; `*` alone matches all.
    pub fn matches(&self, name: &str) -> bool {
        match self.pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => name == self.pattern,
        }
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::TEXT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Open,
    Save,
}

/// Which part of a save dialog receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Filename,
    Entries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// What happened after the user pressed Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still browsing (entered a directory, or nothing to choose yet).
    Pending,
    /// The user picked this path.
    Chosen(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FileDialog {
    pub kind: DialogKind,
    pub filter: FileFilter,
    dir: PathBuf,
    entries: Vec<DialogEntry>,
    selected: usize,
    scroll_offset: usize,
    /// Typed file name (save dialogs only).
    pub filename: String,
    pub focus: DialogFocus,
    /// Set when the current directory could not be listed.
    pub error: Option<String>,
}

impl FileDialog {
    pub fn open(initial_dir: &Path, filter: FileFilter) -> Self {
        Self::new(DialogKind::Open, initial_dir, filter)
    }

    pub fn save(initial_dir: &Path, filter: FileFilter) -> Self {
        Self::new(DialogKind::Save, initial_dir, filter)
    }

    fn new(kind: DialogKind, initial_dir: &Path, filter: FileFilter) -> Self {
        let mut dialog = Self {
            kind,
            filter,
            dir: PathBuf::new(),
            entries: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            filename: String::new(),
            focus: match kind {
                DialogKind::Open => DialogFocus::Entries,
                DialogKind::Save => DialogFocus::Filename,
            },
            error: None,
        };
        dialog.change_dir(initial_dir);
        tracing::debug!(?kind, dir = %dialog.dir.display(), "dialog opened");
        dialog
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Open => "Choose a text document",
            DialogKind::Save => "Choose where to save",
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DialogEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn selected_entry(&self) -> Option<&DialogEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the entry at `idx` if it exists.
    pub fn select(&mut self, idx: usize) {
        if idx < self.entries.len() {
            self.selected = idx;
        }
    }

    /// Keep the selection inside a list window of `rows` rows.
    pub const fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + rows {
            self.scroll_offset = self.selected + 1 - rows;
        }
    }

    pub const fn toggle_focus(&mut self) {
        if matches!(self.kind, DialogKind::Save) {
            self.focus = match self.focus {
                DialogFocus::Filename => DialogFocus::Entries,
                DialogFocus::Entries => DialogFocus::Filename,
            };
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if self.accepts_text() {
            self.filename.push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if self.accepts_text() {
            self.filename.pop();
        } else {
            self.go_parent();
        }
    }

    pub fn accepts_text(&self) -> bool {
        self.kind == DialogKind::Save && self.focus == DialogFocus::Filename
    }

    pub fn go_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(&parent);
        }
    }

    /// Act on Enter: descend into directories, choose files or typed names.
    pub fn activate(&mut self) -> DialogOutcome {
        if self.accepts_text() {
            let name = self.filename.trim();
            if name.is_empty() {
                return DialogOutcome::Pending;
            }
            return DialogOutcome::Chosen(self.dir.join(name));
        }
        let Some(entry) = self.selected_entry().cloned() else {
            return DialogOutcome::Pending;
        };
        match entry.kind {
            EntryKind::Parent | EntryKind::Directory => {
                self.change_dir(&entry.path);
                DialogOutcome::Pending
            }
            EntryKind::File => {
                if self.kind == DialogKind::Save {
                    self.filename = entry.name;
                }
                DialogOutcome::Chosen(entry.path)
            }
        }
    }

    fn change_dir(&mut self, dir: &Path) {
        self.dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.selected = 0;
        self.scroll_offset = 0;
        match list_directory(&self.dir, &self.filter) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(dir = %self.dir.display(), %err, "could not list directory");
                self.entries = parent_entry(&self.dir).into_iter().collect();
                self.error = Some(err.to_string());
            }
        }
    }
}

fn parent_entry(dir: &Path) -> Option<DialogEntry> {
    dir.parent().map(|parent| DialogEntry {
        name: "..".to_string(),
        path: parent.to_path_buf(),
        kind: EntryKind::Parent,
    })
}

/// `..`, then visible sub-directories, then files accepted by `filter`.
pub fn list_directory(dir: &Path, filter: &FileFilter) -> std::io::Result<Vec<DialogEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(DialogEntry {
                name,
                path,
                kind: EntryKind::Directory,
            });
        } else if filter.matches(&name) {
            files.push(DialogEntry {
                name,
                path,
                kind: EntryKind::File,
            });
        }
    }
    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries: Vec<DialogEntry> = parent_entry(dir).into_iter().collect();
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("image.png"), "x").unwrap();
        fs::write(dir.path().join("sub").join("inner.txt"), "inner").unwrap();
        dir
    }

    fn names(dialog: &FileDialog) -> Vec<&str> {
        dialog.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_filter_matches_suffix() {
        let filter = FileFilter::TEXT;
        assert!(filter.matches("notes.txt"));
        assert!(!filter.matches("notes.TXT"));
        assert!(!filter.matches("notes.md"));
    }

    #[test]
    fn test_listing_orders_parent_dirs_then_filtered_files() {
        let dir = fixture();
        let dialog = FileDialog::open(dir.path(), FileFilter::TEXT);
        assert_eq!(names(&dialog), vec!["..", "sub", "a.txt", "b.txt"]);
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_enter_descends_into_directory() {
        let dir = fixture();
        let mut dialog = FileDialog::open(dir.path(), FileFilter::TEXT);
        dialog.select(1);
        assert_eq!(dialog.activate(), DialogOutcome::Pending);
        assert_eq!(names(&dialog), vec!["..", "inner.txt"]);
        assert_eq!(dialog.selected(), 0);
    }

    #[test]
    fn test_enter_on_parent_goes_up() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&dir.path().join("sub"), FileFilter::TEXT);
        assert_eq!(dialog.activate(), DialogOutcome::Pending);
        assert!(names(&dialog).contains(&"a.txt"));
    }

    #[test]
    fn test_open_chooses_file() {
        let dir = fixture();
        let mut dialog = FileDialog::open(dir.path(), FileFilter::TEXT);
        dialog.select(2);
        let DialogOutcome::Chosen(path) = dialog.activate() else {
            panic!("expected a chosen file");
        };
        assert_eq!(path.file_name().unwrap(), "a.txt");
    }

    #[test]
    fn test_open_dialog_ignores_typing() {
        let dir = fixture();
        let mut dialog = FileDialog::open(dir.path(), FileFilter::TEXT);
        dialog.push_char('x');
        assert!(dialog.filename.is_empty());
    }

    #[test]
    fn test_save_uses_typed_name_in_current_dir() {
        let dir = fixture();
        let mut dialog = FileDialog::save(dir.path(), FileFilter::TEXT);
        for ch in "report".chars() {
            dialog.push_char(ch);
        }
        let DialogOutcome::Chosen(path) = dialog.activate() else {
            panic!("expected a chosen path");
        };
        assert_eq!(path, dialog.dir().join("report"));
    }

    #[test]
    fn test_save_with_empty_name_stays_open() {
        let dir = fixture();
        let mut dialog = FileDialog::save(dir.path(), FileFilter::TEXT);
        dialog.push_char(' ');
        assert_eq!(dialog.activate(), DialogOutcome::Pending);
    }

    #[test]
    fn test_save_picking_existing_file_fills_name() {
        let dir = fixture();
        let mut dialog = FileDialog::save(dir.path(), FileFilter::TEXT);
        dialog.toggle_focus();
        dialog.select(3);
        let outcome = dialog.activate();
        assert_eq!(dialog.filename, "b.txt");
        assert!(matches!(outcome, DialogOutcome::Chosen(p) if p.ends_with("b.txt")));
    }

    #[test]
    fn test_backspace_in_list_goes_to_parent() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&dir.path().join("sub"), FileFilter::TEXT);
        dialog.pop_char();
        assert!(names(&dialog).contains(&"sub"));
    }

    #[test]
    fn test_missing_directory_reports_error() {
        let dir = tempdir().unwrap();
        let dialog = FileDialog::open(&dir.path().join("gone"), FileFilter::TEXT);
        assert!(dialog.error.is_some());
        assert_eq!(names(&dialog), vec![".."]);
    }

    #[test]
    fn test_ensure_visible_scrolls_window() {
        let dir = tempdir().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("f{i}.txt")), "").unwrap();
        }
        let mut dialog = FileDialog::open(dir.path(), FileFilter::TEXT);
        for _ in 0..6 {
            dialog.select_next();
        }
        dialog.ensure_visible(4);
        assert_eq!(dialog.scroll_offset(), 3);
        dialog.select(0);
        dialog.ensure_visible(4);
        assert_eq!(dialog.scroll_offset(), 0);
    }
}
