use ropey::{Rope, RopeSlice};

/// Line/column location of the cursor. Both are zero-based; `col` counts
/// chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Cursor motions understood by [`TextBuffer::apply_motion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
}

/// Rope-backed text with a single insertion point.
///
/// The buffer knows nothing about files or saved state; whether its
/// contents differ from disk is answered by fingerprinting [`Self::text`].
pub struct TextBuffer {
    rope: Rope,
    /// Insertion point as a char index into the rope.
    cursor: usize,
    /// Column to aim for while moving vertically across short lines.
    goal_col: Option<usize>,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            goal_col: None,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full contents, exactly as typed.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line contents without the trailing line break.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(idx);
        let len = slice.len_chars() - break_len(slice);
        Some(slice.slice(..len).to_string())
    }

    /// Length of a line in chars, line break excluded.
    pub fn line_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(idx);
        slice.len_chars() - break_len(slice)
    }

    pub fn cursor(&self) -> Position {
        let line = self.rope.char_to_line(self.cursor);
        let col = self.cursor - self.rope.line_to_char(line);
        Position {
            line,
            col: col.min(self.line_len(line)),
        }
    }

    /// Replace everything and park the cursor after the last char.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.rope.len_chars();
        self.goal_col = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.leave_crlf();
        self.goal_col = None;
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.rope.insert(self.cursor, s);
        self.cursor += s.chars().count();
        self.leave_crlf();
        self.goal_col = None;
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the char before the cursor. Returns `false` at buffer start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        // Treat a CRLF pair as one break.
        let start = if self.cursor >= 2
            && self.rope.char(self.cursor - 1) == '\n'
            && self.rope.char(self.cursor - 2) == '\r'
        {
            self.cursor - 2
        } else {
            self.cursor - 1
        };
        self.rope.remove(start..self.cursor);
        self.cursor = start;
        self.leave_crlf();
        self.goal_col = None;
        true
    }

    /// Delete the char under the cursor. Returns `false` at buffer end.
    pub fn delete(&mut self) -> bool {
        let len = self.rope.len_chars();
        if self.cursor >= len {
            return false;
        }
        let end = if self.rope.char(self.cursor) == '\r'
            && self.cursor + 1 < len
            && self.rope.char(self.cursor + 1) == '\n'
        {
            self.cursor + 2
        } else {
            self.cursor + 1
        };
        self.rope.remove(self.cursor..end);
        self.leave_crlf();
        self.goal_col = None;
        true
    }

    pub fn apply_motion(&mut self, motion: Motion) {
        let pos = self.cursor();
        match motion {
            Motion::Up | Motion::Down => {
                let goal = *self.goal_col.get_or_insert(pos.col);
                let target = if motion == Motion::Up {
                    pos.line.checked_sub(1)
                } else {
                    Some(pos.line + 1).filter(|l| *l < self.line_count())
                };
                if let Some(line) = target {
                    self.cursor = self.char_index(line, goal);
                }
                return;
            }
            Motion::Left => {
                if self.cursor > 0 {
                    self.cursor = self.char_index_before_break(pos, self.cursor - 1);
                }
            }
            Motion::Right => {
                if pos.col < self.line_len(pos.line) {
                    self.cursor += 1;
                } else if pos.line + 1 < self.line_count() {
                    self.cursor = self.rope.line_to_char(pos.line + 1);
                }
            }
            Motion::LineStart => self.cursor = self.rope.line_to_char(pos.line),
            Motion::LineEnd => self.cursor = self.char_index(pos.line, usize::MAX),
            Motion::WordLeft => self.word_left(pos),
            Motion::WordRight => self.word_right(pos),
            Motion::BufferStart => self.cursor = 0,
            Motion::BufferEnd => self.cursor = self.rope.len_chars(),
        }
        self.goal_col = None;
    }

    /// Place the cursor at `line`/`col`, clamped into the text.
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.cursor = self.char_index(line, col);
        self.goal_col = None;
    }

    /// An edit can join a CR and an LF around the cursor; step past the LF
    /// so the cursor never rests inside a CRLF pair.
    fn leave_crlf(&mut self) {
        if self.cursor > 0
            && self.cursor < self.rope.len_chars()
            && self.rope.char(self.cursor - 1) == '\r'
            && self.rope.char(self.cursor) == '\n'
        {
            self.cursor += 1;
        }
    }

    fn char_index(&self, line: usize, col: usize) -> usize {
        self.rope.line_to_char(line) + col.min(self.line_len(line))
    }

    /// Moving left off column 0 lands at the end of the previous line, not
    /// between a CR and its LF.
    fn char_index_before_break(&self, pos: Position, candidate: usize) -> usize {
        if pos.col == 0 && pos.line > 0 {
            self.char_index(pos.line - 1, usize::MAX)
        } else {
            candidate
        }
    }

    fn word_left(&mut self, pos: Position) {
        if pos.col == 0 {
            if pos.line > 0 {
                self.cursor = self.char_index(pos.line - 1, usize::MAX);
            }
            return;
        }
        let chars: Vec<char> = self.line(pos.line).unwrap_or_default().chars().collect();
        let mut col = pos.col.min(chars.len());
        while col > 0 && !is_word_char(chars[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(chars[col - 1]) {
            col -= 1;
        }
        self.cursor = self.char_index(pos.line, col);
    }

    fn word_right(&mut self, pos: Position) {
        let chars: Vec<char> = self.line(pos.line).unwrap_or_default().chars().collect();
        if pos.col >= chars.len() {
            if pos.line + 1 < self.line_count() {
                self.cursor = self.rope.line_to_char(pos.line + 1);
            }
            return;
        }
        let mut col = pos.col;
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        self.cursor = self.char_index(pos.line, col);
    }
}

/// Chars ropey treats as line breaks (CRLF counts as one break).
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Chars taken by the break sequence ending `line`.
fn break_len(line: RopeSlice) -> usize {
    let len = line.len_chars();
    if len == 0 || !is_line_break(line.char(len - 1)) {
        return 0;
    }
    if len >= 2 && line.char(len - 1) == '\n' && line.char(len - 2) == '\r' {
        2
    } else {
        1
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("cursor", &self.cursor())
            .finish_non_exhaustive()
    }
}
