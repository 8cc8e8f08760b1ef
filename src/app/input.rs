use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Motion;
use crate::ui::ScreenLayout;
use crate::ui::menu::{MenuItem, menu_item_at};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // The window-close signal reaches the guard from every mode.
        if ctrl && matches!(key.code, KeyCode::Char('q' | 'c')) {
            return Some(Message::Close);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::ConfirmAccept),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::ConfirmCancel),
                _ => None,
            };
        }

        if let Some(dialog) = &model.file_dialog {
            return match key.code {
                KeyCode::Esc => Some(Message::DialogCancel),
                KeyCode::Enter => Some(Message::DialogActivate),
                KeyCode::Up => Some(Message::DialogUp),
                KeyCode::Down => Some(Message::DialogDown),
                KeyCode::Tab | KeyCode::BackTab => Some(Message::DialogToggleFocus),
                KeyCode::Backspace => Some(Message::DialogBackspace),
                KeyCode::Char(ch) if !ctrl && dialog.accepts_text() => {
                    Some(Message::DialogInput(ch))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('o') if ctrl => Some(Message::Open),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Left if ctrl => Some(Message::Move(Motion::WordLeft)),
            KeyCode::Right if ctrl => Some(Message::Move(Motion::WordRight)),
            KeyCode::Home if ctrl => Some(Message::Move(Motion::BufferStart)),
            KeyCode::End if ctrl => Some(Message::Move(Motion::BufferEnd)),
            KeyCode::Left => Some(Message::Move(Motion::Left)),
            KeyCode::Right => Some(Message::Move(Motion::Right)),
            KeyCode::Up => Some(Message::Move(Motion::Up)),
            KeyCode::Down => Some(Message::Move(Motion::Down)),
            KeyCode::Home => Some(Message::Move(Motion::LineStart)),
            KeyCode::End => Some(Message::Move(Motion::LineEnd)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),

            KeyCode::Enter => Some(Message::Newline),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::Delete),
            KeyCode::Tab => Some(Message::InsertText(" ".repeat(crate::ui::TAB_WIDTH))),
            KeyCode::Char(ch) if !ctrl => Some(Message::InsertChar(ch)),
            _ => None,
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        if model.modal_active() || text.is_empty() {
            return None;
        }
        Some(Message::InsertText(normalize_newlines(text)))
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let click = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
        let screen = Rect::new(0, 0, model.width, model.height);

        if model.help_visible {
            return click.then_some(Message::HideHelp);
        }

        if model.confirm.is_some() {
            if !click {
                return None;
            }
            return crate::ui::confirm_button_at(screen, mouse.column, mouse.row).map(|yes| {
                if yes {
                    Message::ConfirmAccept
                } else {
                    Message::ConfirmCancel
                }
            });
        }

        if model.file_dialog.is_some() {
            return dialog_mouse(mouse, model, screen);
        }

        let layout = ScreenLayout::for_model(model);
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::Down(MouseButton::Left) if mouse.row == layout.menu.y => {
                menu_item_at(mouse.column).map(|item| match item {
                    MenuItem::Open => Message::Open,
                    MenuItem::Save => Message::Save,
                    MenuItem::Close => Message::Close,
                })
            }
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                text_position_at(model, layout.text, mouse.column, mouse.row)
                    .map(|(line, col)| Message::MoveTo(line, col))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Pasted text arrives with CRLF or, from xterm-style terminals, bare CR.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn dialog_mouse(mouse: MouseEvent, model: &Model, screen: Rect) -> Option<Message> {
    let dialog = model.file_dialog.as_ref()?;
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::DialogUp),
        MouseEventKind::ScrollDown => Some(Message::DialogDown),
        MouseEventKind::Down(MouseButton::Left) => {
            let list = crate::ui::file_dialog_list_area(screen);
            if !point_in_rect(mouse.column, mouse.row, list) {
                return None;
            }
            // An error line pushes the entries down one row.
            let first_row = list.y + u16::from(dialog.error.is_some());
            if mouse.row < first_row {
                return None;
            }
            let idx = dialog.scroll_offset() + usize::from(mouse.row - first_row);
            if idx >= dialog.entries().len() {
                return None;
            }
            // A second click on the selected entry opens it.
            if idx == dialog.selected() {
                Some(Message::DialogActivate)
            } else {
                Some(Message::DialogSelect(idx))
            }
        }
        _ => None,
    }
}

/// Buffer `(line, col)` under a click inside the text area.
fn text_position_at(model: &Model, area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    if !point_in_rect(column, row, area) {
        return None;
    }
    let buf = &model.buffer;
    let last_line = buf.line_count().saturating_sub(1);
    let line = (model.scroll_offset + usize::from(row - area.y)).min(last_line);
    let gutter = crate::ui::line_number_width(buf.line_count()) + 1;
    let x = usize::from(column.saturating_sub(area.x + gutter));
    let text = buf.line(line).unwrap_or_default();
    Some((line, crate::ui::char_col_at(&text, x)))
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
