use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;

use super::{TAB_WIDTH, menu, overlays, status};

/// Row split of the full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu: Rect,
    pub text: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, toast_active: bool) -> Self {
        let footer_rows = 1 + u16::from(toast_active);
        let menu = Rect { height: area.height.min(1), ..area };
        let text = Rect {
            y: area.y + menu.height,
            height: area.height.saturating_sub(menu.height + footer_rows),
            ..area
        };
        let status = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        let toast = toast_active.then(|| Rect {
            y: area.y + area.height.saturating_sub(2),
            height: 1,
            ..area
        });
        Self {
            menu,
            text,
            toast,
            status,
        }
    }

    pub fn for_model(model: &Model) -> Self {
        Self::new(
            Rect::new(0, 0, model.width, model.height),
            model.active_toast().is_some(),
        )
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = ScreenLayout::new(area, model.active_toast().is_some());

    menu::render_menu_bar(model, frame, layout.menu);
    let cursor = render_text(model, frame, layout.text);
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
        return;
    }
    // A close prompt can sit on top of an open dialog.
    if let Some(dialog) = &model.file_dialog {
        overlays::render_file_dialog(dialog, frame, area);
    }
    if let Some(prompt) = &model.confirm {
        overlays::render_confirm_overlay(prompt, frame, area);
    }
    if !model.modal_active()
        && let Some(position) = cursor
    {
        frame.set_cursor_position(position);
    }
}

/// Draw the visible buffer lines; returns where the terminal cursor goes.
fn render_text(model: &Model, frame: &mut Frame, area: Rect) -> Option<Position> {
    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter = line_number_width(total_lines) + 1;

    let start = model.scroll_offset;
    let end = (start + area.height as usize).min(total_lines);
    let cursor = buf.cursor();

    let content: Vec<Line> = (start..end)
        .map(|idx| {
            let text = buf.line(idx).unwrap_or_default();
            let number = format!("{:>width$} ", idx + 1, width = (gutter - 1) as usize);
            Line::from(vec![
                Span::styled(number, Style::default().fg(Color::DarkGray)),
                Span::raw(expand_tabs(&text)),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);

    if cursor.line < start || cursor.line >= end {
        return None;
    }
    let line = buf.line(cursor.line).unwrap_or_default();
    let prefix: String = line.chars().take(cursor.col).collect();
    let x = usize::from(area.x) + usize::from(gutter) + display_width(&prefix);
    let max_x = usize::from(area.right().saturating_sub(1));
    // both values were derived from u16 coordinates
    #[allow(clippy::cast_possible_truncation)]
    let position = Position::new(
        x.min(max_x) as u16,
        area.y + (cursor.line - start) as u16,
    );
    Some(position)
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Terminal columns `text` occupies, with tabs expanded.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// The char column under display column `x` of `line`.
pub fn char_col_at(line: &str, x: usize) -> usize {
    let mut used = 0;
    for (col, ch) in line.chars().enumerate() {
        let w = char_width(ch);
        if used + w > x {
            return col;
        }
        used += w;
    }
    line.chars().count()
}

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
