use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::dialog::{DialogFocus, DialogKind, EntryKind, FileDialog};
use crate::guard::ConfirmPrompt;

// --- Confirmation prompt ---

const CONFIRM_WIDTH: u16 = 50;
const CONFIRM_HEIGHT: u16 = 7;
const YES_LABEL: &str = "[ Yes ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

pub fn confirm_popup_rect(area: Rect) -> Rect {
    centered_popup_rect(CONFIRM_WIDTH, CONFIRM_HEIGHT, area)
}

/// Yes and Cancel button rectangles on the bottom content row of `popup`.
fn confirm_buttons(popup: Rect) -> (Rect, Rect) {
    #[allow(clippy::cast_possible_truncation)]
    let (yes_w, cancel_w) = (YES_LABEL.len() as u16, CANCEL_LABEL.len() as u16);
    let gap = 3;
    let total = yes_w + gap + cancel_w;
    let x = popup.x + popup.width.saturating_sub(total) / 2;
    let y = popup.y + popup.height.saturating_sub(2);
    (
        Rect::new(x, y, yes_w, 1),
        Rect::new(x + yes_w + gap, y, cancel_w, 1),
    )
}

/// `Some(true)` for Yes, `Some(false)` for Cancel or anywhere outside the
/// popup, `None` for a click inside the popup that hits no button.
pub fn confirm_button_at(area: Rect, column: u16, row: u16) -> Option<bool> {
    let popup = confirm_popup_rect(area);
    let point = Position::new(column, row);
    if !popup.contains(point) {
        return Some(false);
    }
    let (yes, cancel) = confirm_buttons(popup);
    if yes.contains(point) {
        Some(true)
    } else if cancel.contains(point) {
        Some(false)
    } else {
        None
    }
}

pub fn render_confirm_overlay(prompt: &ConfirmPrompt, frame: &mut Frame, area: Rect) {
    let popup = confirm_popup_rect(area);
    let block = Block::default()
        .title(prompt.title)
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(prompt.message).wrap(Wrap { trim: true }),
        Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(2),
            ..inner
        },
    );

    let (yes, cancel) = confirm_buttons(popup);
    let button = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(YES_LABEL).style(button), yes);
    frame.render_widget(Paragraph::new(CANCEL_LABEL).style(button), cancel);
}

// --- File dialog ---

pub fn file_dialog_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).max(40);
    let height = area.height.saturating_sub(4).max(10);
    centered_popup_rect(width, height, area)
}

/// Inner rows of the dialog: directory, filter, list..., filename, hint.
fn file_dialog_rows(popup: Rect) -> [Rect; 5] {
    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );
    let row = |offset: u16| Rect {
        y: inner.y + offset,
        height: 1,
        ..inner
    };
    let list = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(4),
        ..inner
    };
    let bottom = inner.height.saturating_sub(2);
    [row(0), row(1), list, row(bottom), row(bottom + 1)]
}

pub fn file_dialog_list_area(area: Rect) -> Rect {
    file_dialog_rows(file_dialog_rect(area))[2]
}

/// How many entries fit in the dialog list on a `width`x`height` screen.
pub fn file_dialog_list_rows(width: u16, height: u16) -> usize {
    file_dialog_list_area(Rect::new(0, 0, width, height)).height as usize
}

pub fn render_file_dialog(dialog: &FileDialog, frame: &mut Frame, area: Rect) {
    let popup = file_dialog_rect(area);
    let [dir_row, filter_row, list_area, name_row, hint_row] = file_dialog_rows(popup);

    let block = Block::default()
        .title(dialog.title())
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let dim = Style::default().fg(Color::Indexed(245));
    frame.render_widget(
        Paragraph::new(format!(" Look in: {}", dialog.dir().display())),
        dir_row,
    );
    frame.render_widget(
        Paragraph::new(format!(
            " Files of type: {} ({})",
            dialog.filter.label, dialog.filter.pattern
        ))
        .style(dim),
        filter_row,
    );

    let list_focused = dialog.focus == DialogFocus::Entries;
    let mut lines: Vec<Line> = Vec::new();
    if let Some(err) = &dialog.error {
        lines.push(Line::styled(
            format!("   {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    let rows = (list_area.height as usize).saturating_sub(lines.len());
    for (idx, entry) in dialog
        .entries()
        .iter()
        .enumerate()
        .skip(dialog.scroll_offset())
        .take(rows)
    {
        let label = match entry.kind {
            EntryKind::Parent => "../".to_string(),
            EntryKind::Directory => format!("{}/", entry.name),
            EntryKind::File => entry.name.clone(),
        };
        let selected = idx == dialog.selected();
        let marker = if selected { " > " } else { "   " };
        let mut style = match entry.kind {
            EntryKind::File => Style::default(),
            EntryKind::Parent | EntryKind::Directory => Style::default().fg(Color::Cyan),
        };
        if selected {
            style = if list_focused {
                style.bg(Color::Blue).fg(Color::White)
            } else {
                style.add_modifier(Modifier::UNDERLINED)
            };
        }
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(label, style),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), list_area);

    let hint = match dialog.kind {
        DialogKind::Open => {
            " Enter: open/enter dir  Backspace: parent  Esc: cancel".to_string()
        }
        DialogKind::Save => {
            let name_style = if list_focused {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(" File name: "),
                    Span::styled(format!("{}_", dialog.filename), name_style),
                ])),
                name_row,
            );
            " Enter: save  Tab: switch field  Esc: cancel".to_string()
        }
    };
    frame.render_widget(Paragraph::new(hint).style(dim), hint_row);
}

// --- Help ---

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::styled("File", section_style),
        Line::raw("  Ctrl-o              Open a .txt file"),
        Line::raw("  Ctrl-s              Save as .txt"),
        Line::raw("  Ctrl-q / Ctrl-c     Close"),
        Line::raw(""),
        Line::styled("Editing", section_style),
        Line::raw("  Arrows, Home/End    Move cursor"),
        Line::raw("  Ctrl+Left/Right     Word movement"),
        Line::raw("  Ctrl+Home/End       Buffer start / end"),
        Line::raw("  PageUp/PageDown     Move one screen"),
        Line::raw("  Tab                 Insert four spaces"),
        Line::raw("  Mouse click/wheel   Place cursor / scroll"),
        Line::raw(""),
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
        Line::raw(""),
        Line::styled("Any key closes", Style::default().fg(Color::Indexed(245))),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
