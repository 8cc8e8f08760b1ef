//! Menu bar: the three commands, the window title, and click targets.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Open,
    Save,
    Close,
}

impl MenuItem {
    pub const ALL: [Self; 3] = [Self::Open, Self::Save, Self::Close];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Save => "Save",
            Self::Close => "Close",
        }
    }

    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Open => "^O",
            Self::Save => "^S",
            Self::Close => "^Q",
        }
    }
}

/// Left margin before the first item.
const MENU_START: u16 = 1;

/// Column span `[start, end)` of each item, padded by one space each side.
pub fn menu_spans() -> impl Iterator<Item = (MenuItem, u16, u16)> {
    let mut x = MENU_START;
    MenuItem::ALL.into_iter().map(move |item| {
        // labels are short ASCII
        #[allow(clippy::cast_possible_truncation)]
        let width = item.label().len() as u16 + 2;
        let span = (item, x, x + width);
        x += width + 1;
        span
    })
}

/// The item under a click at `column` on the menu row.
pub fn menu_item_at(column: u16) -> Option<MenuItem> {
    menu_spans()
        .find(|(_, start, end)| column >= *start && column < *end)
        .map(|(item, _, _)| item)
}

pub fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = Style::default().bg(Color::Gray).fg(Color::Black);
    let item_style = bar_style.add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(" ".repeat(MENU_START as usize), bar_style)];
    for (item, _, _) in menu_spans() {
        spans.push(Span::styled(format!(" {} ", item.label()), item_style));
        spans.push(Span::styled(" ", bar_style));
    }
    spans.push(Span::styled("\u{2502} ", bar_style));
    spans.push(Span::styled(model.session.title().to_string(), bar_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);

    let hint = " F1 help ";
    #[allow(clippy::cast_possible_truncation)]
    let hint_width = hint.len() as u16;
    if area.width > hint_width + 40 {
        let hint_area = Rect {
            x: area.x + area.width - hint_width,
            width: hint_width,
            ..area
        };
        frame.render_widget(Paragraph::new(hint).style(bar_style), hint_area);
    }
}
