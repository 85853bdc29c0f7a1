use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::tree::{FlatRow, NavState};
use crate::theme::ThemeColors;

/// Rows are kept this many lines clear of the bottom edge while scrolling.
pub const SCROLL_MARGIN: usize = 3;

/// Scroll offset keeping the cursor row inside the viewport:
/// `max(0, cursor - height + SCROLL_MARGIN)`.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    (cursor + SCROLL_MARGIN).saturating_sub(height)
}

/// The tree viewport: paints the flattened rows with expansion markers, pick
/// marks and right-aligned size annotations, highlighting the cursor row.
pub struct TreeWidget<'a> {
    rows: &'a [FlatRow],
    nav: &'a NavState,
    theme: &'a ThemeColors,
}

impl<'a> TreeWidget<'a> {
    pub fn new(rows: &'a [FlatRow], nav: &'a NavState, theme: &'a ThemeColors) -> Self {
        Self { rows, nav, theme }
    }

    fn row_style(&self, row: &FlatRow, is_cursor: bool, is_picked: bool) -> Style {
        if is_cursor {
            Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD)
        } else if is_picked {
            Style::default()
                .fg(self.theme.picked_fg)
                .add_modifier(Modifier::BOLD)
        } else if row.is_dir {
            Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.tree_file_fg)
        }
    }
}

impl Widget for TreeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = area.height as usize;
        let width = area.width as usize;
        if height == 0 || width == 0 || self.rows.is_empty() {
            return;
        }

        let offset = scroll_offset(self.nav.cursor, height);

        for (idx, row) in self.rows.iter().enumerate().skip(offset).take(height) {
            let y = area.y + (idx - offset) as u16;

            let is_cursor = idx == self.nav.cursor;
            let is_picked = self.nav.picked.iter().any(|picked| picked == &row.path);

            let indent = "    ".repeat(row.depth.saturating_sub(1));
            let name = if row.is_dir {
                format!("{}/", row.name)
            } else {
                row.name.clone()
            };
            let mark = if is_picked { " *" } else { "  " };
            let left = format!("{indent}{}{name}{mark}", row.marker.glyph());

            let size = self
                .nav
                .sized
                .get(&row.path)
                .and_then(|label| label.clone())
                .unwrap_or_default();

            let style = self.row_style(row, is_cursor, is_picked);
            let size_style = if is_cursor {
                style
            } else {
                Style::default()
                    .fg(self.theme.size_fg)
                    .add_modifier(Modifier::BOLD)
            };

            let pad = width.saturating_sub(left.chars().count() + size.chars().count());
            let line = Line::from(vec![
                Span::styled(format!("{left}{}", " ".repeat(pad)), style),
                Span::styled(size, size_style),
            ]);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
