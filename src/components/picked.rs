use std::path::PathBuf;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::components::overlay_rect;
use crate::theme::ThemeColors;

/// Overlay listing the picked paths in pick order, independently scrollable.
/// Read-only: displays the picked list without mutating it.
pub struct PickedOverlay<'a> {
    picked: &'a [PathBuf],
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> PickedOverlay<'a> {
    pub fn new(picked: &'a [PathBuf], theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            picked,
            theme,
            scroll_offset,
        }
    }
}

impl Widget for PickedOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_area = overlay_rect(area);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(format!(" Picked Paths ({}) ", self.picked.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.overlay_border_fg))
            .style(Style::default().bg(self.theme.overlay_bg));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.picked.is_empty() {
            let notice = Line::from(Span::styled(
                "You haven't picked anything yet!",
                Style::default()
                    .fg(self.theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(inner.x + 1, inner.y, &notice, inner.width.saturating_sub(2));
            return;
        }

        let visible_height = inner.height as usize;
        let scroll = self.scroll_offset;

        for (i, path) in self
            .picked
            .iter()
            .skip(scroll)
            .take(visible_height)
            .enumerate()
        {
            let line_y = inner.y + i as u16;
            let line = Line::from(Span::styled(
                path.display().to_string(),
                Style::default().fg(self.theme.picked_fg),
            ));
            buf.set_line(inner.x + 1, line_y, &line, inner.width.saturating_sub(2));
        }

        // Scroll indicator if content overflows
        if self.picked.len() > visible_height && overlay_area.height > 0 {
            let total = self.picked.len();
            let indicator = format!(" {}/{} ", (scroll + 1).min(total), total);
            let ind_span = Span::styled(indicator, Style::default().fg(self.theme.dim_fg));
            let ind_x = overlay_area.x
                + overlay_area
                    .width
                    .saturating_sub(ind_span.width() as u16 + 1);
            let ind_y = overlay_area.y + overlay_area.height - 1;
            buf.set_span(ind_x, ind_y, &ind_span, ind_span.width() as u16);
        }
    }
}
