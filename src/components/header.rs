use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Header row: `user@host  <path under the cursor>`, truncated to fit.
pub struct HeaderWidget<'a> {
    user_host: &'a str,
    path: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(user_host: &'a str, path: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            user_host,
            path,
            theme,
        }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;

        let mut path = self.path.to_string();
        let budget = width.saturating_sub(self.user_host.len() + 1);
        if path.chars().count() > budget && budget > 2 {
            let kept: String = path.chars().take(budget - 2).collect();
            path = format!("{kept}..");
        }

        let line = Line::from(vec![
            Span::styled(
                self.user_host.to_string(),
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                path,
                Style::default()
                    .fg(self.theme.info_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
