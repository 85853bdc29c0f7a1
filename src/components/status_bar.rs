use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::PromptState;
use crate::fs::tree::FlatRow;
use crate::theme::ThemeColors;

/// Footer row for browse mode: owner/group ids, mtime, permission bits and
/// immediate child count of the node under the cursor.
pub struct FooterWidget<'a> {
    row: Option<&'a FlatRow>,
    theme: &'a ThemeColors,
}

impl<'a> FooterWidget<'a> {
    pub fn new(row: Option<&'a FlatRow>, theme: &'a ThemeColors) -> Self {
        Self { row, theme }
    }

    fn stat_spans(path: &Path, child_count: usize, theme: &ThemeColors) -> Option<Vec<Span<'static>>> {
        let meta = fs::metadata(path).ok()?;
        let owner = format!("{} {}", meta.uid(), meta.gid());
        let mdate = DateTime::<Local>::from(meta.modified().ok()?)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let mode = format!("{:03o}", meta.mode() & 0o777);
        Some(vec![
            Span::styled(
                owner,
                Style::default()
                    .fg(theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                mdate,
                Style::default()
                    .fg(theme.info_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                mode,
                Style::default()
                    .fg(theme.warning_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                child_count.to_string(),
                Style::default()
                    .fg(theme.success_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Widget for FooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let Some(row) = self.row else {
            return;
        };
        // A node can vanish between flatten and render; draw nothing then.
        let Some(spans) = Self::stat_spans(&row.path, row.child_count, self.theme) else {
            return;
        };
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Footer row while a prompt is active: label plus the input line with a
/// block cursor.
pub struct PromptWidget<'a> {
    prompt: &'a PromptState,
    theme: &'a ThemeColors,
}

impl<'a> PromptWidget<'a> {
    pub fn new(prompt: &'a PromptState, theme: &'a ThemeColors) -> Self {
        Self { prompt, theme }
    }
}

impl Widget for PromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let input = &self.prompt.input;
        let cursor = self.prompt.cursor_position;
        let (before, cursor_char, after) = if cursor < input.len() {
            let next = input[cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            (&input[..cursor], &input[cursor..cursor + next], &input[cursor + next..])
        } else {
            (input.as_str(), " ", "")
        };

        let label_style = Style::default()
            .fg(self.theme.info_fg)
            .add_modifier(Modifier::BOLD);
        let input_style = Style::default().fg(self.theme.tree_fg);
        let cursor_style = Style::default()
            .bg(self.theme.tree_fg)
            .fg(self.theme.overlay_bg)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(self.prompt.kind.label(), label_style),
            Span::styled(before.to_string(), input_style),
            Span::styled(cursor_char.to_string(), cursor_style),
            Span::styled(after.to_string(), input_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Footer row while an overlay pad is active: scroll/return key hints.
pub struct PadFooterWidget<'a> {
    theme: &'a ThemeColors,
}

impl<'a> PadFooterWidget<'a> {
    pub fn new(theme: &'a ThemeColors) -> Self {
        Self { theme }
    }
}

impl Widget for PadFooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let key_style = Style::default()
            .fg(self.theme.info_fg)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(self.theme.dim_fg);
        let line = Line::from(vec![
            Span::styled("[j,k,f,b]", key_style),
            Span::styled(" or ", text_style),
            Span::styled("[DOWN, UP, PGDN, PGUP]", key_style),
            Span::styled(" to scroll. ", text_style),
            Span::styled("[q]", key_style),
            Span::styled(" or ", text_style),
            Span::styled("[ESC]", key_style),
            Span::styled(" to return.", text_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
