use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::components::overlay_rect;
use crate::theme::ThemeColors;

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

const MOVEMENT_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j / ↓",
        description: "Step down one line",
    },
    KeyEntry {
        key: "k / ↑",
        description: "Step up one line",
    },
    KeyEntry {
        key: "f / PgDn",
        description: "Jump down a page of lines",
    },
    KeyEntry {
        key: "b / PgUp",
        description: "Jump up a page of lines",
    },
    KeyEntry {
        key: "g / Home",
        description: "Jump to first line",
    },
    KeyEntry {
        key: "G / End",
        description: "Jump to last line",
    },
    KeyEntry {
        key: "J",
        description: "Jump to next parent directory",
    },
    KeyEntry {
        key: "K",
        description: "Jump to previous parent directory",
    },
];

const EXPANSION_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "l / →",
        description: "Expand and step into directory",
    },
    KeyEntry {
        key: "h / ←",
        description: "Collapse directory",
    },
    KeyEntry {
        key: "Tab / Enter",
        description: "Toggle expansion of directory",
    },
    KeyEntry {
        key: "L / Shift-→",
        description: "Expand directory and child directories",
    },
    KeyEntry {
        key: "H / Shift-←",
        description: "Jump to parent directory and collapse all",
    },
];

const PICKING_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "Space",
        description: "Toggle picking of current path",
    },
    KeyEntry {
        key: "v",
        description: "Toggle picking of all visible paths",
    },
    KeyEntry {
        key: ":",
        description: "Toggle picking of paths matching globs",
    },
    KeyEntry {
        key: "p / F2",
        description: "View the list of picked paths",
    },
];

const SEARCH_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "/",
        description: "Search basenames for a substring",
    },
    KeyEntry {
        key: "n",
        description: "Jump to next search match",
    },
    KeyEntry {
        key: "N",
        description: "Jump to previous search match",
    },
];

const DISPLAY_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "s",
        description: "Show recursive size of current path",
    },
    KeyEntry {
        key: "S",
        description: "Show recursive size of all visible paths",
    },
    KeyEntry {
        key: ".",
        description: "Toggle display of dotfiles",
    },
];

const SESSION_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "r / F4",
        description: "Reset picked paths",
    },
    KeyEntry {
        key: "R / F5",
        description: "Reset picks, expansion and sizes",
    },
    KeyEntry {
        key: "? / F1",
        description: "View this help page",
    },
    KeyEntry {
        key: "q / Esc",
        description: "Quit and print all picked paths",
    },
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Movement",
        entries: MOVEMENT_KEYS,
    },
    KeyCategory {
        name: "Expansion",
        entries: EXPANSION_KEYS,
    },
    KeyCategory {
        name: "Picking",
        entries: PICKING_KEYS,
    },
    KeyCategory {
        name: "Search",
        entries: SEARCH_KEYS,
    },
    KeyCategory {
        name: "Sizes & Display",
        entries: DISPLAY_KEYS,
    },
    KeyCategory {
        name: "Session",
        entries: SESSION_KEYS,
    },
];

/// Help overlay widget showing all keybindings.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            theme,
            scroll_offset,
        }
    }

    /// Build all the lines for the help content.
    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            " Keybinding Reference ",
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        for category in CATEGORIES {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("── {} ", category.name),
                    Style::default()
                        .fg(self.theme.accent_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("─".repeat(40), Style::default().fg(self.theme.dim_fg)),
            ]));

            for entry in category.entries {
                let key_width = 18;
                let key_padded = format!("  {:<width$}", entry.key, width = key_width);
                lines.push(Line::from(vec![
                    Span::styled(
                        key_padded,
                        Style::default()
                            .fg(self.theme.warning_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        entry.description.to_string(),
                        Style::default().fg(self.theme.tree_file_fg),
                    ),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            " Press q or Esc to return ",
            Style::default().fg(self.theme.dim_fg),
        )]));

        lines
    }

    /// Get total number of content lines (for scroll bounds).
    pub fn total_lines() -> usize {
        let mut count = 2; // title + blank
        for category in CATEGORIES {
            count += 1; // header
            count += category.entries.len();
            count += 1; // blank separator
        }
        count += 1; // footer
        count
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_area = overlay_rect(area);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.overlay_border_fg))
            .style(Style::default().bg(self.theme.overlay_bg));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let content_lines = self.build_content_lines();
        let visible_height = inner.height as usize;
        let scroll = self.scroll_offset;

        for (i, line) in content_lines
            .iter()
            .skip(scroll)
            .take(visible_height)
            .enumerate()
        {
            let line_y = inner.y + i as u16;
            if line_y >= inner.y + inner.height {
                break;
            }
            buf.set_line(inner.x + 1, line_y, line, inner.width.saturating_sub(2));
        }

        // Scroll indicator if content overflows
        if content_lines.len() > visible_height && overlay_area.height > 0 {
            let total = content_lines.len();
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
