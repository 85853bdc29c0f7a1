//! Main application state: mode routing, the cached flattened rows, viewport
//! geometry, and the mapping from [`Action`]s onto tree mutations.

use std::path::Path;

use glob::Pattern;

use crate::actions::{Action, PadAction};
use crate::components::help::HelpOverlay;
use crate::fs::tree::{FlatRow, Tree};
use crate::theme::ThemeColors;

/// Which prompt is being edited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    #[default]
    Find,
    Glob,
}

impl PromptKind {
    /// Label shown in front of the prompt input.
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Find => "Find: ",
            PromptKind::Glob => "Pick: ",
        }
    }
}

/// State of the single-line text prompt.
#[derive(Debug, Default)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
    pub cursor_position: usize,
}

/// Input-routing mode. Overlays and prompts suspend the primary loop's key
/// handling until dismissed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Help,
    Picked,
    Prompt,
}

/// Main application state.
pub struct App {
    pub tree: Tree,
    /// Flattened rows from the last refresh — what is on screen right now.
    pub rows: Vec<FlatRow>,
    pub mode: Mode,
    pub prompt: PromptState,
    pub theme: ThemeColors,
    pub should_quit: bool,
    /// `user@host` shown in the header, computed once at startup.
    pub user_host: String,
    /// Tree viewport height, written back by the renderer each pass.
    pub viewport_height: usize,
    /// Overlay pad inner height, written back by the renderer each pass.
    pub overlay_height: usize,
    /// Scroll position of the active overlay pad.
    pub pad_scroll: usize,
}

impl App {
    /// Create a new App rooted at the given (canonical) path.
    pub fn new(root: &Path, show_hidden: bool, theme: ThemeColors) -> Self {
        let user = std::env::var("USER").unwrap_or_else(|_| "?".into());
        let host = sysinfo::System::host_name().unwrap_or_else(|| "localhost".into());
        let mut app = Self {
            tree: Tree::new(root.to_path_buf(), show_hidden),
            rows: Vec::new(),
            mode: Mode::default(),
            prompt: PromptState::default(),
            theme,
            should_quit: false,
            user_host: format!("{user}@{host}"),
            viewport_height: 0,
            overlay_height: 0,
            pad_scroll: 0,
        };
        app.refresh();
        app
    }

    /// Re-flatten the visible tree, wrap the cursor into range, and fill any
    /// pending size placeholders. Runs once per event/render cycle so every
    /// mutation is fully applied before the next render reads the state.
    pub fn refresh(&mut self) {
        self.rows = self.tree.flatten();
        self.tree.nav.clamp_cursor(self.rows.len());
        self.tree.fill_pending_sizes(&self.rows);
    }

    /// The row under the cursor, if any.
    pub fn current_row(&self) -> Option<&FlatRow> {
        self.rows.get(self.tree.nav.cursor)
    }

    /// Apply a primary-loop action.
    pub fn apply(&mut self, action: Action) {
        let lines = self.rows.len();
        let page = self.viewport_height.max(1);
        match action {
            Action::MoveDown => self.tree.nav.move_down(),
            Action::MoveUp => self.tree.nav.move_up(lines),
            Action::PageDown => self.tree.nav.page_down(lines, page),
            Action::PageUp => self.tree.nav.page_up(page),
            Action::Top => self.tree.nav.top(),
            Action::Bottom => self.tree.nav.bottom(lines),

            Action::Expand => self.tree.expand(&self.rows),
            Action::ExpandAll => self.tree.expand_all(&self.rows),
            Action::ToggleExpand => self.tree.toggle_expand(&self.rows),
            Action::Collapse => self.tree.collapse(&self.rows),
            Action::CollapseAll => self.tree.collapse_all(&self.rows),

            Action::NextParent => self.tree.next_parent(&self.rows),
            Action::PrevParent => {
                self.tree.prev_parent(&self.rows);
            }

            Action::Pick => self.tree.pick(&self.rows),
            Action::PickAll => self.tree.pick_all(&self.rows),
            Action::PromptGlob => self.open_prompt(PromptKind::Glob),

            Action::PromptFind => self.open_prompt(PromptKind::Find),
            Action::FindNext => self.tree.find_next(),
            Action::FindPrev => self.tree.find_prev(),

            Action::GetSize => self.tree.get_size(&self.rows),
            Action::GetSizeAll => self.tree.get_size_all(&self.rows),
            Action::ToggleHidden => self.tree.toggle_hidden(),

            Action::ResetPicked => self.tree.reset_picked(),
            Action::ResetAll => self.tree.reset_all(),

            Action::Help => {
                self.mode = Mode::Help;
                self.pad_scroll = 0;
            }
            Action::PickedList => {
                self.mode = Mode::Picked;
                self.pad_scroll = 0;
            }

            Action::Quit => self.should_quit = true,
        }
    }

    // ── Overlay pads ─────────────────────────────────────────────────────────

    /// Line count of the active overlay's content.
    pub fn pad_line_count(&self) -> usize {
        match self.mode {
            Mode::Help => HelpOverlay::total_lines(),
            Mode::Picked => self.tree.nav.picked.len().max(1),
            _ => 0,
        }
    }

    /// Apply an overlay-pad action. Scrolling is clamped so the pad never
    /// runs past its content.
    pub fn apply_pad(&mut self, action: PadAction) {
        let page = self.overlay_height.max(1);
        let max_scroll = self.pad_line_count().saturating_sub(page);
        match action {
            PadAction::ScrollDown => self.pad_scroll = (self.pad_scroll + 1).min(max_scroll),
            PadAction::ScrollUp => self.pad_scroll = self.pad_scroll.saturating_sub(1),
            PadAction::PageDown => self.pad_scroll = (self.pad_scroll + page).min(max_scroll),
            PadAction::PageUp => self.pad_scroll = self.pad_scroll.saturating_sub(page),
            PadAction::Close => {
                self.mode = Mode::Browse;
                self.pad_scroll = 0;
            }
        }
    }

    // ── Prompt handling ──────────────────────────────────────────────────────

    /// Open the find or glob prompt with an empty input.
    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = PromptState {
            kind,
            ..PromptState::default()
        };
        self.mode = Mode::Prompt;
    }

    /// Dismiss the prompt without running its action.
    pub fn cancel_prompt(&mut self) {
        self.prompt = PromptState::default();
        self.mode = Mode::Browse;
    }

    /// Commit the prompt. A blank input is a no-op that preserves any
    /// existing search matches or picks.
    pub fn commit_prompt(&mut self) {
        let input = self.prompt.input.trim().to_string();
        let kind = self.prompt.kind;
        self.cancel_prompt();
        if input.is_empty() {
            return;
        }
        match kind {
            PromptKind::Find => self.tree.find(&self.rows, &input),
            PromptKind::Glob => {
                let patterns: Vec<Pattern> = input
                    .split_whitespace()
                    .filter_map(|pat| Pattern::new(pat).ok())
                    .collect();
                if !patterns.is_empty() {
                    self.tree.pick_globs(&self.rows, &patterns);
                }
            }
        }
    }

    /// Insert a character at the current prompt cursor position.
    pub fn prompt_insert_char(&mut self, c: char) {
        self.prompt.input.insert(self.prompt.cursor_position, c);
        self.prompt.cursor_position += c.len_utf8();
    }

    /// Delete the character before the prompt cursor (backspace).
    pub fn prompt_delete_char(&mut self) {
        if self.prompt.cursor_position > 0 {
            let byte_pos = self.prompt.cursor_position;
            let prev_char = self.prompt.input[..byte_pos]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.prompt.cursor_position -= prev_char.len_utf8();
            self.prompt.input.remove(self.prompt.cursor_position);
        }
    }

    /// Move the prompt cursor left by one character.
    pub fn prompt_move_cursor_left(&mut self) {
        if self.prompt.cursor_position > 0 {
            let prev_char = self.prompt.input[..self.prompt.cursor_position]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.prompt.cursor_position -= prev_char.len_utf8();
        }
    }

    /// Move the prompt cursor right by one character.
    pub fn prompt_move_cursor_right(&mut self) {
        if self.prompt.cursor_position < self.prompt.input.len() {
            let next_char = self.prompt.input[self.prompt.cursor_position..]
                .chars()
                .next()
                .expect("cursor < len guarantees at least one char");
            self.prompt.cursor_position += next_char.len_utf8();
        }
    }

    /// Move the prompt cursor to the beginning of the input.
    pub fn prompt_cursor_home(&mut self) {
        self.prompt.cursor_position = 0;
    }

    /// Move the prompt cursor to the end of the input.
    pub fn prompt_cursor_end(&mut self) {
        self.prompt.cursor_position = self.prompt.input.len();
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// The picked paths in pick order, as printable strings. With `relative`
    /// set, paths are emitted relative to the root.
    pub fn picked_paths(&self, relative: bool) -> Vec<String> {
        self.tree
            .nav
            .picked
            .iter()
            .map(|path| {
                if relative {
                    path.strip_prefix(&self.tree.root.path)
                        .unwrap_or(path)
                        .display()
                        .to_string()
                } else {
                    path.display().to_string()
                }
            })
            .collect()
    }
}
