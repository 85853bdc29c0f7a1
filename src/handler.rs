use crossterm::event::{KeyCode, KeyEvent};

use crate::actions;
use crate::app::{App, Mode};

/// Route a key event according to the current mode. While an overlay or
/// prompt is active the primary bindings are suspended.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Browse => {
            if let Some(action) = actions::action_for(key) {
                app.apply(action);
            }
        }
        Mode::Help | Mode::Picked => {
            if let Some(action) = actions::pad_action_for(key) {
                app.apply_pad(action);
            }
        }
        Mode::Prompt => handle_prompt_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => app.commit_prompt(),
        KeyCode::Backspace => app.prompt_delete_char(),
        KeyCode::Left => app.prompt_move_cursor_left(),
        KeyCode::Right => app.prompt_move_cursor_right(),
        KeyCode::Home => app.prompt_cursor_home(),
        KeyCode::End => app.prompt_cursor_end(),
        KeyCode::Char(c) => app.prompt_insert_char(c),
        _ => {}
    }
}
