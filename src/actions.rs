//! User actions and key-binding tables.
//!
//! Key events are translated into [`Action`] variants by a pure lookup
//! function, keeping the binding tables (data) separate from the action
//! semantics (behavior) in [`crate::app::App::apply`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User-initiated actions in the primary browse loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Movement
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    Top,
    Bottom,

    // Expansion
    Expand,
    ExpandAll,
    ToggleExpand,
    Collapse,
    CollapseAll,

    // Parent jumps
    NextParent,
    PrevParent,

    // Picking
    Pick,
    PickAll,
    PromptGlob,

    // Searching
    PromptFind,
    FindNext,
    FindPrev,

    // Sizing & display
    GetSize,
    GetSizeAll,
    ToggleHidden,

    // Resets
    ResetPicked,
    ResetAll,

    // Overlays
    Help,
    PickedList,

    /// Terminate the session and emit the picked paths.
    Quit,
}

/// Actions available while an overlay pad is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAction {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Close,
}

/// Map a key event to a primary-loop action. Unbound keys are `None`.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => Action::ExpandAll,
        KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => Action::CollapseAll,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::PageDown | KeyCode::Char('f') => Action::PageDown,
        KeyCode::PageUp | KeyCode::Char('b') => Action::PageUp,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::Right | KeyCode::Char('l') => Action::Expand,
        KeyCode::Left | KeyCode::Char('h') => Action::Collapse,
        KeyCode::Char('L') => Action::ExpandAll,
        KeyCode::Char('H') => Action::CollapseAll,
        KeyCode::Tab | KeyCode::Enter => Action::ToggleExpand,
        KeyCode::Char(' ') => Action::Pick,
        KeyCode::Char('v') => Action::PickAll,
        KeyCode::Char(':') => Action::PromptGlob,
        KeyCode::Char('/') => Action::PromptFind,
        KeyCode::Char('n') => Action::FindNext,
        KeyCode::Char('N') => Action::FindPrev,
        KeyCode::Char('J') => Action::NextParent,
        KeyCode::Char('K') => Action::PrevParent,
        KeyCode::Char('s') => Action::GetSize,
        KeyCode::Char('S') => Action::GetSizeAll,
        KeyCode::Char('.') => Action::ToggleHidden,
        KeyCode::F(4) | KeyCode::Char('r') => Action::ResetPicked,
        KeyCode::F(5) | KeyCode::Char('R') => Action::ResetAll,
        KeyCode::F(1) | KeyCode::Char('?') => Action::Help,
        KeyCode::F(2) | KeyCode::Char('p') => Action::PickedList,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Map a key event to an overlay-pad action. Unbound keys are `None`.
pub fn pad_action_for(key: KeyEvent) -> Option<PadAction> {
    let action = match key.code {
        KeyCode::Down | KeyCode::Char('j') => PadAction::ScrollDown,
        KeyCode::Up | KeyCode::Char('k') => PadAction::ScrollUp,
        KeyCode::PageDown | KeyCode::Char('f') => PadAction::PageDown,
        KeyCode::PageUp | KeyCode::Char('b') => PadAction::PageUp,
        KeyCode::Char('q') | KeyCode::Esc => PadAction::Close,
        _ => return None,
    };
    Some(action)
}
