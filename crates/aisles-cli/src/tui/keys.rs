//! Key bindings.

use aisles_core::{Event, ViewMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether keystrokes edit the search term or drive the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum InputMode {
    #[default]
    Normal,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    CursorUp,
    CursorDown,
    /// Activate the store under the cursor.
    ActivateCursor,
    EnterSearch,
    LeaveSearch,
    Apply(Event),
    Ignore,
}

pub(crate) fn translate(key: KeyEvent, mode: InputMode) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        InputMode::Normal => translate_normal(key),
        InputMode::Search => translate_search(key),
    }
}

fn translate_normal(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::ActivateCursor,
        KeyCode::Tab => Action::Apply(Event::NextCuisine),
        KeyCode::BackTab => Action::Apply(Event::PrevCuisine),
        KeyCode::Char('s') => Action::Apply(Event::NextSort),
        KeyCode::Char('g') => Action::Apply(Event::SetViewMode(ViewMode::Grid)),
        KeyCode::Char('m') => Action::Apply(Event::SetViewMode(ViewMode::Map)),
        KeyCode::Char('v') => Action::Apply(Event::ToggleViewMode),
        KeyCode::Char('/') => Action::EnterSearch,
        KeyCode::Char('x') => Action::Apply(Event::ClearSearch),
        KeyCode::Char('d') => Action::Apply(Event::Directions),
        KeyCode::Char('o') => Action::Apply(Event::ViewOnMap),
        KeyCode::Esc => Action::Apply(Event::ClearSelection),
        _ => Action::Ignore,
    }
}

fn translate_search(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Action::LeaveSearch,
        KeyCode::Backspace => Action::Apply(Event::PopSearch),
        KeyCode::Up => Action::CursorUp,
        KeyCode::Down => Action::CursorDown,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Action::Apply(Event::AppendSearch(c))
        }
        _ => Action::Ignore,
    }
}
