//! Keyboard handling.
//!
//! | Key              | Action           |
//! |------------------|------------------|
//! | printable chars  | type in the field |
//! | `Backspace`      | delete last char |
//! | `Enter`          | search           |
//! | `Esc`            | clear the field  |
//! | `Tab`            | toggle theme     |
//! | `F5` / `Ctrl-R`  | refetch          |
//! | `Ctrl-C`/`Ctrl-Q`| quit             |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    ClearInput,
    ToggleTheme,
    Refresh,
    Type(char),
    Backspace,
    None,
}

/// Translate a key event into an action. The screen is mostly a text
/// field, so plain letters type rather than command.
pub fn handle_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::ClearInput,
        KeyCode::Tab => Action::ToggleTheme,
        KeyCode::F(5) => Action::Refresh,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::Type(c),
        _ => Action::None,
    }
}

/// Apply an action to the screen state.
pub fn apply_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::Submit => app.submit_search(),
        Action::ClearInput => app.clear_input(),
        Action::ToggleTheme => app.toggle_theme(),
        Action::Refresh => app.refresh(),
        Action::Type(c) => app.push_char(c),
        Action::Backspace => app.backspace(),
        Action::None => {}
    }
}
