//! Key bindings for `interactive`

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ctrl+U
    Upload,
    /// Ctrl+R
    Refresh,
    /// Ctrl+E
    ExportTemplate,
    /// `t`
    ToggleTheme,
    /// `h` or `?`
    Help,
    /// `q`, Esc or Ctrl+C
    Quit,
}

pub const HELP_TEXT: &str = "\
Shortcuts:
  Ctrl+U   Upload a workbook
  Ctrl+R   Refresh data status
  Ctrl+E   Download the CSV template
  t        Toggle theme
  h, ?     Show this help
  q, Esc   Quit";

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'u' => Some(Action::Upload),
                'r' => Some(Action::Refresh),
                'e' => Some(Action::ExportTemplate),
                'c' => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('h') | KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
