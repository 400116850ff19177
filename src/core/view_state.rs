//! Page-level view state
//!
//! Owned by the controller (the CLI dispatcher or an embedding app) and
//! passed to whatever needs it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pages of the dashboard that need loaded data
pub const DATA_PAGES: &[&str] = &["/heatmap", "/mapa_fluxos", "/tabela", "/balanco"];

/// Sections hidden while no data is loaded
pub const DATA_SECTIONS: &[&str] = &["filtrosSection", "statsSection"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    data_loaded: bool,
    current_user: Option<String>,
    theme: Theme,
    status_message: Option<String>,
}

impl ViewState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn is_data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Server reported data as loaded
    pub fn mark_loaded(&mut self) {
        self.data_loaded = true;
        self.status_message = None;
    }

    /// Server reported no data, or the check failed; `reason` is kept for display
    pub fn mark_unloaded(&mut self, reason: Option<String>) {
        self.data_loaded = false;
        self.status_message = reason;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn set_current_user(&mut self, user: Option<String>) {
        self.current_user = user;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// The home page is always reachable; everything else needs data
    pub fn is_nav_enabled(&self, path: &str) -> bool {
        path == "/" || self.data_loaded
    }

    pub fn is_section_visible(&self, section: &str) -> bool {
        !DATA_SECTIONS.contains(&section) || self.data_loaded
    }

    pub fn show_no_data_alert(&self) -> bool {
        !self.data_loaded
    }
}
