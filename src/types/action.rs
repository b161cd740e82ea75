use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Argument-free commands reachable from menus, toolbar and shortcuts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserAction {
    NewTab,
    CloseTab,
    Back,
    Forward,
    Reload,
    Stop,
    Home,
    ZoomIn,
    ZoomOut,
    OpenFile,
    SavePage,
    Print,
    ToggleTheme,
    About,
    AuthorPage,
}

impl BrowserAction {
    pub const ALL: [BrowserAction; 15] = [
        BrowserAction::NewTab,
        BrowserAction::CloseTab,
        BrowserAction::Back,
        BrowserAction::Forward,
        BrowserAction::Reload,
        BrowserAction::Stop,
        BrowserAction::Home,
        BrowserAction::ZoomIn,
        BrowserAction::ZoomOut,
        BrowserAction::OpenFile,
        BrowserAction::SavePage,
        BrowserAction::Print,
        BrowserAction::ToggleTheme,
        BrowserAction::About,
        BrowserAction::AuthorPage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserAction::NewTab => "new_tab",
            BrowserAction::CloseTab => "close_tab",
            BrowserAction::Back => "back",
            BrowserAction::Forward => "forward",
            BrowserAction::Reload => "reload",
            BrowserAction::Stop => "stop",
            BrowserAction::Home => "home",
            BrowserAction::ZoomIn => "zoom_in",
            BrowserAction::ZoomOut => "zoom_out",
            BrowserAction::OpenFile => "open_file",
            BrowserAction::SavePage => "save_page",
            BrowserAction::Print => "print",
            BrowserAction::ToggleTheme => "toggle_theme",
            BrowserAction::About => "about",
            BrowserAction::AuthorPage => "author_page",
        }
    }
}

impl fmt::Display for BrowserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrowserAction::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action: {}", s))
    }
}
