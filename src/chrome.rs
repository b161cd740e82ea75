//! Interface to the windowing toolkit: the shared widgets every tab renders into.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::theme::Palette;

/// Lock icon next to the URL bar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SecurityIcon {
    Secure,
    Insecure,
}

impl SecurityIcon {
    pub fn for_secure(secure: bool) -> Self {
        if secure {
            SecurityIcon::Secure
        } else {
            SecurityIcon::Insecure
        }
    }
}

/// Content of the about dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
    pub copyright: String,
}

/// Shared browser chrome: toolbar, URL bar, title, status area and dialogs.
pub trait Chrome {
    /// Replaces the URL bar text and moves the cursor to the start.
    fn set_url_text(&mut self, text: &str);
    fn set_security_icon(&mut self, icon: SecurityIcon);
    fn set_window_title(&mut self, title: &str);
    fn show_status(&mut self, message: &str, duration: Duration);
    /// Modal save dialog. `None` when the user cancels.
    fn prompt_save_path(&mut self, title: &str, suggested_name: &str) -> Option<PathBuf>;
    /// Modal open dialog for HTML files. `None` when the user cancels.
    fn prompt_open_path(&mut self, title: &str) -> Option<PathBuf>;
    fn apply_palette(&mut self, palette: &Palette);
    fn show_about(&mut self, info: &AboutInfo);
}
