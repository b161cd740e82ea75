//! Shortcut Manager for GenBrowser.
//!
//! Maps key chords to browser actions with conflict detection
//! and platform-specific modifier key adaptation.

use std::collections::HashMap;

use crate::types::action::BrowserAction;
use crate::types::errors::ShortcutError;

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: BrowserAction, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: BrowserAction) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: BrowserAction) -> Option<&str>;
    fn resolve(&self, keys: &str) -> Option<BrowserAction>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<BrowserAction>) -> Option<BrowserAction>;
}

/// Shortcut manager with in-memory bindings.
pub struct ShortcutManager {
    shortcuts: HashMap<BrowserAction, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            shortcuts: Self::default_shortcuts(),
        }
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    pub fn default_shortcuts() -> HashMap<BrowserAction, String> {
        let defaults = [
            (BrowserAction::NewTab, "Ctrl+T"),
            (BrowserAction::CloseTab, "Ctrl+W"),
            (BrowserAction::Back, "Alt+Left"),
            (BrowserAction::Forward, "Alt+Right"),
            (BrowserAction::Reload, "Ctrl+R"),
            (BrowserAction::Stop, "Escape"),
            (BrowserAction::Home, "Alt+Home"),
            (BrowserAction::ZoomIn, "Ctrl+Plus"),
            (BrowserAction::ZoomOut, "Ctrl+Minus"),
            (BrowserAction::OpenFile, "Ctrl+O"),
            (BrowserAction::SavePage, "Ctrl+S"),
            (BrowserAction::Print, "Ctrl+P"),
            (BrowserAction::ToggleTheme, "Ctrl+Shift+D"),
        ];

        defaults
            .into_iter()
            .map(|(a, k)| (a, Self::adapt_for_platform(k)))
            .collect()
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: BrowserAction, keys: &str) -> Result<(), ShortcutError> {
        if keys.is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        if let Some(conflicting) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting
            )));
        }

        self.shortcuts.insert(action, Self::adapt_for_platform(keys));
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: BrowserAction) -> Result<(), ShortcutError> {
        self.shortcuts
            .remove(&action)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(action.to_string()))
    }

    fn get_shortcut(&self, action: BrowserAction) -> Option<&str> {
        self.shortcuts.get(&action).map(|s| s.as_str())
    }

    fn resolve(&self, keys: &str) -> Option<BrowserAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(_, bound)| **bound == adapted)
            .map(|(action, _)| *action)
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = Self::default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<BrowserAction>) -> Option<BrowserAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .filter(|(action, _)| Some(**action) != exclude_action)
            .find(|(_, bound)| **bound == adapted)
            .map(|(action, _)| *action)
    }
}
