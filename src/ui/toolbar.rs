//! Injected toolbar: IPC messages it posts and the state it renders.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::action::BrowserAction;
use crate::types::tab::Session;

pub const TOOLBAR_JS: &str = include_str!("../../resources/ui/toolbar.js");

/// Messages posted by the toolbar via `window.ipc.postMessage`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ToolbarMessage {
    UiReady,
    Navigate { url: String },
    Action { name: BrowserAction },
    Find { text: String },
    SwitchTab { index: usize },
    CloseTab { index: usize },
    Key { keys: String },
}

pub fn parse_message(body: &str) -> Result<ToolbarMessage, serde_json::Error> {
    serde_json::from_str(body)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TabLabel {
    pub label: String,
    pub title: String,
}

/// Everything the toolbar draws.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChromeSnapshot {
    pub url_text: String,
    pub secure: bool,
    pub tabs: Vec<TabLabel>,
    pub active: usize,
    pub css: HashMap<String, String>,
}

impl ChromeSnapshot {
    pub fn set_tabs<'a>(&mut self, sessions: impl Iterator<Item = &'a Session>, active: Option<usize>) {
        self.tabs = sessions
            .map(|s| TabLabel {
                label: s.label.clone(),
                title: s.title.clone(),
            })
            .collect();
        self.active = active.unwrap_or(0);
    }

    pub fn to_script(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!("if(window.__gb_applyChrome)__gb_applyChrome({})", json)
    }
}

pub fn status_script(message: &str, duration_ms: u64) -> String {
    let message = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string());
    format!("if(window.__gb_showStatus)__gb_showStatus({}, {})", message, duration_ms)
}
