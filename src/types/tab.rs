use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a browser session (tab).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page load state of a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum LoadState {
    Loading,
    Loaded,
}

/// One browsing context. The engine view handle lives next to it in the
/// tab manager; this struct is the chrome-visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub label: String,
    pub url: String,
    pub title: String,
    pub secure: bool,
    pub load_state: LoadState,
}

impl Session {
    pub fn new(url: &str, label: &str) -> Self {
        Self {
            id: SessionId::new(),
            label: label.to_string(),
            url: url.to_string(),
            title: String::new(),
            secure: is_secure_url(url),
            load_state: LoadState::Loading,
        }
    }

    /// Records a URL change and recomputes the secure-transport flag.
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
        self.secure = is_secure_url(url);
    }

    /// Snapshot of what the chrome shows for this session.
    pub fn chrome_state(&self) -> ChromeState {
        ChromeState {
            url: self.url.clone(),
            title: self.title.clone(),
            secure: self.secure,
        }
    }
}

/// What the shared chrome displays for the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeState {
    pub url: String,
    pub title: String,
    pub secure: bool,
}

/// Chrome update produced by an engine event on the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeUpdate {
    /// URL bar and lock icon must be refreshed.
    Url { url: String, secure: bool },
    /// Window title must be refreshed.
    Title(String),
}

/// True iff the URL uses the secure transport scheme.
pub fn is_secure_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false)
}
