//! Navigation Chrome Controller for GenBrowser.
//!
//! Turns toolbar, menu, shortcut and URL-bar input into commands on the
//! active session, and renders the active session's state into the chrome.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chrome::{AboutInfo, Chrome, SecurityIcon};
use crate::engine::{EngineEvent, ViewFactory, WebView};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_manager::{EventKind, TabManager};
use crate::services::page_io;
use crate::services::theme_engine::ThemeState;
use crate::types::action::BrowserAction;
use crate::types::errors::TabError;
use crate::types::settings::BrowserConfig;
use crate::types::tab::{is_secure_url, ChromeState, ChromeUpdate, SessionId};

pub const FILE_ERROR_STATUS: Duration = Duration::from_millis(5000);

/// Prefixes `http://` when the input has no URL scheme. Empty input yields `None`.
pub fn normalize_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match url::Url::parse(trimmed) {
        Ok(_) => Some(trimmed.to_string()),
        Err(_) => Some(format!("http://{}", trimmed)),
    }
}

/// Rounds to two decimals and clamps into `[min, max]`.
fn clamp_zoom(factor: f64, min: f64, max: f64) -> f64 {
    ((factor * 100.0).round() / 100.0).clamp(min, max)
}

/// Owns the tab collection and the chrome, and keeps them in sync.
pub struct NavigationController<F: ViewFactory, C: Chrome> {
    tabs: TabManager<F>,
    chrome: C,
    config: BrowserConfig,
    theme: ThemeState,
    shortcuts: ShortcutManager,
    pending_save: Option<(SessionId, PathBuf)>,
}

impl<F: ViewFactory, C: Chrome> NavigationController<F, C> {
    /// Applies `theme` and opens the initial "Home" session.
    pub fn new(factory: F, chrome: C, mut config: BrowserConfig, theme: ThemeState) -> Result<Self, TabError> {
        config.zoom = config.zoom.sanitized();
        let mut controller = Self {
            tabs: TabManager::new(factory),
            chrome,
            config,
            theme,
            shortcuts: ShortcutManager::new(),
            pending_save: None,
        };
        controller.theme.apply(&mut controller.chrome);
        let homepage = controller.config.homepage.clone();
        controller.open_tab(Some(&homepage), "Home")?;
        Ok(controller)
    }

    pub fn tabs(&self) -> &TabManager<F> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager<F> {
        &mut self.tabs
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn theme(&self) -> ThemeState {
        self.theme
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutManager {
        &mut self.shortcuts
    }

    // ─── Tab lifecycle ───

    pub fn open_tab(&mut self, url: Option<&str>, label: &str) -> Result<SessionId, TabError> {
        let id = self.tabs.open_session(url, label)?;
        self.refresh_chrome();
        Ok(id)
    }

    /// Ctrl+T.
    pub fn new_tab(&mut self) -> Result<SessionId, TabError> {
        let url = self.config.new_tab_url.clone();
        self.open_tab(Some(&url), "New Tab")
    }

    pub fn close_tab(&mut self, index: usize) -> Result<bool, TabError> {
        let closed = self.tabs.close_session(index)?;
        if closed {
            if let Some((session, _)) = &self.pending_save {
                if self.tabs.index_of(*session).is_none() {
                    debug!(%session, "dropping page save for closed session");
                    self.pending_save = None;
                }
            }
            self.refresh_chrome();
        }
        Ok(closed)
    }

    /// Ctrl+W.
    pub fn close_current_tab(&mut self) -> Result<bool, TabError> {
        match self.tabs.active_index() {
            Some(index) => self.close_tab(index),
            None => Ok(false),
        }
    }

    pub fn switch_tab(&mut self, index: usize) -> Result<(), TabError> {
        let state = self.tabs.activate_session(index)?;
        self.render(&state);
        Ok(())
    }

    // ─── Navigation ───

    fn with_active_view(&mut self, f: impl FnOnce(&mut F::View)) -> bool {
        match self.tabs.active_view_mut() {
            Some(view) => {
                f(view);
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        self.with_active_view(|v| v.back());
    }

    pub fn forward(&mut self) {
        self.with_active_view(|v| v.forward());
    }

    pub fn reload(&mut self) {
        self.with_active_view(|v| v.reload());
    }

    pub fn stop(&mut self) {
        self.with_active_view(|v| v.stop());
    }

    pub fn home(&mut self) {
        let url = self.config.homepage.clone();
        self.tabs.navigate_active(&url);
    }

    /// URL-bar submission. Returns the URL dispatched to the active session.
    pub fn navigate(&mut self, raw: &str) -> Option<String> {
        let url = normalize_input(raw)?;
        if !self.tabs.navigate_active(&url) {
            return None;
        }
        debug!(%url, "navigate");
        Some(url)
    }

    pub fn find_on_page(&mut self, text: &str) {
        self.with_active_view(|v| v.find_text(text));
    }

    pub fn zoom_in(&mut self) -> Option<f64> {
        let step = self.config.zoom.step;
        self.adjust_zoom(step)
    }

    pub fn zoom_out(&mut self) -> Option<f64> {
        let step = self.config.zoom.step;
        self.adjust_zoom(-step)
    }

    fn adjust_zoom(&mut self, delta: f64) -> Option<f64> {
        let (min, max) = (self.config.zoom.min, self.config.zoom.max);
        let view = self.tabs.active_view_mut()?;
        let factor = clamp_zoom(view.zoom_factor() + delta, min, max);
        view.set_zoom_factor(factor);
        Some(factor)
    }

    // ─── Chrome rendering ───

    /// URL bar text and lock icon.
    pub fn on_url_changed(&mut self, url: &str) {
        self.chrome.set_url_text(url);
        self.chrome
            .set_security_icon(SecurityIcon::for_secure(is_secure_url(url)));
    }

    /// Window title from the active session's page title.
    pub fn on_load_finished(&mut self) {
        let title = self
            .tabs
            .active_session()
            .map(|s| s.title.clone())
            .unwrap_or_default();
        self.render_title(&title);
    }

    fn render_title(&mut self, page_title: &str) {
        let title = if page_title.is_empty() {
            self.config.app_name.clone()
        } else {
            format!("{} - {}", page_title, self.config.app_name)
        };
        self.chrome.set_window_title(&title);
    }

    fn render(&mut self, state: &ChromeState) {
        self.on_url_changed(&state.url);
        self.render_title(&state.title);
    }

    /// Re-renders the active session into the chrome.
    pub fn refresh_chrome(&mut self) {
        if let Some(state) = self.tabs.active_session().map(|s| s.chrome_state()) {
            self.render(&state);
        }
    }

    /// Routes an engine event to its session and refreshes the chrome when needed.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if let EngineEvent::HtmlExported { session, html } = &event {
            self.finish_save(*session, html);
            return;
        }
        match self.tabs.apply_event(&event) {
            Some(ChromeUpdate::Url { url, .. }) => self.on_url_changed(&url),
            Some(ChromeUpdate::Title(_)) => {
                if let Some(url) = self.tabs.active_session().map(|s| s.url.clone()) {
                    self.on_url_changed(&url);
                }
                self.on_load_finished();
            }
            None => {}
        }
    }

    // ─── File menu ───

    pub fn open_file(&mut self) {
        if self.tabs.active_session().is_none() {
            return;
        }
        let Some(path) = self.chrome.prompt_open_path("Open file") else {
            return;
        };
        match page_io::read_page(&path) {
            Ok(html) => {
                self.with_active_view(|v| v.set_html(&html));
                self.chrome.set_url_text(&path.display().to_string());
                info!(path = %path.display(), "opened local file");
            }
            Err(e) => {
                warn!(error = %e, "open file failed");
                self.chrome
                    .show_status(&format!("Failed to open file: {}", e), FILE_ERROR_STATUS);
            }
        }
    }

    /// Asks for a destination, then requests the page HTML; the write
    /// happens when the engine delivers it.
    pub fn save_page(&mut self) {
        let Some(session) = self.tabs.active_session().map(|s| s.id) else {
            return;
        };
        let Some(path) = self.chrome.prompt_save_path("Save Page As", "") else {
            return;
        };
        self.pending_save = Some((session, path));
        self.with_active_view(|v| v.export_html());
    }

    fn finish_save(&mut self, session: SessionId, html: &str) {
        if !self
            .tabs
            .subscriptions()
            .is_subscribed(session, EventKind::HtmlExported)
        {
            debug!(%session, "dropping html export for closed session");
            return;
        }
        let path = match self.pending_save.take() {
            Some((pending, path)) if pending == session => path,
            other => {
                self.pending_save = other;
                debug!(%session, "html export without a matching save request");
                return;
            }
        };
        match page_io::write_page(&path, html) {
            Ok(()) => info!(path = %path.display(), "saved page"),
            Err(e) => {
                warn!(error = %e, "save page failed");
                self.chrome
                    .show_status(&format!("Failed to save: {}", e), FILE_ERROR_STATUS);
            }
        }
    }

    pub fn print_page(&mut self) {
        self.with_active_view(|v| v.print());
    }

    // ─── View / Help menus ───

    pub fn toggle_theme(&mut self) -> ThemeState {
        self.theme = self.theme.toggled();
        self.theme.apply(&mut self.chrome);
        self.theme
    }

    pub fn show_about(&mut self) {
        let info = AboutInfo {
            name: self.config.app_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            copyright: format!("© 2015 {} Inc.", self.config.app_name),
        };
        self.chrome.show_about(&info);
    }

    pub fn open_author_page(&mut self) {
        let url = self.config.author_url.clone();
        self.tabs.navigate_active(&url);
    }

    pub fn perform(&mut self, action: BrowserAction) -> Result<(), TabError> {
        debug!(%action, "perform");
        match action {
            BrowserAction::NewTab => {
                self.new_tab()?;
            }
            BrowserAction::CloseTab => {
                self.close_current_tab()?;
            }
            BrowserAction::Back => self.back(),
            BrowserAction::Forward => self.forward(),
            BrowserAction::Reload => self.reload(),
            BrowserAction::Stop => self.stop(),
            BrowserAction::Home => self.home(),
            BrowserAction::ZoomIn => {
                self.zoom_in();
            }
            BrowserAction::ZoomOut => {
                self.zoom_out();
            }
            BrowserAction::OpenFile => self.open_file(),
            BrowserAction::SavePage => self.save_page(),
            BrowserAction::Print => self.print_page(),
            BrowserAction::ToggleTheme => {
                self.toggle_theme();
            }
            BrowserAction::About => self.show_about(),
            BrowserAction::AuthorPage => self.open_author_page(),
        }
        Ok(())
    }

    /// Runs the action bound to `keys`, if any.
    pub fn handle_shortcut(&mut self, keys: &str) -> Result<Option<BrowserAction>, TabError> {
        let Some(action) = self.shortcuts.resolve(keys) else {
            return Ok(None);
        };
        self.perform(action)?;
        Ok(Some(action))
    }
}
