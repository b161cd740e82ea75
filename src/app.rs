//! App Core for GenBrowser.
//!
//! Wires configuration, the navigation controller, the ad filter and the
//! download manager together. Front ends own an `App` and forward engine and
//! user input to it.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::chrome::Chrome;
use crate::engine::{DownloadRequest, InterceptedRequest, ViewFactory};
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::navigation::NavigationController;
use crate::services::ad_filter::AdFilter;
use crate::services::config_store::{ConfigStore, ConfigStoreTrait};
use crate::services::theme_engine::ThemeState;
use crate::types::download::DownloadDecision;
use crate::types::errors::TabError;
use crate::types::settings::BrowserConfig;

/// Loads `config.json` from `path` (or the platform config dir), falling
/// back to defaults when it is missing or unreadable.
pub fn load_config(path: Option<PathBuf>) -> BrowserConfig {
    let mut store = ConfigStore::new(path);
    match store.load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, path = %store.config_path().display(), "using default config");
            BrowserConfig::default()
        }
    }
}

/// Theme the window starts in.
pub fn initial_theme(config: &BrowserConfig) -> ThemeState {
    let theme = ThemeState::default();
    if config.dark_mode_on_start {
        theme.toggled()
    } else {
        theme
    }
}

/// Central application struct.
pub struct App<F: ViewFactory, C: Chrome> {
    pub controller: NavigationController<F, C>,
    pub ad_filter: Arc<AdFilter>,
    pub downloads: Arc<Mutex<DownloadManager>>,
}

impl<F: ViewFactory, C: Chrome> App<F, C> {
    pub fn new(config: BrowserConfig, factory: F, chrome: C) -> Result<Self, TabError> {
        let ad_filter = Arc::new(AdFilter::from_config(&config));
        let downloads = Arc::new(Mutex::new(DownloadManager::new()));
        Self::with_parts(config, factory, chrome, ad_filter, downloads)
    }

    /// Builds the app around a filter and download list the factory already shares.
    pub fn with_parts(
        config: BrowserConfig,
        factory: F,
        chrome: C,
        ad_filter: Arc<AdFilter>,
        downloads: Arc<Mutex<DownloadManager>>,
    ) -> Result<Self, TabError> {
        let theme = initial_theme(&config);
        info!(
            app = %config.app_name,
            homepage = %config.homepage,
            rules = ad_filter.rules().len(),
            dark = theme.is_dark(),
            "starting"
        );
        let controller = NavigationController::new(factory, chrome, config, theme)?;
        Ok(Self {
            controller,
            ad_filter,
            downloads,
        })
    }

    pub fn downloads(&self) -> MutexGuard<'_, DownloadManager> {
        self.downloads.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Routes an engine download request through the save prompt.
    pub fn handle_download<R: DownloadRequest + ?Sized>(&mut self, request: &mut R) -> DownloadDecision {
        let mut downloads = self.downloads.lock().unwrap_or_else(|e| e.into_inner());
        downloads.handle_request(request, self.controller.chrome_mut())
    }

    /// Returns true when the request was blocked.
    pub fn intercept_request<R: InterceptedRequest + ?Sized>(&self, request: &mut R) -> bool {
        self.ad_filter.intercept_request(request)
    }

    pub fn shutdown(&mut self) {
        info!(
            tabs = self.controller.tabs().len(),
            blocked = self.ad_filter.blocked_count(),
            downloads = self.downloads().list_downloads().len(),
            "shutting down"
        );
    }
}
