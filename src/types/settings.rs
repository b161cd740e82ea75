use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level browser configuration, read from `config.json`.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    pub app_name: String,
    pub homepage: String,
    pub new_tab_url: String,
    pub author_url: String,
    /// Host fragments blocked by substring match.
    pub ad_hosts: Vec<String>,
    /// Apply one theme toggle at startup (light → dark).
    pub dark_mode_on_start: bool,
    pub zoom: ZoomSettings,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            app_name: "GenBrowser".to_string(),
            homepage: "https://www.google.com".to_string(),
            new_tab_url: "https://www.google.com".to_string(),
            author_url: "https://aaditya-naik-portfolio.netlify.app/".to_string(),
            ad_hosts: Self::default_ad_hosts(),
            dark_mode_on_start: true,
            zoom: ZoomSettings::default(),
        }
    }
}

impl BrowserConfig {
    /// Returns the built-in ad host fragments.
    pub fn default_ad_hosts() -> Vec<String> {
        ["ads.google.com", "doubleclick.net", "googlesyndication.com", "adnxs.com"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }
}

/// Zoom step and clamp range applied by zoom in/out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomSettings {
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.25,
            max: 5.0,
        }
    }
}

impl ZoomSettings {
    /// Finite positive bounds with `min <= max` and a finite positive step.
    pub fn is_valid(&self) -> bool {
        [self.step, self.min, self.max].iter().all(|v| v.is_finite())
            && self.step > 0.0
            && self.min > 0.0
            && self.min <= self.max
    }

    /// Returns `self` when valid, the defaults otherwise.
    pub fn sanitized(self) -> Self {
        if self.is_valid() {
            self
        } else {
            warn!(
                step = self.step,
                min = self.min,
                max = self.max,
                "invalid zoom settings, using defaults"
            );
            Self::default()
        }
    }
}
