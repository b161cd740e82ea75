//! Ad Filter for GenBrowser.
//!
//! Vetoes outgoing requests whose destination host contains one of the
//! configured ad host fragments. Unparseable URLs are let through.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::engine::InterceptedRequest;
use crate::types::settings::BrowserConfig;

/// Request-interception filter shared by every session's view.
#[derive(Debug)]
pub struct AdFilter {
    rules: Vec<String>,
    blocked: AtomicU64,
}

impl AdFilter {
    /// Builds a filter from host fragments. Fragments are lower-cased; empty
    /// ones are dropped since they would match every host.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|r| {
                let rule = r.as_ref().trim().to_lowercase();
                if rule.is_empty() {
                    warn!("ignoring empty ad host rule");
                    None
                } else {
                    Some(rule)
                }
            })
            .collect();
        Self {
            rules,
            blocked: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(&config.ad_hosts)
    }

    /// True iff some rule is a substring of `host`.
    pub fn is_blocked(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.rules.iter().any(|rule| host.contains(rule.as_str()))
    }

    /// Host-based verdict for a full URL. Fails open.
    pub fn should_block(&self, url: &str) -> bool {
        match url::Url::parse(url) {
            Ok(parsed) => parsed.host_str().is_some_and(|host| self.is_blocked(host)),
            Err(e) => {
                debug!(url, error = %e, "unparseable request url, allowing");
                false
            }
        }
    }

    /// Evaluates an intercepted request and blocks it when it matches.
    /// Returns whether the request was blocked.
    pub fn intercept_request<R: InterceptedRequest + ?Sized>(&self, request: &mut R) -> bool {
        let url = request.request_url();
        if !self.should_block(&url) {
            return false;
        }
        let host = url::Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        info!(target: "genbrowser::adblock", %host, %url, "blocked request");
        self.blocked.fetch_add(1, Ordering::Relaxed);
        request.block(true);
        true
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}

impl Default for AdFilter {
    fn default() -> Self {
        Self::new(BrowserConfig::default_ad_hosts())
    }
}
