//! GenBrowser UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The toolbar is HTML/CSS/JS injected into each tab's page. Communication
//! between the Rust backend and JS frontend uses wry IPC.

pub mod toolbar;
pub mod webview_app;
pub mod wry_view;
