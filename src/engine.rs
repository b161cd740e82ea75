//! Interface to the embedded web engine.
//!
//! The core never talks to a concrete WebView. Each session owns one
//! [`WebView`] built by a [`ViewFactory`]; asynchronous results come back as
//! [`EngineEvent`]s tagged with the session they belong to.

use std::path::Path;

use crate::types::errors::EngineError;
use crate::types::tab::SessionId;

/// Per-session view handle of the embedded engine.
pub trait WebView {
    fn load_url(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);
    fn zoom_factor(&self) -> f64;
    fn set_zoom_factor(&mut self, factor: f64);
    fn find_text(&mut self, text: &str);
    fn set_html(&mut self, html: &str);
    /// Requests the page HTML. The result arrives as [`EngineEvent::HtmlExported`].
    fn export_html(&mut self);
    fn print(&mut self);
    fn title(&self) -> String;
    fn url(&self) -> String;
    fn set_visible(&mut self, visible: bool);
    /// Stops event delivery. Called exactly once, right before the view is dropped.
    fn detach(&mut self);
}

/// Creates engine views for new sessions.
pub trait ViewFactory {
    type View: WebView;

    fn create_view(&mut self, session: SessionId) -> Result<Self::View, EngineError>;
}

/// Engine callbacks, delivered on the event loop in per-session FIFO order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UrlChanged { session: SessionId, url: String },
    LoadStarted { session: SessionId },
    LoadFinished { session: SessionId, ok: bool },
    TitleChanged { session: SessionId, title: String },
    HtmlExported { session: SessionId, html: String },
}

impl EngineEvent {
    pub fn session(&self) -> SessionId {
        match self {
            EngineEvent::UrlChanged { session, .. }
            | EngineEvent::LoadStarted { session }
            | EngineEvent::LoadFinished { session, .. }
            | EngineEvent::TitleChanged { session, .. }
            | EngineEvent::HtmlExported { session, .. } => *session,
        }
    }
}

/// A download the engine wants to start.
pub trait DownloadRequest {
    fn url(&self) -> String;
    fn suggested_file_name(&self) -> String;
    /// Sets the exact destination file.
    fn set_path(&mut self, path: &Path);
    fn accept(&mut self);
}

/// An outgoing request the engine lets us veto before it is sent.
pub trait InterceptedRequest {
    fn request_url(&self) -> String;
    fn block(&mut self, blocked: bool);
}
