//! Windowless collaborators.
//!
//! [`HeadlessView`] and [`RecordingChrome`] stand in for the engine and the
//! toolkit: they record every command they receive so the console demo can
//! print it and tests can assert on it. Dialog answers are queued up front.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::chrome::{AboutInfo, Chrome, SecurityIcon};
use crate::engine::{DownloadRequest, InterceptedRequest, ViewFactory, WebView};
use crate::types::errors::EngineError;
use crate::types::tab::SessionId;
use crate::types::theme::Palette;

/// A command received by a [`HeadlessView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    LoadUrl(String),
    Back,
    Forward,
    Reload,
    Stop,
    SetZoom(f64),
    FindText(String),
    SetHtml(String),
    ExportHtml,
    Print,
}

/// In-memory engine view.
#[derive(Debug)]
pub struct HeadlessView {
    pub session: SessionId,
    pub commands: Vec<ViewCommand>,
    pub page_title: String,
    pub current_url: String,
    pub zoom: f64,
    pub visible: bool,
    detached: Rc<RefCell<Vec<SessionId>>>,
}

impl HeadlessView {
    pub fn last_command(&self) -> Option<&ViewCommand> {
        self.commands.last()
    }
}

impl WebView for HeadlessView {
    fn load_url(&mut self, url: &str) {
        self.current_url = url.to_string();
        self.commands.push(ViewCommand::LoadUrl(url.to_string()));
    }

    fn back(&mut self) {
        self.commands.push(ViewCommand::Back);
    }

    fn forward(&mut self) {
        self.commands.push(ViewCommand::Forward);
    }

    fn reload(&mut self) {
        self.commands.push(ViewCommand::Reload);
    }

    fn stop(&mut self) {
        self.commands.push(ViewCommand::Stop);
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.zoom = factor;
        self.commands.push(ViewCommand::SetZoom(factor));
    }

    fn find_text(&mut self, text: &str) {
        self.commands.push(ViewCommand::FindText(text.to_string()));
    }

    fn set_html(&mut self, html: &str) {
        self.commands.push(ViewCommand::SetHtml(html.to_string()));
    }

    fn export_html(&mut self) {
        self.commands.push(ViewCommand::ExportHtml);
    }

    fn print(&mut self) {
        self.commands.push(ViewCommand::Print);
    }

    fn title(&self) -> String {
        self.page_title.clone()
    }

    fn url(&self) -> String {
        self.current_url.clone()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn detach(&mut self) {
        self.detached.borrow_mut().push(self.session);
    }
}

/// Builds [`HeadlessView`]s and remembers which sessions were created and detached.
#[derive(Debug, Default)]
pub struct HeadlessViewFactory {
    created: Vec<SessionId>,
    detached: Rc<RefCell<Vec<SessionId>>>,
    fail_next: bool,
}

impl HeadlessViewFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_view` call fail.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn created(&self) -> &[SessionId] {
        &self.created
    }

    pub fn detached(&self) -> Vec<SessionId> {
        self.detached.borrow().clone()
    }
}

impl ViewFactory for HeadlessViewFactory {
    type View = HeadlessView;

    fn create_view(&mut self, session: SessionId) -> Result<HeadlessView, EngineError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(EngineError::Build("headless view refused".to_string()));
        }
        self.created.push(session);
        Ok(HeadlessView {
            session,
            commands: Vec::new(),
            page_title: String::new(),
            current_url: String::new(),
            zoom: 1.0,
            visible: false,
            detached: Rc::clone(&self.detached),
        })
    }
}

/// A dialog the chrome was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Save { title: String, suggested_name: String },
    Open { title: String },
}

/// Chrome that records what it would display.
#[derive(Debug, Default)]
pub struct RecordingChrome {
    pub url_text: String,
    pub security_icon: Option<SecurityIcon>,
    pub window_title: String,
    pub statuses: Vec<(String, Duration)>,
    pub palettes: Vec<Palette>,
    pub about: Vec<AboutInfo>,
    pub prompts: Vec<Prompt>,
    save_answers: VecDeque<Option<PathBuf>>,
    open_answers: VecDeque<Option<PathBuf>>,
}

impl RecordingChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next save dialog. Unanswered dialogs cancel.
    pub fn answer_save(&mut self, answer: Option<PathBuf>) {
        self.save_answers.push_back(answer);
    }

    /// Queues the answer for the next open dialog. Unanswered dialogs cancel.
    pub fn answer_open(&mut self, answer: Option<PathBuf>) {
        self.open_answers.push_back(answer);
    }

    pub fn last_status(&self) -> Option<&(String, Duration)> {
        self.statuses.last()
    }
}

impl Chrome for RecordingChrome {
    fn set_url_text(&mut self, text: &str) {
        debug!(text, "url bar");
        self.url_text = text.to_string();
    }

    fn set_security_icon(&mut self, icon: SecurityIcon) {
        self.security_icon = Some(icon);
    }

    fn set_window_title(&mut self, title: &str) {
        debug!(title, "window title");
        self.window_title = title.to_string();
    }

    fn show_status(&mut self, message: &str, duration: Duration) {
        debug!(message, ms = duration.as_millis() as u64, "status");
        self.statuses.push((message.to_string(), duration));
    }

    fn prompt_save_path(&mut self, title: &str, suggested_name: &str) -> Option<PathBuf> {
        self.prompts.push(Prompt::Save {
            title: title.to_string(),
            suggested_name: suggested_name.to_string(),
        });
        self.save_answers.pop_front().flatten()
    }

    fn prompt_open_path(&mut self, title: &str) -> Option<PathBuf> {
        self.prompts.push(Prompt::Open {
            title: title.to_string(),
        });
        self.open_answers.pop_front().flatten()
    }

    fn apply_palette(&mut self, palette: &Palette) {
        self.palettes.push(palette.clone());
    }

    fn show_about(&mut self, info: &AboutInfo) {
        self.about.push(info.clone());
    }
}

/// Download request raised by a test or the demo.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDownload {
    pub source_url: String,
    pub suggested_name: String,
    pub path: Option<PathBuf>,
    pub accepted: bool,
}

impl HeadlessDownload {
    pub fn new(source_url: &str, suggested_name: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            suggested_name: suggested_name.to_string(),
            ..Self::default()
        }
    }
}

impl DownloadRequest for HeadlessDownload {
    fn url(&self) -> String {
        self.source_url.clone()
    }

    fn suggested_file_name(&self) -> String {
        self.suggested_name.clone()
    }

    fn set_path(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
    }

    fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Outgoing request seen by the ad filter.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRequest {
    pub url: String,
    pub blocked: bool,
}

impl HeadlessRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            blocked: false,
        }
    }
}

impl InterceptedRequest for HeadlessRequest {
    fn request_url(&self) -> String {
        self.url.clone()
    }

    fn block(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}
