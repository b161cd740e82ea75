//! wry-backed engine views and the toolbar-rendered chrome.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tracing::{debug, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebViewBuilder};

use crate::chrome::{AboutInfo, Chrome, SecurityIcon};
use crate::engine::{DownloadRequest, EngineEvent, InterceptedRequest, ViewFactory, WebView};
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::platform;
use crate::services::ad_filter::AdFilter;
use crate::services::theme_engine;
use crate::types::errors::EngineError;
use crate::types::tab::SessionId;
use crate::types::theme::Palette;
use crate::ui::toolbar::{self, ChromeSnapshot, ToolbarMessage, TOOLBAR_JS};

#[derive(Debug)]
pub enum UserEvent {
    Engine(EngineEvent),
    Toolbar(ToolbarMessage),
    RefreshChrome,
    Status { message: String, duration_ms: u64 },
    WindowTitle(String),
    OpenInNewTab(String),
    DownloadFinished { url: String, success: bool },
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Full window area in logical pixels.
pub fn content_rect(window: &Window) -> Rect {
    let size = window.inner_size();
    let scale = window.scale_factor();
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(size.width as f64 / scale, size.height as f64 / scale).into(),
    }
}

// ─── Chrome ───

/// Chrome drawn by the injected toolbar of the active view.
#[derive(Clone)]
pub struct WryChrome {
    proxy: EventLoopProxy<UserEvent>,
    snapshot: Arc<Mutex<ChromeSnapshot>>,
}

impl WryChrome {
    pub fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy,
            snapshot: Arc::new(Mutex::new(ChromeSnapshot::default())),
        }
    }

    pub fn snapshot(&self) -> MutexGuard<'_, ChromeSnapshot> {
        lock(&self.snapshot)
    }

    fn send(&self, event: UserEvent) {
        if self.proxy.send_event(event).is_err() {
            debug!("event loop closed");
        }
    }
}

impl Chrome for WryChrome {
    fn set_url_text(&mut self, text: &str) {
        self.snapshot().url_text = text.to_string();
        self.send(UserEvent::RefreshChrome);
    }

    fn set_security_icon(&mut self, icon: SecurityIcon) {
        self.snapshot().secure = icon == SecurityIcon::Secure;
        self.send(UserEvent::RefreshChrome);
    }

    fn set_window_title(&mut self, title: &str) {
        self.send(UserEvent::WindowTitle(title.to_string()));
    }

    fn show_status(&mut self, message: &str, duration: Duration) {
        self.send(UserEvent::Status {
            message: message.to_string(),
            duration_ms: duration.as_millis() as u64,
        });
    }

    fn prompt_save_path(&mut self, title: &str, suggested_name: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .set_directory(platform::get_download_dir());
        if !suggested_name.is_empty() {
            dialog = dialog.set_file_name(suggested_name);
        }
        dialog.save_file()
    }

    fn prompt_open_path(&mut self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("HTML files", &["html", "htm"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn apply_palette(&mut self, palette: &Palette) {
        self.snapshot().css = theme_engine::css_variables(palette);
        self.send(UserEvent::RefreshChrome);
    }

    fn show_about(&mut self, info: &AboutInfo) {
        rfd::MessageDialog::new()
            .set_title(format!("About {}", info.name))
            .set_description(format!("{} {}\n\n{}", info.name, info.version, info.copyright))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

// ─── Engine adapters ───

struct NavigationRequest {
    url: String,
    blocked: bool,
}

impl InterceptedRequest for NavigationRequest {
    fn request_url(&self) -> String {
        self.url.clone()
    }

    fn block(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}

struct WryDownload<'a> {
    url: String,
    path: &'a mut PathBuf,
    accepted: bool,
}

impl DownloadRequest for WryDownload<'_> {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn suggested_file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .or_else(|| {
                url::Url::parse(&self.url).ok().and_then(|u| {
                    u.path_segments()
                        .and_then(|mut s| s.next_back().map(str::to_string))
                        .filter(|s| !s.is_empty())
                })
            })
            .unwrap_or_else(|| "download".to_string())
    }

    fn set_path(&mut self, path: &Path) {
        *self.path = path.to_path_buf();
    }

    fn accept(&mut self) {
        self.accepted = true;
    }
}

// ─── Views ───

pub struct WryView {
    session: SessionId,
    webview: wry::WebView,
    zoom: f64,
    title: Arc<Mutex<String>>,
    proxy: EventLoopProxy<UserEvent>,
}

impl WryView {
    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            debug!(error = %e, "set_bounds failed");
        }
    }

    pub fn eval(&self, js: &str) {
        if let Err(e) = self.webview.evaluate_script(js) {
            warn!(session = %self.session, error = %e, "script failed");
        }
    }
}

impl WebView for WryView {
    fn load_url(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            warn!(%url, error = %e, "load_url failed");
        }
    }

    fn back(&mut self) {
        self.eval("history.back()");
    }

    fn forward(&mut self) {
        self.eval("history.forward()");
    }

    fn reload(&mut self) {
        self.eval("location.reload()");
    }

    fn stop(&mut self) {
        self.eval("window.stop()");
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.zoom = factor;
        if let Err(e) = self.webview.zoom(factor) {
            warn!(error = %e, "zoom failed");
        }
    }

    fn find_text(&mut self, text: &str) {
        let needle = serde_json::to_string(text).unwrap_or_default();
        self.eval(&format!("window.find({})", needle));
    }

    fn set_html(&mut self, html: &str) {
        if let Err(e) = self.webview.load_html(html) {
            warn!(error = %e, "load_html failed");
        }
    }

    fn export_html(&mut self) {
        let proxy = self.proxy.clone();
        let session = self.session;
        let result = self.webview.evaluate_script_with_callback(
            "document.documentElement.outerHTML",
            move |raw| {
                let html = serde_json::from_str::<String>(&raw).unwrap_or(raw);
                let _ = proxy.send_event(UserEvent::Engine(EngineEvent::HtmlExported { session, html }));
            },
        );
        if let Err(e) = result {
            warn!(error = %e, "html export failed");
        }
    }

    fn print(&mut self) {
        if let Err(e) = self.webview.print() {
            warn!(error = %e, "print failed");
        }
    }

    fn title(&self) -> String {
        lock(&self.title).clone()
    }

    fn url(&self) -> String {
        self.webview.url().unwrap_or_default()
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            debug!(error = %e, "set_visible failed");
        }
    }

    fn detach(&mut self) {
        self.set_visible(false);
    }
}

/// Builds one child webview per session inside the browser window.
pub struct WryViewFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    ad_filter: Arc<AdFilter>,
    downloads: Arc<Mutex<DownloadManager>>,
    chrome: WryChrome,
}

impl WryViewFactory {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        ad_filter: Arc<AdFilter>,
        downloads: Arc<Mutex<DownloadManager>>,
        chrome: WryChrome,
    ) -> Self {
        Self {
            window,
            proxy,
            ad_filter,
            downloads,
            chrome,
        }
    }
}

impl ViewFactory for WryViewFactory {
    type View = WryView;

    fn create_view(&mut self, session: SessionId) -> Result<WryView, EngineError> {
        let title = Arc::new(Mutex::new(String::new()));

        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let title_slot = title.clone();
        let nw_proxy = self.proxy.clone();
        let done_proxy = self.proxy.clone();
        let nav_filter = self.ad_filter.clone();
        let nw_filter = self.ad_filter.clone();
        let downloads = self.downloads.clone();
        let chrome = self.chrome.clone();

        let builder = WebViewBuilder::new()
            .with_initialization_script(TOOLBAR_JS)
            .with_bounds(content_rect(&self.window))
            .with_devtools(cfg!(debug_assertions))
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                match toolbar::parse_message(msg.body()) {
                    Ok(m) => {
                        let _ = ipc_proxy.send_event(UserEvent::Toolbar(m));
                    }
                    Err(e) => warn!(error = %e, "bad toolbar message"),
                }
            })
            .with_navigation_handler(move |url| {
                let mut request = NavigationRequest { url, blocked: false };
                !nav_filter.intercept_request(&mut request)
            })
            .with_on_page_load_handler(move |event, url| {
                let events = match event {
                    PageLoadEvent::Started => vec![
                        EngineEvent::LoadStarted { session },
                        EngineEvent::UrlChanged { session, url },
                    ],
                    PageLoadEvent::Finished => vec![
                        EngineEvent::UrlChanged { session, url },
                        EngineEvent::LoadFinished { session, ok: true },
                    ],
                };
                for e in events {
                    let _ = load_proxy.send_event(UserEvent::Engine(e));
                }
            })
            .with_document_title_changed_handler(move |t| {
                *lock(&title_slot) = t.clone();
                let _ = title_proxy.send_event(UserEvent::Engine(EngineEvent::TitleChanged { session, title: t }));
            })
            .with_download_started_handler(move |url, path| {
                let mut request = WryDownload {
                    url,
                    path,
                    accepted: false,
                };
                let mut chrome = chrome.clone();
                lock(&downloads).handle_request(&mut request, &mut chrome);
                request.accepted
            })
            .with_download_completed_handler(move |url, _path, success| {
                let _ = done_proxy.send_event(UserEvent::DownloadFinished { url, success });
            })
            .with_new_window_req_handler(move |url, _features| {
                let mut request = NavigationRequest { url, blocked: false };
                if !nw_filter.intercept_request(&mut request) {
                    let _ = nw_proxy.send_event(UserEvent::OpenInNewTab(request.url));
                }
                wry::NewWindowResponse::Deny
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or_else(|| EngineError::Build("no GTK container".to_string()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build_as_child(&*self.window);

        let webview = webview.map_err(|e| EngineError::Build(e.to_string()))?;
        debug!(%session, "webview created");

        Ok(WryView {
            session,
            webview,
            zoom: 1.0,
            title,
            proxy: self.proxy.clone(),
        })
    }
}
