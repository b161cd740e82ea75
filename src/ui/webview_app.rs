//! WebView-based browser window using `wry` + `tao`.
//!
//! Architecture:
//! - One child webview per tab; only the active one is visible.
//! - `with_initialization_script(TOOLBAR_JS)` injects the toolbar on EVERY page.
//! - IPC from JS → Rust via `window.ipc.postMessage()`; engine callbacks and
//!   chrome updates are funneled through the event loop as [`UserEvent`]s.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::engine::EngineEvent;
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::services::ad_filter::AdFilter;
use crate::types::settings::BrowserConfig;
use crate::ui::toolbar::{status_script, ToolbarMessage};
use crate::ui::wry_view::{content_rect, UserEvent, WryChrome, WryViewFactory};

type BrowserApp = App<WryViewFactory, WryChrome>;

fn refresh_chrome(app: &BrowserApp) {
    let tabs = app.controller.tabs();
    let script = {
        let mut snapshot = app.controller.chrome().snapshot();
        snapshot.set_tabs(tabs.sessions().into_iter(), tabs.active_index());
        snapshot.to_script()
    };
    if let Some(view) = tabs.active_view() {
        view.eval(&script);
    }
}

fn handle_toolbar(app: &mut BrowserApp, message: ToolbarMessage) {
    let controller = &mut app.controller;
    let result = match message {
        ToolbarMessage::UiReady => {
            controller.refresh_chrome();
            Ok(())
        }
        ToolbarMessage::Navigate { url } => {
            controller.navigate(&url);
            Ok(())
        }
        ToolbarMessage::Action { name } => controller.perform(name),
        ToolbarMessage::Find { text } => {
            controller.find_on_page(&text);
            Ok(())
        }
        ToolbarMessage::SwitchTab { index } => controller.switch_tab(index),
        ToolbarMessage::CloseTab { index } => controller.close_tab(index).map(|_| ()),
        ToolbarMessage::Key { keys } => controller.handle_shortcut(&keys).map(|_| ()),
    };
    if let Err(e) = result {
        warn!(error = %e, "toolbar command failed");
    }
}

fn handle_user_event(app: &mut BrowserApp, window: &Window, event: UserEvent) {
    match event {
        UserEvent::Engine(e) => {
            let finished = matches!(e, EngineEvent::LoadFinished { .. } | EngineEvent::TitleChanged { .. });
            app.controller.handle_event(e);
            if finished {
                refresh_chrome(app);
            }
        }
        UserEvent::Toolbar(message) => {
            handle_toolbar(app, message);
            refresh_chrome(app);
        }
        UserEvent::RefreshChrome => refresh_chrome(app),
        UserEvent::Status { message, duration_ms } => {
            if let Some(view) = app.controller.tabs().active_view() {
                view.eval(&status_script(&message, duration_ms));
            }
        }
        UserEvent::WindowTitle(title) => window.set_title(&title),
        UserEvent::OpenInNewTab(url) => {
            debug!(%url, "new window request");
            if let Err(e) = app.controller.open_tab(Some(&url), "New Tab") {
                warn!(error = %e, "failed to open tab");
            }
            refresh_chrome(app);
        }
        UserEvent::DownloadFinished { url, success } => {
            app.downloads().mark_finished(&url, success);
        }
    }
}

pub fn run(config: BrowserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title(&config.app_name)
            .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );

    let chrome = WryChrome::new(proxy.clone());
    let ad_filter = Arc::new(AdFilter::from_config(&config));
    let downloads = Arc::new(Mutex::new(DownloadManager::new()));
    let factory = WryViewFactory::new(
        window.clone(),
        proxy,
        ad_filter.clone(),
        downloads.clone(),
        chrome.clone(),
    );
    let mut app = App::with_parts(config, factory, chrome, ad_filter, downloads)?;
    info!("window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                app.shutdown();
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                for view in app.controller.tabs_mut().views_mut() {
                    view.set_bounds(content_rect(&window));
                }
            }

            Event::UserEvent(user_event) => handle_user_event(&mut app, &window, user_event),

            _ => {}
        }
    })
}
