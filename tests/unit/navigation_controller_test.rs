use std::fs;
use std::time::Duration;

use genbrowser::chrome::SecurityIcon;
use genbrowser::engine::EngineEvent;
use genbrowser::headless::{HeadlessViewFactory, Prompt, RecordingChrome, ViewCommand};
use genbrowser::managers::navigation::NavigationController;
use genbrowser::services::theme_engine::{dark_palette, light_palette, ThemeState};
use genbrowser::types::action::BrowserAction;
use genbrowser::types::settings::{BrowserConfig, ZoomSettings};

type Controller = NavigationController<HeadlessViewFactory, RecordingChrome>;

fn controller() -> Controller {
    NavigationController::new(
        HeadlessViewFactory::new(),
        RecordingChrome::new(),
        BrowserConfig::default(),
        ThemeState::default(),
    )
    .unwrap()
}

fn last_command(c: &Controller) -> Option<ViewCommand> {
    c.tabs().active_view().and_then(|v| v.last_command().cloned())
}

#[test]
fn test_starts_with_home_session() {
    let c = controller();
    assert_eq!(c.tabs().len(), 1);
    let home = c.tabs().active_session().unwrap();
    assert_eq!(home.label, "Home");
    assert_eq!(home.url, "https://www.google.com");
    assert_eq!(c.chrome().url_text, "https://www.google.com");
    assert_eq!(c.chrome().security_icon, Some(SecurityIcon::Secure));
    assert_eq!(c.chrome().window_title, "GenBrowser");
}

#[test]
fn test_navigate_prefixes_scheme() {
    let mut c = controller();
    assert_eq!(c.navigate("example.com").as_deref(), Some("http://example.com"));
    assert_eq!(last_command(&c), Some(ViewCommand::LoadUrl("http://example.com".into())));
}

#[test]
fn test_navigate_keeps_https() {
    let mut c = controller();
    assert_eq!(
        c.navigate("https://example.com").as_deref(),
        Some("https://example.com")
    );
}

#[test]
fn test_navigate_empty_input_is_ignored() {
    let mut c = controller();
    let before = c.tabs().active_view().unwrap().commands.len();
    assert_eq!(c.navigate("   "), None);
    assert_eq!(c.tabs().active_view().unwrap().commands.len(), before);
}

#[test]
fn test_url_change_updates_bar_and_lock() {
    let mut c = controller();
    let id = c.tabs().active_session().unwrap().id;
    c.handle_event(EngineEvent::UrlChanged {
        session: id,
        url: "http://plain.example/".into(),
    });
    assert_eq!(c.chrome().url_text, "http://plain.example/");
    assert_eq!(c.chrome().security_icon, Some(SecurityIcon::Insecure));
}

#[test]
fn test_load_finished_sets_window_title() {
    let mut c = controller();
    let id = c.tabs().active_session().unwrap().id;
    c.tabs_mut().active_view_mut().unwrap().page_title = "Example Domain".into();
    c.handle_event(EngineEvent::LoadFinished { session: id, ok: true });
    assert_eq!(c.chrome().window_title, "Example Domain - GenBrowser");
}

#[test]
fn test_background_events_leave_chrome_alone() {
    let mut c = controller();
    let home = c.tabs().active_session().unwrap().id;
    c.new_tab().unwrap();
    let shown = c.chrome().url_text.clone();
    c.handle_event(EngineEvent::UrlChanged {
        session: home,
        url: "https://elsewhere.example".into(),
    });
    assert_eq!(c.chrome().url_text, shown);
}

#[test]
fn test_switch_tab_renders_that_session() {
    let mut c = controller();
    c.open_tab(Some("http://second.example"), "Second").unwrap();
    assert_eq!(c.chrome().url_text, "http://second.example");
    c.switch_tab(0).unwrap();
    assert_eq!(c.chrome().url_text, "https://www.google.com");
    assert_eq!(c.chrome().security_icon, Some(SecurityIcon::Secure));
}

#[test]
fn test_zoom_steps_and_clamps() {
    let mut c = controller();
    assert_eq!(c.zoom_in(), Some(1.1));
    assert_eq!(c.zoom_in(), Some(1.2));
    assert_eq!(c.zoom_out(), Some(1.1));

    for _ in 0..20 {
        c.zoom_out();
    }
    assert_eq!(c.zoom_out(), Some(0.25));

    for _ in 0..60 {
        c.zoom_in();
    }
    assert_eq!(c.zoom_in(), Some(5.0));
}

#[test]
fn test_inverted_zoom_range_uses_default_bounds() {
    let config = BrowserConfig {
        zoom: ZoomSettings {
            step: 0.1,
            min: 5.0,
            max: 0.25,
        },
        ..BrowserConfig::default()
    };
    let mut c = NavigationController::new(
        HeadlessViewFactory::new(),
        RecordingChrome::new(),
        config,
        ThemeState::default(),
    )
    .unwrap();
    assert_eq!(c.zoom_in(), Some(1.1));
    for _ in 0..20 {
        c.zoom_out();
    }
    assert_eq!(c.zoom_out(), Some(0.25));
}

#[test]
fn test_history_commands_reach_active_view() {
    let mut c = controller();
    c.back();
    assert_eq!(last_command(&c), Some(ViewCommand::Back));
    c.forward();
    assert_eq!(last_command(&c), Some(ViewCommand::Forward));
    c.reload();
    assert_eq!(last_command(&c), Some(ViewCommand::Reload));
    c.stop();
    assert_eq!(last_command(&c), Some(ViewCommand::Stop));
    c.find_on_page("rust");
    assert_eq!(last_command(&c), Some(ViewCommand::FindText("rust".into())));
}

#[test]
fn test_home_and_author_page() {
    let mut c = controller();
    c.home();
    assert_eq!(
        last_command(&c),
        Some(ViewCommand::LoadUrl("https://www.google.com".into()))
    );
    c.open_author_page();
    assert_eq!(
        last_command(&c),
        Some(ViewCommand::LoadUrl(
            "https://aaditya-naik-portfolio.netlify.app/".into()
        ))
    );
}

#[test]
fn test_open_file_loads_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<h1>hi</h1>").unwrap();

    let mut c = controller();
    c.chrome_mut().answer_open(Some(path.clone()));
    c.open_file();

    assert_eq!(last_command(&c), Some(ViewCommand::SetHtml("<h1>hi</h1>".into())));
    assert_eq!(c.chrome().url_text, path.display().to_string());
    assert_eq!(
        c.chrome().prompts.last(),
        Some(&Prompt::Open {
            title: "Open file".into()
        })
    );
}

#[test]
fn test_open_file_failure_shows_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller();
    c.chrome_mut().answer_open(Some(dir.path().join("missing.html")));
    c.open_file();

    let (message, duration) = c.chrome().last_status().unwrap();
    assert!(message.starts_with("Failed to open file: "), "{}", message);
    assert_eq!(*duration, Duration::from_millis(5000));
}

#[test]
fn test_open_file_cancel_does_nothing() {
    let mut c = controller();
    let before = c.tabs().active_view().unwrap().commands.len();
    c.open_file();
    assert_eq!(c.tabs().active_view().unwrap().commands.len(), before);
    assert!(c.chrome().statuses.is_empty());
}

#[test]
fn test_save_page_writes_exported_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.html");

    let mut c = controller();
    let id = c.tabs().active_session().unwrap().id;
    c.chrome_mut().answer_save(Some(path.clone()));
    c.save_page();
    assert_eq!(last_command(&c), Some(ViewCommand::ExportHtml));

    c.handle_event(EngineEvent::HtmlExported {
        session: id,
        html: "<html>saved</html>".into(),
    });
    assert_eq!(fs::read_to_string(&path).unwrap(), "<html>saved</html>");
}

#[test]
fn test_save_page_cancel_requests_nothing() {
    let mut c = controller();
    c.save_page();
    assert_ne!(last_command(&c), Some(ViewCommand::ExportHtml));
    assert_eq!(
        c.chrome().prompts.last(),
        Some(&Prompt::Save {
            title: "Save Page As".into(),
            suggested_name: String::new()
        })
    );
}

#[test]
fn test_save_page_write_failure_shows_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("saved.html");

    let mut c = controller();
    let id = c.tabs().active_session().unwrap().id;
    c.chrome_mut().answer_save(Some(path));
    c.save_page();
    c.handle_event(EngineEvent::HtmlExported {
        session: id,
        html: "<html></html>".into(),
    });

    let (message, duration) = c.chrome().last_status().unwrap();
    assert!(message.starts_with("Failed to save: "), "{}", message);
    assert_eq!(*duration, Duration::from_millis(5000));
}

#[test]
fn test_export_from_closed_session_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.html");

    let mut c = controller();
    c.new_tab().unwrap();
    let second = c.tabs().active_session().unwrap().id;
    c.chrome_mut().answer_save(Some(path.clone()));
    c.save_page();
    assert!(c.close_current_tab().unwrap());

    c.handle_event(EngineEvent::HtmlExported {
        session: second,
        html: "<html></html>".into(),
    });
    assert!(!path.exists());
}

#[test]
fn test_print_reaches_view() {
    let mut c = controller();
    c.print_page();
    assert_eq!(last_command(&c), Some(ViewCommand::Print));
}

#[test]
fn test_toggle_theme_swaps_palettes() {
    let mut c = controller();
    assert_eq!(c.chrome().palettes.last(), Some(&light_palette()));
    assert!(c.toggle_theme().is_dark());
    assert_eq!(c.chrome().palettes.last(), Some(&dark_palette()));
    assert!(!c.toggle_theme().is_dark());
    assert_eq!(c.chrome().palettes.last(), Some(&light_palette()));
}

#[test]
fn test_about_dialog_content() {
    let mut c = controller();
    c.show_about();
    let about = c.chrome().about.last().unwrap();
    assert_eq!(about.name, "GenBrowser");
    assert_eq!(about.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(about.copyright, "© 2015 GenBrowser Inc.");
}

#[test]
fn test_perform_new_and_close_tab() {
    let mut c = controller();
    c.perform(BrowserAction::NewTab).unwrap();
    assert_eq!(c.tabs().len(), 2);
    assert_eq!(c.tabs().active_session().unwrap().label, "New Tab");
    c.perform(BrowserAction::CloseTab).unwrap();
    assert_eq!(c.tabs().len(), 1);
    c.perform(BrowserAction::CloseTab).unwrap();
    assert_eq!(c.tabs().len(), 1);
}

#[test]
fn test_shortcuts_dispatch_actions() {
    let mut c = controller();
    assert_eq!(c.handle_shortcut("Ctrl+T").unwrap(), Some(BrowserAction::NewTab));
    assert_eq!(c.tabs().len(), 2);
    assert_eq!(c.handle_shortcut("Ctrl+Q").unwrap(), None);
    assert_eq!(c.tabs().len(), 2);
}
