//! GenBrowser: a minimal tabbed desktop browser shell.
//!
//! Entry point: opens the browser window when built with the `gui` feature.
//! Without it, drives the browser core against headless views as a console demo.

#[cfg(feature = "gui")]
fn main() {
    genbrowser::init_logging();
    let config = genbrowser::app::load_config(None);
    if let Err(e) = genbrowser::ui::webview_app::run(config) {
        tracing::error!(error = %e, "browser failed to start");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
use genbrowser::app::App;
#[cfg(not(feature = "gui"))]
use genbrowser::headless::{HeadlessViewFactory, RecordingChrome};

#[cfg(not(feature = "gui"))]
type DemoApp = App<HeadlessViewFactory, RecordingChrome>;

#[cfg(not(feature = "gui"))]
fn main() {
    genbrowser::init_logging();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              GenBrowser v{} - Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("║     Tabbed browser shell running against headless views      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let config = genbrowser::app::load_config(None);
    let mut app = match App::new(config, HeadlessViewFactory::new(), RecordingChrome::new()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("  ✗ failed to start: {}", e);
            std::process::exit(1);
        }
    };

    demo_tabs(&mut app);
    demo_navigation(&mut app);
    demo_theme(&mut app);
    demo_ad_filter(&app);
    demo_downloads(&mut app);
    demo_shortcuts(&mut app);

    app.shutdown();
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Browser core demonstrated successfully!");
    println!("  Build with `--features gui` to open the window.");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn print_tabs(app: &DemoApp) {
    let tabs = app.controller.tabs();
    for (i, session) in tabs.sessions().iter().enumerate() {
        let marker = if Some(i) == tabs.active_index() { "▶" } else { " " };
        println!("  {} [{}] {} - {}", marker, i, session.label, session.url);
    }
}

#[cfg(not(feature = "gui"))]
fn demo_tabs(app: &mut DemoApp) {
    section("Tab Manager");
    if let Err(e) = app.controller.open_tab(Some("about:blank"), "Blank") {
        println!("  ✗ open failed: {}", e);
    }
    print_tabs(app);
    match app.controller.close_tab(0) {
        Ok(closed) => println!("  close_tab(0) → {}", closed),
        Err(e) => println!("  ✗ close failed: {}", e),
    }
    print_tabs(app);
    match app.controller.close_tab(0) {
        Ok(closed) => println!("  closing the last tab → {} (kept open)", closed),
        Err(e) => println!("  ✗ close failed: {}", e),
    }
    println!("  ✓ Tabs OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation(app: &mut DemoApp) {
    section("Navigation");
    for input in ["example.com", "https://rust-lang.org", "   "] {
        match app.controller.navigate(input) {
            Some(url) => println!("  {:<24} → {}", format!("{:?}", input), url),
            None => println!("  {:<24} → (ignored)", format!("{:?}", input)),
        }
    }
    app.controller.on_url_changed("https://rust-lang.org");
    println!("  URL bar: {}", app.controller.chrome().url_text);
    println!("  Lock:    {:?}", app.controller.chrome().security_icon);
    for _ in 0..3 {
        app.controller.zoom_in();
    }
    println!("  Zoom after 3× zoom in: {:?}", app.controller.zoom_out());
    println!("  ✓ Navigation OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_theme(app: &mut DemoApp) {
    section("Theme");
    println!("  Start dark: {}", app.controller.theme().is_dark());
    let theme = app.controller.toggle_theme();
    println!("  After toggle: {:?} (window {})", theme.mode(), theme.palette().window);
    app.controller.toggle_theme();
    println!("  ✓ Theme OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_ad_filter(app: &DemoApp) {
    use genbrowser::headless::HeadlessRequest;
    section("Ad Filter");
    for url in [
        "https://ads.google.com/pixel",
        "https://static.doubleclick.net/ad.js",
        "https://www.example.com/",
    ] {
        let mut request = HeadlessRequest::new(url);
        let blocked = app.intercept_request(&mut request);
        println!("  {} {}", if blocked { "⛔" } else { "✓ " }, url);
    }
    println!("  Blocked so far: {}", app.ad_filter.blocked_count());
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_downloads(app: &mut DemoApp) {
    use genbrowser::headless::HeadlessDownload;
    use genbrowser::managers::download_manager::DownloadManagerTrait;
    section("Download Manager");

    let target = std::env::temp_dir().join("report.pdf");
    app.controller.chrome_mut().answer_save(Some(target));
    let mut request = HeadlessDownload::new("https://example.com/report.pdf", "report.pdf");
    println!("  report.pdf → {:?}", app.handle_download(&mut request));
    if let Some((status, duration)) = app.controller.chrome().last_status() {
        println!("  Status: {} ({} ms)", status, duration.as_millis());
    }

    let mut request = HeadlessDownload::new("https://example.com/big.iso", "big.iso");
    println!("  big.iso (prompt cancelled) → {:?}", app.handle_download(&mut request));
    println!("  Listed downloads: {}", app.downloads().list_downloads().len());
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_shortcuts(app: &mut DemoApp) {
    section("Shortcuts");
    let before = app.controller.tabs().len();
    match app.controller.handle_shortcut("Ctrl+T") {
        Ok(action) => println!("  Ctrl+T → {:?}", action),
        Err(e) => println!("  ✗ shortcut failed: {}", e),
    }
    println!("  Tabs: {} → {}", before, app.controller.tabs().len());
    println!("  ✓ Shortcuts OK");
    println!();
}
