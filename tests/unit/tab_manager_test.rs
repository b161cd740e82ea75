use genbrowser::engine::EngineEvent;
use genbrowser::headless::{HeadlessViewFactory, ViewCommand};
use genbrowser::managers::tab_manager::{EventKind, TabManager};
use genbrowser::types::errors::TabError;
use genbrowser::types::tab::{ChromeUpdate, LoadState};

fn manager() -> TabManager<HeadlessViewFactory> {
    TabManager::new(HeadlessViewFactory::new())
}

#[test]
fn test_open_session_appends_and_activates() {
    let mut mgr = manager();
    let home = mgr.open_session(Some("https://www.google.com"), "Home").unwrap();
    let blank = mgr.open_session(Some("about:blank"), "Blank").unwrap();
    assert_ne!(home, blank);
    assert_eq!(mgr.len(), 2);
    assert_eq!(mgr.active_index(), Some(1));
    assert_eq!(mgr.active_session().unwrap().id, blank);
}

#[test]
fn test_open_session_default_url_is_blank() {
    let mut mgr = manager();
    let id = mgr.open_session(None, "New Tab").unwrap();
    let session = mgr.session(id).unwrap();
    assert_eq!(session.url, "about:blank");
    assert_eq!(session.label, "New Tab");
    assert!(!session.secure);
    assert_eq!(
        mgr.active_view().unwrap().last_command(),
        Some(&ViewCommand::LoadUrl("about:blank".into()))
    );
}

#[test]
fn test_open_session_marks_https_secure() {
    let mut mgr = manager();
    let id = mgr.open_session(Some("https://example.com"), "Secure").unwrap();
    assert!(mgr.session(id).unwrap().secure);
}

#[test]
fn test_open_session_view_failure_leaves_collection_untouched() {
    let mut factory = HeadlessViewFactory::new();
    factory.fail_next();
    let mut mgr = TabManager::new(factory);
    let err = mgr.open_session(None, "Broken").unwrap_err();
    assert!(matches!(err, TabError::ViewCreation(_)));
    assert!(mgr.is_empty());
    assert_eq!(mgr.active_index(), None);
}

#[test]
fn test_close_session_home_and_blank_scenario() {
    let mut mgr = manager();
    mgr.open_session(Some("https://www.google.com"), "Home").unwrap();
    let blank = mgr.open_session(Some("about:blank"), "Blank").unwrap();
    assert_eq!(mgr.active_index(), Some(1));

    assert!(mgr.close_session(0).unwrap());
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.active_index(), Some(0));
    assert_eq!(mgr.active_session().unwrap().id, blank);
}

#[test]
fn test_close_last_session_is_noop() {
    let mut mgr = manager();
    let only = mgr.open_session(None, "Only").unwrap();
    assert!(!mgr.close_session(0).unwrap());
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.active_session().unwrap().id, only);
    assert!(mgr.factory().detached().is_empty());
}

#[test]
fn test_close_out_of_range_is_error() {
    let mut mgr = manager();
    mgr.open_session(None, "A").unwrap();
    mgr.open_session(None, "B").unwrap();
    assert!(matches!(mgr.close_session(5), Err(TabError::InvalidIndex(5))));
    assert_eq!(mgr.len(), 2);
}

#[test]
fn test_close_active_last_index_moves_left() {
    let mut mgr = manager();
    mgr.open_session(None, "A").unwrap();
    let b = mgr.open_session(None, "B").unwrap();
    let c = mgr.open_session(None, "C").unwrap();
    assert!(mgr.close_session(2).unwrap());
    assert_eq!(mgr.active_index(), Some(1));
    assert_eq!(mgr.active_session().unwrap().id, b);
    assert!(mgr.session(c).is_none());
}

#[test]
fn test_close_active_middle_selects_right_neighbor() {
    let mut mgr = manager();
    mgr.open_session(None, "A").unwrap();
    mgr.open_session(None, "B").unwrap();
    let c = mgr.open_session(None, "C").unwrap();
    mgr.activate_session(1).unwrap();
    assert!(mgr.close_session(1).unwrap());
    assert_eq!(mgr.active_index(), Some(1));
    assert_eq!(mgr.active_session().unwrap().id, c);
}

#[test]
fn test_close_before_active_keeps_same_session_active() {
    let mut mgr = manager();
    mgr.open_session(None, "A").unwrap();
    let b = mgr.open_session(None, "B").unwrap();
    assert!(mgr.close_session(0).unwrap());
    assert_eq!(mgr.active_session().unwrap().id, b);
    assert!(mgr.active_view().unwrap().visible);
}

#[test]
fn test_close_detaches_view_and_unsubscribes() {
    let mut mgr = manager();
    let a = mgr.open_session(None, "A").unwrap();
    mgr.open_session(None, "B").unwrap();
    mgr.close_session(0).unwrap();
    assert_eq!(mgr.factory().detached(), vec![a]);
    for kind in EventKind::ALL {
        assert!(!mgr.subscriptions().is_subscribed(a, kind));
    }
}

#[test]
fn test_events_for_closed_session_are_dropped() {
    let mut mgr = manager();
    let a = mgr.open_session(None, "A").unwrap();
    mgr.open_session(None, "B").unwrap();
    mgr.close_session(0).unwrap();

    let update = mgr.apply_event(&EngineEvent::UrlChanged {
        session: a,
        url: "https://late.example".into(),
    });
    assert_eq!(update, None);
    assert!(mgr.sessions().iter().all(|s| s.url != "https://late.example"));
}

#[test]
fn test_activate_returns_chrome_state() {
    let mut mgr = manager();
    mgr.open_session(Some("https://secure.example"), "A").unwrap();
    mgr.open_session(Some("http://plain.example"), "B").unwrap();
    let state = mgr.activate_session(0).unwrap();
    assert_eq!(state.url, "https://secure.example");
    assert!(state.secure);
    assert!(matches!(mgr.activate_session(9), Err(TabError::InvalidIndex(9))));
}

#[test]
fn test_active_url_change_yields_update() {
    let mut mgr = manager();
    let id = mgr.open_session(None, "A").unwrap();
    let update = mgr.apply_event(&EngineEvent::UrlChanged {
        session: id,
        url: "https://example.com/".into(),
    });
    assert_eq!(
        update,
        Some(ChromeUpdate::Url {
            url: "https://example.com/".into(),
            secure: true
        })
    );
}

#[test]
fn test_load_finished_takes_view_title() {
    let mut mgr = manager();
    let id = mgr.open_session(None, "A").unwrap();
    mgr.active_view_mut().unwrap().page_title = "Example Domain".into();

    mgr.apply_event(&EngineEvent::LoadStarted { session: id });
    assert_eq!(mgr.session(id).unwrap().load_state, LoadState::Loading);

    let update = mgr.apply_event(&EngineEvent::LoadFinished { session: id, ok: true });
    assert_eq!(update, Some(ChromeUpdate::Title("Example Domain".into())));
    assert_eq!(mgr.session(id).unwrap().load_state, LoadState::Loaded);
}

#[test]
fn test_navigate_active_sends_url_to_view() {
    let mut mgr = manager();
    assert!(!mgr.navigate_active("https://nowhere.example"));
    mgr.open_session(None, "A").unwrap();
    assert!(mgr.navigate_active("https://example.com"));
    assert_eq!(
        mgr.active_view().unwrap().last_command(),
        Some(&ViewCommand::LoadUrl("https://example.com".into()))
    );
}
