//! Property-based tests for Tab Manager operations.
//!
//! For any sequence of opens, closes and activations the collection is never
//! empty once populated, the active index always points at a live session,
//! and closing the only session changes nothing.

use genbrowser::headless::HeadlessViewFactory;
use genbrowser::managers::tab_manager::TabManager;
use proptest::prelude::*;

/// Operations that can be performed on the TabManager.
#[derive(Debug, Clone)]
enum TabOp {
    Open,
    Close(usize),
    Activate(usize),
}

/// Bias toward opens so the collection grows past one session.
fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(TabOp::Open),
            2 => (0..12usize).prop_map(TabOp::Close),
            1 => (0..12usize).prop_map(TabOp::Activate),
        ],
        1..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tab_collection_invariants(ops in arb_tab_ops()) {
        let mut mgr = TabManager::new(HeadlessViewFactory::new());
        mgr.open_session(None, "Home").unwrap();
        let mut expected = 1usize;

        for op in &ops {
            match op {
                TabOp::Open => {
                    mgr.open_session(None, "New Tab").unwrap();
                    expected += 1;
                    prop_assert_eq!(mgr.active_index(), Some(expected - 1));
                }
                TabOp::Close(i) => {
                    let before_active = mgr.active_session().map(|s| s.id);
                    match mgr.close_session(*i) {
                        Ok(true) => expected -= 1,
                        Ok(false) => {
                            prop_assert_eq!(expected, 1);
                            prop_assert_eq!(mgr.active_session().map(|s| s.id), before_active);
                        }
                        Err(_) => prop_assert!(*i >= expected),
                    }
                }
                TabOp::Activate(i) => {
                    let result = mgr.activate_session(*i);
                    prop_assert_eq!(result.is_ok(), *i < expected);
                }
            }

            prop_assert_eq!(mgr.len(), expected);
            prop_assert!(!mgr.is_empty());
            let active = mgr.active_index();
            prop_assert!(active.is_some_and(|a| a < mgr.len()));
            let visible = (0..mgr.len())
                .filter(|&i| mgr.view(i).is_some_and(|v| v.visible))
                .count();
            prop_assert_eq!(visible, 1);
            prop_assert_eq!(mgr.subscriptions().len(), expected);
        }
    }

    #[test]
    fn closed_sessions_are_detached_exactly_once(closes in prop::collection::vec(0..6usize, 0..20)) {
        let mut mgr = TabManager::new(HeadlessViewFactory::new());
        for _ in 0..6 {
            mgr.open_session(None, "Tab").unwrap();
        }
        let mut closed = Vec::new();
        for i in closes {
            if i < mgr.len() {
                let id = mgr.sessions()[i].id;
                if mgr.close_session(i).unwrap() {
                    closed.push(id);
                }
            }
        }
        prop_assert_eq!(mgr.factory().detached(), closed);
    }
}
