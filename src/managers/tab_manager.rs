//! Tab/Session Manager for GenBrowser.
//!
//! Owns the ordered tab collection and every engine view handle. Engine
//! events are routed through a per-session subscription table so events from
//! a closed tab are dropped instead of touching freed state.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::engine::{EngineEvent, ViewFactory, WebView};
use crate::types::errors::TabError;
use crate::types::tab::{ChromeState, ChromeUpdate, LoadState, Session, SessionId};

/// Engine event kinds a session can be subscribed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    UrlChanged,
    LoadProgress,
    TitleChanged,
    HtmlExported,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::UrlChanged,
        EventKind::LoadProgress,
        EventKind::TitleChanged,
        EventKind::HtmlExported,
    ];

    pub fn of(event: &EngineEvent) -> Self {
        match event {
            EngineEvent::UrlChanged { .. } => EventKind::UrlChanged,
            EngineEvent::LoadStarted { .. } | EngineEvent::LoadFinished { .. } => {
                EventKind::LoadProgress
            }
            EngineEvent::TitleChanged { .. } => EventKind::TitleChanged,
            EngineEvent::HtmlExported { .. } => EventKind::HtmlExported,
        }
    }
}

/// Subscription table keyed by session id.
#[derive(Debug, Default)]
pub struct Subscriptions {
    table: HashMap<SessionId, HashSet<EventKind>>,
}

impl Subscriptions {
    pub fn subscribe_all(&mut self, session: SessionId) {
        self.table
            .entry(session)
            .or_default()
            .extend(EventKind::ALL);
    }

    pub fn unsubscribe(&mut self, session: SessionId) {
        self.table.remove(&session);
    }

    pub fn is_subscribed(&self, session: SessionId, kind: EventKind) -> bool {
        self.table
            .get(&session)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

struct SessionSlot<V> {
    session: Session,
    view: V,
}

/// Ordered collection of sessions with one active index.
pub struct TabManager<F: ViewFactory> {
    factory: F,
    slots: Vec<SessionSlot<F::View>>,
    active: Option<usize>,
    subscriptions: Subscriptions,
}

impl<F: ViewFactory> TabManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slots: Vec::new(),
            active: None,
            subscriptions: Subscriptions::default(),
        }
    }

    /// Appends a session navigated to `url` (`about:blank` when `None`) and
    /// makes it active. Returns its identifier.
    pub fn open_session(&mut self, url: Option<&str>, label: &str) -> Result<SessionId, TabError> {
        let url = url.unwrap_or("about:blank");
        let session = Session::new(url, label);
        let id = session.id;

        let mut view = self.factory.create_view(id)?;
        view.load_url(url);

        self.slots.push(SessionSlot { session, view });
        self.subscriptions.subscribe_all(id);
        let index = self.slots.len() - 1;
        self.activate_session(index)?;

        info!(session = %id, %url, index, "opened session");
        Ok(id)
    }

    /// Closes the session at `index`. Returns `Ok(false)` without touching
    /// anything when it is the only session left.
    pub fn close_session(&mut self, index: usize) -> Result<bool, TabError> {
        if index >= self.slots.len() {
            return Err(TabError::InvalidIndex(index));
        }
        if self.slots.len() == 1 {
            debug!("refusing to close the last session");
            return Ok(false);
        }

        let mut slot = self.slots.remove(index);
        self.subscriptions.unsubscribe(slot.session.id);
        slot.view.detach();
        info!(session = %slot.session.id, index, "closed session");
        drop(slot);

        let active = self.active.unwrap_or(0);
        let new_active = if index < active {
            active - 1
        } else if index == active {
            index.min(self.slots.len() - 1)
        } else {
            active
        };
        // The removed view is gone; only the survivor needs to be shown.
        self.active = None;
        self.activate_session(new_active)?;
        Ok(true)
    }

    /// Makes the session at `index` active and returns what the chrome must show.
    pub fn activate_session(&mut self, index: usize) -> Result<ChromeState, TabError> {
        if index >= self.slots.len() {
            return Err(TabError::InvalidIndex(index));
        }
        if let Some(previous) = self.active.filter(|&p| p != index) {
            if let Some(slot) = self.slots.get_mut(previous) {
                slot.view.set_visible(false);
            }
        }

        let slot = &mut self.slots[index];
        slot.view.set_visible(true);
        self.subscriptions.subscribe_all(slot.session.id);
        self.active = Some(index);
        Ok(slot.session.chrome_state())
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active
            .and_then(|i| self.slots.get(i))
            .map(|slot| &slot.session)
    }

    pub fn active_view(&self) -> Option<&F::View> {
        self.active.and_then(|i| self.slots.get(i)).map(|slot| &slot.view)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut F::View> {
        self.active
            .and_then(|i| self.slots.get_mut(i))
            .map(|slot| &mut slot.view)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Marks the active session as loading a new URL and sends it to the view.
    pub fn navigate_active(&mut self, url: &str) -> bool {
        let Some(slot) = self.active.and_then(|i| self.slots.get_mut(i)) else {
            return false;
        };
        slot.session.load_state = LoadState::Loading;
        slot.view.load_url(url);
        true
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.slots
            .iter()
            .find(|slot| slot.session.id == id)
            .map(|slot| &slot.session)
    }

    pub fn index_of(&self, id: SessionId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.session.id == id)
    }

    pub fn view(&self, index: usize) -> Option<&F::View> {
        self.slots.get(index).map(|slot| &slot.view)
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut F::View> {
        self.slots.iter_mut().map(|slot| &mut slot.view)
    }

    /// Sessions in display order.
    pub fn sessions(&self) -> Vec<&Session> {
        self.slots.iter().map(|slot| &slot.session).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Applies an engine event to its session. Returns the chrome update to
    /// render when the session is the active one.
    pub fn apply_event(&mut self, event: &EngineEvent) -> Option<ChromeUpdate> {
        let id = event.session();
        if !self.subscriptions.is_subscribed(id, EventKind::of(event)) {
            debug!(session = %id, ?event, "dropping event for unsubscribed session");
            return None;
        }
        let index = self.index_of(id)?;
        let is_active = self.active == Some(index);
        let slot = &mut self.slots[index];

        let update = match event {
            EngineEvent::UrlChanged { url, .. } => {
                slot.session.set_url(url);
                Some(ChromeUpdate::Url {
                    url: slot.session.url.clone(),
                    secure: slot.session.secure,
                })
            }
            EngineEvent::LoadStarted { .. } => {
                slot.session.load_state = LoadState::Loading;
                None
            }
            EngineEvent::LoadFinished { ok, .. } => {
                slot.session.load_state = LoadState::Loaded;
                let title = slot.view.title();
                if !title.is_empty() {
                    slot.session.title = title;
                }
                debug!(session = %id, ok, "load finished");
                Some(ChromeUpdate::Title(slot.session.title.clone()))
            }
            EngineEvent::TitleChanged { title, .. } => {
                slot.session.title = title.clone();
                None
            }
            EngineEvent::HtmlExported { .. } => None,
        };

        if is_active {
            update
        } else {
            None
        }
    }
}
