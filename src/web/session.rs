//! Per-browser page state for the hosted UI.
//!
//! Each browser gets a `cobot_session` cookie and its own pair of view
//! controllers (dashboard + chatbot), so pagination and filter state never
//! leak between visitors. The store is bounded; the least recently seen
//! session is evicted first.

use std::collections::HashMap;

use crate::backend::Backend;
use crate::view::{Layout, ViewController};

pub const COOKIE_NAME: &str = "cobot_session";

/// Upper bound on live sessions held in memory.
pub const MAX_SESSIONS: usize = 256;

pub struct Session<B> {
    pub dashboard: ViewController<B>,
    pub chatbot: ViewController<B>,
    /// Whether the dashboard's load event has run.
    pub dashboard_loaded: bool,
    /// Store tick of the most recent request.
    last_seen: u64,
}

impl<B: Backend + Clone> Session<B> {
    fn new(backend: &B, items_per_page: u32, tick: u64) -> Self {
        Self {
            dashboard: ViewController::new(backend.clone(), &Layout::dashboard(), items_per_page),
            chatbot: ViewController::new(backend.clone(), &Layout::chatbot(), items_per_page),
            dashboard_loaded: false,
            last_seen: tick,
        }
    }
}

pub struct SessionStore<B> {
    sessions: HashMap<String, Session<B>>,
    capacity: usize,
    tick: u64,
}

impl<B: Backend + Clone> SessionStore<B> {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            capacity: capacity.max(1),
            tick: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Look up the session named by the cookie header, or start a new one.
    ///
    /// Returns the session id and whether it was just created (the caller
    /// must then set the cookie).
    pub fn resolve(
        &mut self,
        cookie_header: Option<&str>,
        backend: &B,
        items_per_page: u32,
    ) -> (String, bool) {
        self.tick += 1;
        if let Some(id) = cookie_header.and_then(session_id_from_cookie)
            && let Some(session) = self.sessions.get_mut(id)
        {
            session.last_seen = self.tick;
            return (id.to_string(), false);
        }

        if self.sessions.len() >= self.capacity {
            self.evict_oldest();
        }
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.sessions
            .insert(id.clone(), Session::new(backend, items_per_page, self.tick));
        tracing::debug!(session = %id, live = self.sessions.len(), "session started");
        (id, true)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session<B>> {
        self.sessions.get_mut(id)
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|(_, s)| s.last_seen)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            self.sessions.remove(&id);
            tracing::debug!(session = %id, "session evicted");
        }
    }
}

/// Extract our session id from a `Cookie:` header value.
pub fn session_id_from_cookie(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == COOKIE_NAME && !value.is_empty()).then_some(value)
    })
}

/// `Set-Cookie` value for a new session.
pub fn set_cookie_value(id: &str) -> String {
    format!("{COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax")
}
