// src/sessions/mod.rs
pub mod cookies;
pub mod token;

use crate::cache::ReportCache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

pub use cookies::{session_cookie, session_token};
pub use token::{generate_token_default, hash_token};

pub type SessionCache = Arc<Mutex<ReportCache>>;

/// The browser session a request belongs to.
pub struct Session {
    pub token: String,
    pub cache: SessionCache,
    /// True when the token was minted for this request and must be sent back.
    pub is_new: bool,
}

struct SessionEntry {
    cache: SessionCache,
    last_seen: i64,
}

/// In-memory sessions, one report cache each, keyed by the token hash.
///
/// A session idle for `ttl_secs` is dropped. By then every report in its
/// cache has gone stale anyway.
pub struct SessionStore {
    ttl_secs: i64,
    sessions: Mutex<HashMap<[u8; 32], SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl_secs,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The live session for `token`, if there is one. Never creates a session.
    pub fn lookup(&self, token: Option<&str>, now: i64) -> Option<Session> {
        let token = token?;
        let mut sessions = self.lock_pruned(now);
        let entry = sessions.get_mut(&hash_token(token))?;
        entry.last_seen = now;

        Some(Session {
            token: token.to_string(),
            cache: Arc::clone(&entry.cache),
            is_new: false,
        })
    }

    /// Look up the session for `token`, or start a new one when the token is
    /// absent, unknown or expired.
    pub fn resolve(&self, token: Option<&str>, now: i64) -> Session {
        if let Some(session) = self.lookup(token, now) {
            return session;
        }

        let token = generate_token_default();
        let cache = Arc::new(Mutex::new(ReportCache::new(self.ttl_secs)));

        let mut sessions = self.lock_pruned(now);
        sessions.insert(
            hash_token(&token),
            SessionEntry {
                cache: Arc::clone(&cache),
                last_seen: now,
            },
        );
        debug!(sessions = sessions.len(), "started new session");

        Session {
            token,
            cache,
            is_new: true,
        }
    }

    /// Drop a session, e.g. one minted for a request that then failed before
    /// its cookie could be sent.
    pub fn discard(&self, token: &str) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&hash_token(token));
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lock_pruned(&self, now: i64) -> MutexGuard<'_, HashMap<[u8; 32], SessionEntry>> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen < self.ttl_secs);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "pruned idle sessions");
        }
        sessions
    }
}
