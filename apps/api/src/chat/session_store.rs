//! Chat session storage.
//!
//! `SessionStore` is injected into `AppState`; the default `LruSessionStore`
//! caps both the number of sessions and the turns kept per session.
//! Each session sits behind its own async mutex so one exchange (read history,
//! call the LLM, append) runs at a time per session id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::llm_client::Turn;

/// Ordered turns of one session, trimmed from the front past `limit`.
/// The limit is even and at least 2, so trimming keeps user/model pairs intact.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: Vec<Turn>,
    limit: usize,
}

impl ChatHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            turns: Vec::new(),
            limit: limit.max(2) & !1,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > self.limit {
            let excess = self.turns.len() - self.limit;
            self.turns.drain(..excess);
        }
    }
}

/// Locked handle to one session's history.
pub type SessionHandle = Arc<AsyncMutex<ChatHistory>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session's handle, creating an empty session on first use.
    fn session(&self, id: &str) -> SessionHandle;

    /// Returns the handle of an existing session without creating one.
    fn lookup(&self, id: &str) -> Option<SessionHandle>;

    /// Snapshot of the session's turns; empty for unknown sessions.
    async fn get(&self, id: &str) -> Vec<Turn> {
        match self.lookup(id) {
            Some(handle) => handle.lock().await.turns().to_vec(),
            None => Vec::new(),
        }
    }

    async fn append(&self, id: &str, turn: Turn) {
        self.session(id).lock().await.push(turn);
    }
}

struct Entry {
    handle: SessionHandle,
    last_used: u64,
}

#[derive(Default)]
struct LruIndex {
    sessions: HashMap<String, Entry>,
    clock: u64,
}

/// Bounded in-memory store that evicts the least-recently used session.
pub struct LruSessionStore {
    capacity: usize,
    history_limit: usize,
    index: Mutex<LruIndex>,
}

impl LruSessionStore {
    pub fn new(capacity: usize, history_limit: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            history_limit,
            index: Mutex::new(LruIndex::default()),
        }
    }

    fn lock_index(&self) -> std::sync::MutexGuard<'_, LruIndex> {
        // The index holds no invariants a panicking holder could break.
        self.index.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for LruSessionStore {
    fn session(&self, id: &str) -> SessionHandle {
        let mut index = self.lock_index();
        index.clock += 1;
        let now = index.clock;

        if let Some(entry) = index.sessions.get_mut(id) {
            entry.last_used = now;
            return entry.handle.clone();
        }

        if index.sessions.len() >= self.capacity {
            // Sessions with outstanding handles are mid-exchange and never evicted;
            // when all are busy the store runs over capacity until one frees up.
            let oldest = index
                .sessions
                .iter()
                .filter(|(_, entry)| Arc::strong_count(&entry.handle) == 1)
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(oldest) => {
                    index.sessions.remove(&oldest);
                    debug!("Evicted chat session {oldest}");
                }
                None => debug!(
                    "All {} chat sessions busy, exceeding capacity",
                    index.sessions.len()
                ),
            }
        }

        let handle = Arc::new(AsyncMutex::new(ChatHistory::new(self.history_limit)));
        index.sessions.insert(
            id.to_string(),
            Entry {
                handle: handle.clone(),
                last_used: now,
            },
        );
        handle
    }

    fn lookup(&self, id: &str) -> Option<SessionHandle> {
        let mut index = self.lock_index();
        index.clock += 1;
        let now = index.clock;

        index.sessions.get_mut(id).map(|entry| {
            entry.last_used = now;
            entry.handle.clone()
        })
    }
}

#[cfg(test)]
impl LruSessionStore {
    fn len(&self) -> usize {
        self.lock_index().sessions.len()
    }

    fn contains(&self, id: &str) -> bool {
        self.lock_index().sessions.contains_key(id)
    }
}
