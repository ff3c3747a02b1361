//! Keyed session storage — one `Conversation` per session id.
//!
//! The store gives each session independent, resumable state for the
//! lifetime of the process. Isolation rules:
//!
//! - Distinct session ids never share or interleave log state. The id → handle
//!   map is behind its own `RwLock`, so unrelated sessions do not serialize on
//!   a global lock.
//! - Within one session, at most one loop execution may be in flight. The
//!   conversation sits behind a per-session `Mutex`; a caller that finds it
//!   held fails fast with `SessionError::Busy` instead of interleaving two
//!   runs against the same log.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use tickerchat_core::{Conversation, SessionError, SessionId};

/// One session's slot in the store: its message log behind the per-session
/// lock, plus creation metadata.
pub struct SessionHandle {
    id: SessionId,
    created_at: DateTime<Utc>,
    log: Arc<Mutex<Conversation>>,
}

impl SessionHandle {
    fn new(id: SessionId) -> Self {
        let created_at = Utc::now();
        let log = Arc::new(Mutex::new(Conversation::with_id(id.clone())));
        Self {
            id,
            created_at,
            log,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Acquire exclusive access to this session's log for the duration of a
    /// full turn (every model round-trip included). Fails fast with
    /// `SessionError::Busy` if another run holds it.
    pub fn try_acquire(&self) -> Result<OwnedMutexGuard<Conversation>, SessionError> {
        self.log
            .clone()
            .try_lock_owned()
            .map_err(|_| SessionError::Busy(self.id.clone()))
    }

    /// A point-in-time copy of the log, for read-only inspection. Waits for
    /// any in-flight run to reach a turn boundary.
    pub async fn snapshot(&self) -> Conversation {
        self.log.lock().await.clone()
    }
}

/// The session store: a concurrent map from session id to session handle.
///
/// Sessions are created on first reference and live until the store is
/// dropped (process lifetime — durable storage is out of scope).
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a session, creating an empty one on first reference.
    pub async fn get_or_create(&self, id: &SessionId) -> Arc<SessionHandle> {
        // Fast path: read lock only.
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(id) {
                return handle.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check: another caller may have created it between locks.
        if let Some(handle) = sessions.get(id) {
            return handle.clone();
        }

        debug!(session_id = %id, "Creating new session");
        let handle = Arc::new(SessionHandle::new(id.clone()));
        sessions.insert(id.clone(), handle.clone());
        handle
    }

    /// Look up an existing session without creating one.
    pub async fn get(&self, id: &SessionId) -> Option<Arc<SessionHandle>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session, dropping its log.
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Ids of all live sessions.
    pub async fn ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().cloned().collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerchat_core::Message;

    #[tokio::test]
    async fn create_on_first_reference() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let id = SessionId::from("alpha");
        let handle = store.get_or_create(&id).await;
        assert_eq!(handle.id(), &id);
        assert_eq!(store.len().await, 1);

        // Second reference resumes the same session.
        let again = store.get_or_create(&id).await;
        assert!(Arc::ptr_eq(&handle, &again));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_sessions_never_share_logs() {
        let store = SessionStore::new();
        let a = store.get_or_create(&SessionId::from("a")).await;
        let b = store.get_or_create(&SessionId::from("b")).await;

        {
            let mut log = a.try_acquire().unwrap();
            log.push(Message::user("only in a"));
        }

        let snap_b = b.snapshot().await;
        assert!(snap_b.is_empty());

        let snap_a = a.snapshot().await;
        assert_eq!(snap_a.len(), 1);
        assert_eq!(snap_a.messages[0].content, "only in a");
    }

    #[tokio::test]
    async fn second_acquire_fails_fast_while_held() {
        let store = SessionStore::new();
        let handle = store.get_or_create(&SessionId::from("busy")).await;

        let guard = handle.try_acquire().unwrap();
        let err = handle.try_acquire().unwrap_err();
        assert!(matches!(err, SessionError::Busy(_)));

        drop(guard);
        assert!(handle.try_acquire().is_ok());
    }

    #[tokio::test]
    async fn snapshot_sees_committed_turns() {
        let store = SessionStore::new();
        let handle = store.get_or_create(&SessionId::from("snap")).await;

        {
            let mut log = handle.try_acquire().unwrap();
            log.push(Message::user("hello"));
            log.push(Message::assistant("hi"));
        }

        let snap = handle.snapshot().await;
        assert_eq!(snap.len(), 2);
    }

    #[tokio::test]
    async fn remove_drops_the_session() {
        let store = SessionStore::new();
        let id = SessionId::from("gone");
        store.get_or_create(&id).await;
        assert!(store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(!store.remove(&id).await);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_yields_one_session() {
        let store = Arc::new(SessionStore::new());
        let id = SessionId::from("raced");

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let id = id.clone();
            tasks.push(tokio::spawn(
                async move { store.get_or_create(&id).await },
            ));
        }

        let mut handles = Vec::new();
        for t in tasks {
            handles.push(t.await.unwrap());
        }
        assert_eq!(store.len().await, 1);
        for h in &handles[1..] {
            assert!(Arc::ptr_eq(&handles[0], h));
        }
    }
}
