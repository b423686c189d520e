//! In-memory session store.
//!
//! An arena-style keyed store: the outer map lock is held only long
//! enough to resolve a handle, never across session mutation, so
//! distinct sessions proceed fully in parallel.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{SessionHandle, SessionStore};

/// Process-local session store backing the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> SessionHandle {
        // Fast path: the session usually exists after the first message.
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(id) {
                return handle.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(id.clone()))))
            .clone()
    }

    async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
