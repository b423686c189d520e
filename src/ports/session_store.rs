//! Session store port: concurrency-safe keyed access to sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;

/// Exclusive handle to one session.
///
/// Locking the handle serializes all mutation for that session id;
/// distinct ids proceed fully in parallel. The orchestrator holds the
/// lock across its whole read-decide-write sequence, including the
/// completion flip, which is what makes the flip-and-dispatch step
/// atomic relative to concurrent requests.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for the keyed session state holder.
///
/// Create-if-absent semantics: a missing session on any access is a
/// creation, never an error. The store never deletes sessions; retention
/// is an operational concern outside this core.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, creating it atomically if absent.
    ///
    /// Concurrent calls with the same id observe the same single session.
    async fn get_or_create(&self, id: &SessionId) -> SessionHandle;

    /// Returns the session for `id` if one exists.
    async fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Number of sessions currently tracked.
    async fn session_count(&self) -> usize;
}
