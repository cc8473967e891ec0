//! Shared handle to the active coaching session.
//!
//! The session is one explicit object passed to every handler, never ambient
//! state. The lock is held only for the synchronous domain operations; it is
//! always released before a handler awaits the generation gateway.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::domain::coaching::{CoachingSession, SessionEvent, SessionSnapshot};
use crate::domain::foundation::SessionId;

/// Cloneable handle to one in-memory session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<CoachingSession>>,
}

impl SessionHandle {
    /// Wraps an existing session.
    pub fn new(session: CoachingSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Starts a fresh session.
    pub fn start() -> Self {
        Self::new(CoachingSession::start())
    }

    pub async fn id(&self) -> SessionId {
        self.inner.lock().await.id()
    }

    /// Presentation view of the current state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Drains events raised since the last call.
    pub async fn take_events(&self) -> Vec<SessionEvent> {
        self.inner.lock().await.take_events()
    }

    /// Replaces the session with a fresh one and returns its id.
    ///
    /// A reply still in flight for the old session is discarded when it
    /// lands, since its ticket no longer matches.
    pub async fn restart(&self) -> SessionId {
        let mut session = self.inner.lock().await;
        let previous = session.id();
        *session = CoachingSession::start();
        info!(previous = %previous, session_id = %session.id(), "Session restarted");
        session.id()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, CoachingSession> {
        self.inner.lock().await
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::start()
    }
}
