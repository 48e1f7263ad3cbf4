//! In-memory store of active analysis sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use platelens_core::Session;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Holds every active session for the lifetime of the process.
///
/// Sessions are keyed by id and individually locked, so one session's model
/// round does not block another session. Nothing is written to durable
/// storage; restarting the server discards all sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Add a session to the store, keyed by its own id.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        self.inner
            .write()
            .unwrap()
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Look up a session by id.
    pub fn get(&self, id: &Uuid) -> Option<Arc<Mutex<Session>>> {
        self.inner.read().unwrap().get(id).cloned()
    }
}
