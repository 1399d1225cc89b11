use crate::session::record::PracticeSession;
use crate::store::json_store::JsonStore;

/// Owns the in-memory practice history, the single writable copy. Ordered
/// oldest-first, append-only except for `clear`. Every mutation persists
/// the full sequence; a failed write keeps the in-memory state authoritative
/// for the current run (losing cross-restart history is degraded service,
/// not an error the user has to act on).
pub struct HistoryStore {
    sessions: Vec<PracticeSession>,
    store: Option<JsonStore>,
}

impl HistoryStore {
    /// Load persisted history. `store` is None when the data dir could not
    /// be created; the history then lives for this run only.
    pub fn load(store: Option<JsonStore>) -> Self {
        let sessions = store
            .as_ref()
            .map(JsonStore::load_history)
            .unwrap_or_default();
        Self { sessions, store }
    }

    pub fn sessions(&self) -> &[PracticeSession] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn append(&mut self, session: PracticeSession) {
        self.sessions.push(session);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_history(&self.sessions);
        }
    }
}
