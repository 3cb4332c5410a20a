use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    types::{CustomCriteria, Token},
    utils,
};

/// Sessions untouched for this long are dropped.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Per-visitor state held between requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub code_verifier: Option<String>,
    pub token: Option<Token>,
    pub custom_criteria: Option<CustomCriteria>,
}

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

/// In-memory sessions keyed by the id carried in the session cookie.
///
/// Sessions live as long as the process at most; nothing is written to
/// disk. Reading or updating a session keeps it alive, one left alone for
/// longer than the store's time to live is gone the next time a session
/// is created.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts an empty session and returns its id. Expired sessions are
    /// swept first.
    pub async fn create(&self) -> String {
        let id = utils::generate_session_id();
        let mut sessions = self.sessions.lock().await;

        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);

        sessions.insert(
            id.clone(),
            Entry {
                session: Session::default(),
                last_seen: Instant::now(),
            },
        );
        id
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let entry = self.live(&mut sessions, id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub async fn has(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        self.live(&mut sessions, id).is_some()
    }

    /// Applies `f` to the session `id`. Returns `false` when there is no
    /// such session.
    pub async fn update<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.lock().await;
        match self.live(&mut sessions, id) {
            Some(entry) => {
                f(&mut entry.session);
                entry.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: &str) {
        self.sessions.lock().await.remove(id);
    }

    /// Number of sessions currently held, expired ones included until the
    /// next sweep.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<String, Entry>,
        id: &str,
    ) -> Option<&'a mut Entry> {
        if sessions.get(id)?.last_seen.elapsed() >= self.ttl {
            sessions.remove(id);
            return None;
        }
        sessions.get_mut(id)
    }
}
