use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::chat::ConversationHistory;
use shared_models::context::UserContext;
use shared_models::schedule::InfusionSchedule;

/// Everything one login owns: identity, chat log and (once viewed) the
/// infusion schedule.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub context: UserContext,
    pub history: ConversationHistory,
    pub schedule: Option<InfusionSchedule>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

impl Session {
    pub fn new(context: UserContext) -> Self {
        Self::with_ttl(context, Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_ttl(context: UserContext, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            context,
            history: ConversationHistory::new(),
            schedule: None,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Clone)]
struct Entry {
    expires_at: DateTime<Utc>,
    handle: SessionHandle,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-memory session registry. The map lock is only held to look up or
/// insert handles; each action then locks its own session.
///
/// Expired sessions count as absent: `get` drops them on sight and every
/// `open` sweeps the rest.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn open(&self, context: UserContext) -> (Uuid, SessionHandle) {
        let session = Session::with_ttl(context, self.ttl);
        let id = session.id;
        let expires_at = session.expires_at;
        let handle = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(now));
        let swept = before - sessions.len();
        if swept > 0 {
            debug!("Swept {} expired sessions", swept);
        }

        sessions.insert(id, Entry { expires_at, handle: handle.clone() });
        debug!("Opened session {} (expires {})", id, expires_at);

        (id, handle)
    }

    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(entry) if entry.is_live(now) => return Some(entry.handle.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions.get(id).is_some_and(|entry| !entry.is_live(now)) {
            sessions.remove(id);
            debug!("Dropped expired session {}", id);
        }
        None
    }

    pub async fn close(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        debug!("Closed session {} (existed: {})", id, removed);
        removed
    }

    /// Live sessions only.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.sessions.read().await.values().filter(|entry| entry.is_live(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Router state shared by every cell.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sessions = SessionStore::with_ttl(Duration::hours(config.session_ttl_hours));
        Self {
            config: Arc::new(config),
            sessions,
        }
    }
}

/// The caller's session, attached to requests by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionHandle);

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::chat::ChatMessage;

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new();
        let (first_id, first) = store.open(UserContext::demo_patient()).await;
        let (second_id, _) = store.open(UserContext::demo_patient()).await;
        assert_ne!(first_id, second_id);

        first.lock().await.history.push(ChatMessage::requester("hi", Utc::now()));

        let second = store.get(&second_id).await.unwrap();
        assert!(second.lock().await.history.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn close_drops_session() {
        let store = SessionStore::new();
        let (id, _) = store.open(UserContext::demo_agent()).await;

        assert!(store.close(&id).await);
        assert!(!store.close(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_is_absent() {
        let store = SessionStore::with_ttl(Duration::hours(-1));
        let (id, handle) = store.open(UserContext::demo_patient()).await;

        assert!(handle.lock().await.is_expired(Utc::now()));
        assert!(store.get(&id).await.is_none());
        assert!(!store.close(&id).await);
    }

    #[tokio::test]
    async fn open_sweeps_expired_sessions() {
        let expired = SessionStore::with_ttl(Duration::hours(-1));
        for _ in 0..100 {
            expired.open(UserContext::demo_patient()).await;
        }
        assert_eq!(expired.len().await, 0);
        assert!(expired.sessions.read().await.len() <= 1);

        let live = SessionStore::with_ttl(Duration::hours(1));
        let (id, _) = live.open(UserContext::demo_agent()).await;
        live.open(UserContext::demo_patient()).await;
        assert_eq!(live.len().await, 2);
        assert!(live.get(&id).await.is_some());
    }
}
