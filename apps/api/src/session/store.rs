//! In-memory session store. Sessions are lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::profile::Profile;
use crate::session::navigation::{NavigationHistory, Step, UiLanguage};

pub const DEFAULT_THEME: &str = "modern";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Session limit of {0} reached")]
    CapacityReached(usize),
}

/// Everything one user is working on: the profile plus UI state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSession {
    pub id: Uuid,
    pub profile: Profile,
    pub history: NavigationHistory,
    pub theme: String,
    pub language: UiLanguage,
    /// Last read or write through the store.
    pub last_touched: DateTime<Utc>,
}

impl AppSession {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            profile: Profile::default(),
            history: NavigationHistory::default(),
            theme: DEFAULT_THEME.to_string(),
            language: UiLanguage::default(),
            last_touched: now,
        }
    }

    pub fn current_step(&self) -> Step {
        self.history.current()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, AppSession>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_ttl,
        }
    }

    /// Creates a session. At capacity, sessions idle longer than the TTL are
    /// evicted first; the call fails only if none are.
    pub async fn create(&self) -> Result<AppSession, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            let before = sessions.len();
            sessions.retain(|_, s| now - s.last_touched <= self.idle_ttl);
            let evicted = before - sessions.len();
            if evicted > 0 {
                info!("Evicted {evicted} idle sessions");
            }
        }
        if sessions.len() >= self.max_sessions {
            return Err(SessionError::CapacityReached(self.max_sessions));
        }
        let session = AppSession::new(Uuid::new_v4(), now);
        sessions.insert(session.id, session.clone());
        info!("Created session {} ({} active)", session.id, sessions.len());
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<AppSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.last_touched = Utc::now();
        Ok(session.clone())
    }

    /// Runs `f` against the stored session under the write lock.
    /// The session is only replaced when `f` succeeds.
    pub async fn update<T, E, F>(&self, id: Uuid, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut AppSession) -> Result<T, E>,
        E: From<SessionError>,
    {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        let mut working = stored.clone();
        let value = f(&mut working)?;
        working.last_touched = Utc::now();
        *stored = working;
        debug!("Updated session {id}");
        Ok(value)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(_) => {
                info!("Removed session {id}");
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttl() -> Duration {
        Duration::minutes(30)
    }

    async fn backdate(store: &SessionStore, id: Uuid, by: Duration) {
        let mut sessions = store.sessions.write().await;
        let session = sessions.get_mut(&id).unwrap();
        session.last_touched = session.last_touched - by;
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(4, ttl());
        let session = store.create().await.unwrap();
        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.theme, DEFAULT_THEME);
        assert_eq!(fetched.current_step(), Step::Style);
    }

    #[tokio::test]
    async fn test_capacity_limit() {
        let store = SessionStore::new(1, ttl());
        store.create().await.unwrap();
        assert_eq!(
            store.create().await.unwrap_err(),
            SessionError::CapacityReached(1)
        );
    }

    #[tokio::test]
    async fn test_failed_update_leaves_session_untouched() {
        let store = SessionStore::new(4, ttl());
        let id = store.create().await.unwrap().id;

        let result: Result<(), SessionError> = store
            .update(id, |s| {
                s.theme = "classic".to_string();
                Err(SessionError::NotFound(Uuid::nil()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.get(id).await.unwrap().theme, DEFAULT_THEME);

        store
            .update(id, |s| {
                s.theme = "classic".to_string();
                Ok::<_, SessionError>(())
            })
            .await
            .unwrap();
        assert_eq!(store.get(id).await.unwrap().theme, "classic");
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(4, ttl());
        let id = store.create().await.unwrap().id;
        store.remove(id).await.unwrap();
        assert_eq!(store.active_count().await, 0);
        assert_eq!(store.get(id).await.unwrap_err(), SessionError::NotFound(id));
        assert_eq!(store.remove(id).await.unwrap_err(), SessionError::NotFound(id));
    }

    #[tokio::test]
    async fn test_idle_session_evicted_at_capacity() {
        let store = SessionStore::new(1, ttl());
        let stale = store.create().await.unwrap().id;
        backdate(&store, stale, Duration::hours(1)).await;

        let fresh = store.create().await.unwrap().id;
        assert_eq!(store.active_count().await, 1);
        assert_eq!(store.get(stale).await.unwrap_err(), SessionError::NotFound(stale));
        assert!(store.get(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_active_sessions_are_not_evicted() {
        let store = SessionStore::new(2, ttl());
        let recent = store.create().await.unwrap().id;
        let stale = store.create().await.unwrap().id;
        backdate(&store, recent, Duration::minutes(10)).await;
        backdate(&store, stale, Duration::hours(2)).await;

        store.create().await.unwrap();
        assert!(store.get(recent).await.is_ok());
        assert!(store.get(stale).await.is_err());
    }

    #[tokio::test]
    async fn test_access_refreshes_idle_timer() {
        let store = SessionStore::new(1, ttl());
        let id = store.create().await.unwrap().id;
        backdate(&store, id, Duration::hours(1)).await;

        store.get(id).await.unwrap();
        assert_eq!(
            store.create().await.unwrap_err(),
            SessionError::CapacityReached(1)
        );
    }
}
