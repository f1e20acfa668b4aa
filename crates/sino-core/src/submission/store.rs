//! Session storage
//!
//! Sessions live in memory only; a restart drops unfinished submissions.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use thiserror::Error;
use tracing::debug;

use super::session::{UserId, UserSession};
use crate::config::FlowSettings;

/// Errors raised by a session store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend failure
    #[error("session store error: {0}")]
    Backend(String),
}

/// Keyed storage of one session per user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Replace any session of `user_id` with a fresh one.
    async fn create(&self, user_id: UserId) -> Result<UserSession, StoreError>;
    /// Current session of `user_id`.
    async fn get(&self, user_id: UserId) -> Result<Option<UserSession>, StoreError>;
    /// Overwrite the session of `user_id`.
    async fn update(&self, user_id: UserId, session: UserSession) -> Result<(), StoreError>;
    /// Remove the session of `user_id`; missing sessions are not an error.
    async fn delete(&self, user_id: UserId) -> Result<(), StoreError>;
}

/// [`SessionStore`] kept in a bounded `moka` cache
#[derive(Clone)]
pub struct InMemorySessionStore {
    cache: Cache<UserId, UserSession>,
}

impl InMemorySessionStore {
    /// Store holding at most `capacity` sessions. A non-zero
    /// `idle_timeout_secs` expires sessions untouched for that long.
    #[must_use]
    pub fn new(capacity: u64, idle_timeout_secs: u64) -> Self {
        let mut builder = Cache::builder().max_capacity(capacity);
        if idle_timeout_secs > 0 {
            builder = builder.time_to_idle(Duration::from_secs(idle_timeout_secs));
        }
        Self {
            cache: builder.build(),
        }
    }

    /// Store sized from settings.
    #[must_use]
    pub fn from_settings(settings: &FlowSettings) -> Self {
        Self::new(settings.session_capacity, settings.session_idle_timeout_secs)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: UserId) -> Result<UserSession, StoreError> {
        let session = UserSession::new();
        self.cache.insert(user_id, session.clone()).await;
        debug!(user_id, "Session created");
        Ok(session)
    }

    async fn get(&self, user_id: UserId) -> Result<Option<UserSession>, StoreError> {
        Ok(self.cache.get(&user_id).await)
    }

    async fn update(&self, user_id: UserId, session: UserSession) -> Result<(), StoreError> {
        self.cache.insert(user_id, session).await;
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<(), StoreError> {
        if self.cache.remove(&user_id).await.is_some() {
            debug!(user_id, "Session deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::step::Step;

    #[tokio::test]
    async fn test_create_replaces_existing() {
        let store = InMemorySessionStore::new(16, 0);
        let mut session = store.create(1).await.expect("create");
        session.step = Step::Price;
        store.update(1, session).await.expect("update");

        let fresh = store.create(1).await.expect("create again");
        assert_eq!(fresh, UserSession::new());
        assert_eq!(store.get(1).await.expect("get"), Some(UserSession::new()));
    }

    #[tokio::test]
    async fn test_sessions_are_per_user() {
        let store = InMemorySessionStore::new(16, 0);
        store.create(1).await.expect("create");
        assert_eq!(store.get(2).await.expect("get"), None);

        store.delete(1).await.expect("delete");
        store.delete(1).await.expect("delete twice");
        assert_eq!(store.get(1).await.expect("get"), None);
    }
}
