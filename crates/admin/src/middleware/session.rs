//! Session middleware configuration for admin.
//!
//! Sessions live in process memory: they only carry the mounted products
//! tab, which is rebuilt from the backend on every mount anyway. The store
//! is a bounded `moka` cache, so idle sessions are evicted and the number
//! of live sessions has a ceiling.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{
    ExpiredDeletion, Expiry, SessionManagerLayer, SessionStore, cookie::SameSite,
};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "coffee_admin_session";

/// Idle sessions expire after 8 hours.
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Upper bound on sessions held at once.
pub const SESSION_CAPACITY: u64 = 10_000;

/// How often expired sessions are swept out of the store.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// In-memory session store with idle eviction.
#[derive(Debug, Clone)]
pub struct SessionCache {
    cache: Cache<Id, Record>,
}

impl SessionCache {
    /// Create a store holding at most `capacity` sessions, each dropped
    /// after `idle` without reads or writes.
    #[must_use]
    pub fn new(capacity: u64, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Number of sessions currently held.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Periodically delete expired sessions until the process exits.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = store.delete_expired().await {
                    tracing::warn!(error = %e, "Session sweep failed");
                }
            }
        })
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(SESSION_CAPACITY, session_idle())
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| is_active(record.expiry_date)))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionCache {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let expired: Vec<Id> = self
            .cache
            .iter()
            .filter(|(_, record)| !is_active(record.expiry_date))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.cache.invalidate(id).await;
        }
        self.cache.run_pending_tasks().await;

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "Deleted expired sessions");
        }
        Ok(())
    }
}

fn is_active(expiry_date: OffsetDateTime) -> bool {
    expiry_date > OffsetDateTime::now_utc()
}

fn session_idle() -> Duration {
    Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs())
}

/// Create the session layer over the given store.
#[must_use]
pub fn create_session_layer(
    config: &AdminConfig,
    store: SessionCache,
) -> SessionManagerLayer<SessionCache> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
