//! In-memory sessions keyed by chat and/or user.
//!
//! A session is created with `S::default()` on first access and lives until [`Sessions::reset`]
//! or process exit. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use botkit_core::{Message, Middleware, Result};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// How a message maps to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKey {
    /// One session per chat, shared by all its members.
    #[default]
    PerChat,
    /// One session per user, across chats.
    PerUser,
    /// One session per user within each chat.
    PerChatUser,
}

impl SessionKey {
    pub fn key_for(self, message: &Message) -> String {
        match self {
            SessionKey::PerChat => message.chat.id.to_string(),
            SessionKey::PerUser => format!("user:{}", message.user.id),
            SessionKey::PerChatUser => format!("{}/{}", message.chat.id, message.user.id),
        }
    }
}

/// Shared session map. Clones share the same storage.
#[derive(Clone)]
pub struct Sessions<S> {
    key: SessionKey,
    inner: Arc<RwLock<HashMap<String, S>>>,
}

impl<S> Sessions<S>
where
    S: Default + Clone + Send + Sync + 'static,
{
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn key_for(&self, message: &Message) -> String {
        self.key.key_for(message)
    }

    /// Snapshot of the session, created with defaults if absent.
    pub async fn get(&self, message: &Message) -> S {
        let key = self.key_for(message);
        if let Some(session) = self.inner.read().await.get(&key) {
            return session.clone();
        }
        self.inner.write().await.entry(key).or_default().clone()
    }

    /// Mutates the session in place (created with defaults if absent) and returns `f`'s result.
    pub async fn update<R>(&self, message: &Message, f: impl FnOnce(&mut S) -> R) -> R {
        let key = self.key_for(message);
        let mut map = self.inner.write().await;
        f(map.entry(key).or_default())
    }

    /// Drops the session; the next access starts from defaults again.
    pub async fn reset(&self, message: &Message) -> bool {
        let key = self.key_for(message);
        self.inner.write().await.remove(&key).is_some()
    }

    pub async fn contains(&self, message: &Message) -> bool {
        self.inner.read().await.contains_key(&self.key_for(message))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl<S> Default for Sessions<S>
where
    S: Default + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(SessionKey::default())
    }
}

/// Makes sure every message has a session before handlers run.
pub struct SessionMiddleware<S> {
    sessions: Sessions<S>,
}

impl<S> SessionMiddleware<S>
where
    S: Default + Clone + Send + Sync + 'static,
{
    pub fn new(sessions: Sessions<S>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<S> Middleware for SessionMiddleware<S>
where
    S: Default + Clone + Send + Sync + 'static,
{
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let created = !self.sessions.contains(message).await;
        self.sessions.update(message, |_| ()).await;
        debug!(
            session_key = %self.sessions.key_for(message),
            created = created,
            "Session ready"
        );
        Ok(true)
    }
}
