//! Redis implementation of the session store

use std::time::Duration;

use async_trait::async_trait;
use kg_core::errors::DomainResult;
use kg_core::services::session::SessionStore;
use uuid::Uuid;

use super::redis_client::RedisClient;
use super::CacheConfig;

/// Session store keeping one `PX`-expiring string per session.
///
/// Keys are `<prefix><session id>`, values are the subject id. Expiry is left
/// to Redis.
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect and build a store from cache settings
    pub async fn connect(config: &CacheConfig) -> Result<Self, crate::InfrastructureError> {
        let client = RedisClient::new(config).await?;
        Ok(Self::new(client, config.key_prefix.clone()))
    }

    pub(crate) fn key(&self, session_id: Uuid) -> String {
        session_key(&self.key_prefix, session_id)
    }
}

pub(crate) fn session_key(prefix: &str, session_id: Uuid) -> String {
    format!("{}{}", prefix, session_id.as_hyphenated())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session_id: Uuid, subject_id: &str, ttl: Duration) -> DomainResult<()> {
        self.client
            .set_with_ttl(&self.key(session_id), subject_id, ttl)
            .await?;
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> DomainResult<Option<String>> {
        Ok(self.client.get(&self.key(session_id)).await?)
    }

    async fn delete(&self, session_ids: &[Uuid]) -> DomainResult<u64> {
        let keys: Vec<String> = session_ids.iter().map(|id| self.key(*id)).collect();
        Ok(self.client.delete_many(&keys).await?)
    }

    async fn health_check(&self) -> DomainResult<bool> {
        Ok(self.client.health_check().await?)
    }
}
