use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use super::KvBackend;
use crate::errors::ServiceError;

/// Shared Redis instance holding every namespace.
///
/// Records are plain string values (`GET`/`SET`), so any Redis-compatible
/// server works without extra modules. Conditional writes map onto
/// `SET .. NX` and `SET .. XX`.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, ServiceError> {
        let client = Client::open(url).map_err(ServiceError::backend)?;
        let connection = ConnectionManager::new(client).await.map_err(ServiceError::backend)?;
        Ok(Self { connection })
    }

    async fn set_conditionally(&self, key: &str, value: String, flag: &str) -> Result<bool, ServiceError> {
        let mut conn = self.connection.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg(flag)
            .query_async(&mut conn)
            .await
            .map_err(ServiceError::backend)?;
        Ok(reply.is_some())
    }
}

#[async_trait]
impl KvBackend for RedisCache {
    async fn ping(&self) -> Result<(), ServiceError> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await.map_err(ServiceError::backend)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(ServiceError::backend)?;
        Ok(value)
    }

    async fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        let mut conn = self.connection.clone();
        let found: bool = conn.exists(key).await.map_err(ServiceError::backend)?;
        Ok(found)
    }

    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        self.set_conditionally(key, value, "NX").await
    }

    async fn set_if_present(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        self.set_conditionally(key, value, "XX").await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, ServiceError> {
        // DEL with no arguments is a protocol error
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection.clone();
        let removed: u64 = conn.del(keys.to_vec()).await.map_err(ServiceError::backend)?;
        Ok(removed)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ServiceError> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(format!("{prefix}*")).await.map_err(ServiceError::backend)?;
        Ok(keys)
    }
}
