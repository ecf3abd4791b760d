#![cfg(test)]
use std::sync::Arc;

use models::{Poll, PollOption};

use crate::errors::ServiceError;
use crate::storage::{KvBackend, MemoryCache};

/// Fresh in-process cache, one per test so tests never share records.
pub fn memory_backend() -> Arc<dyn KvBackend> {
    Arc::new(MemoryCache::new())
}

pub fn sample_poll(poll_id: u32) -> Poll {
    let mut poll = Poll::new(poll_id, "Favourite colour", "Which colour do you like best?");
    poll.poll_options = vec![
        PollOption { option_id: 1, option_text: "Red".into() },
        PollOption { option_id: 2, option_text: "Blue".into() },
    ];
    poll
}

/// Removes what it is asked to but reports one key fewer, like a backend
/// that lost a key to a concurrent writer mid-delete.
#[derive(Default)]
pub struct UnderCountingBackend {
    inner: MemoryCache,
}

#[async_trait::async_trait]
impl KvBackend for UnderCountingBackend {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.inner.ping().await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        self.inner.exists(key).await
    }

    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        self.inner.set_if_absent(key, value).await
    }

    async fn set_if_present(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        self.inner.set_if_present(key, value).await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, ServiceError> {
        Ok(self.inner.delete(keys).await?.saturating_sub(1))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ServiceError> {
        self.inner.keys_with_prefix(prefix).await
    }
}
