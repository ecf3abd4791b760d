use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::KvBackend;
use crate::errors::ServiceError;

/// Process-local stand-in for the shared cache.
///
/// Each shard of the map is locked per operation, which gives the same
/// single-key atomicity the Redis backend offers.
#[derive(Default)]
pub struct MemoryCache {
    inner: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryCache {
    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.inner.get(key).map(|v| v.value().clone()))
    }

    async fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        Ok(self.inner.contains_key(key))
    }

    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        match self.inner.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
        }
    }

    async fn set_if_present(&self, key: &str, value: String) -> Result<bool, ServiceError> {
        match self.inner.get_mut(key) {
            Some(mut slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, ServiceError> {
        let removed = keys.iter().filter(|k| self.inner.remove(k.as_str()).is_some()).count();
        Ok(removed as u64)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .inner
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conditional_writes_respect_presence() -> Result<(), anyhow::Error> {
        let cache = MemoryCache::new();

        assert!(!cache.set_if_present("votes:1", "a".into()).await?);
        assert!(cache.set_if_absent("votes:1", "a".into()).await?);
        assert!(!cache.set_if_absent("votes:1", "b".into()).await?);
        assert_eq!(cache.get("votes:1").await?.as_deref(), Some("a"));

        assert!(cache.set_if_present("votes:1", "c".into()).await?);
        assert_eq!(cache.get("votes:1").await?.as_deref(), Some("c"));
        Ok(())
    }

    #[tokio::test]
    async fn prefix_scan_and_delete_count() -> Result<(), anyhow::Error> {
        let cache = MemoryCache::new();
        for key in ["polls:1", "polls:2", "pollsters:1", "votes:1"] {
            cache.set_if_absent(key, "{}".into()).await?;
        }

        let mut keys = cache.keys_with_prefix("polls:").await?;
        keys.sort();
        assert_eq!(keys, vec!["polls:1".to_string(), "polls:2".to_string()]);

        let removed = cache.delete(&["polls:1".to_string(), "polls:9".to_string()]).await?;
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 3);
        Ok(())
    }
}
