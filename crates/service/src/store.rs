use std::{marker::PhantomData, sync::Arc};

use models::entity::{self, key_for, key_prefix, Entity, EntityId};
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::storage::KvBackend;

/// Namespaced collection of one record type in the shared cache.
///
/// Creates and overwrites go through the backend's conditional writes, so
/// two racing creates for the same id cannot both succeed.
pub struct EntityStore<T> {
    backend: Arc<dyn KvBackend>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend), _entity: PhantomData }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend, _entity: PhantomData }
    }

    pub async fn exists(&self, id: EntityId) -> Result<bool, ServiceError> {
        self.backend.exists(&key_for::<T>(id)).await
    }

    /// Insert a new record; fails if the id is taken. Returns the record as stored.
    pub async fn create(&self, mut record: T) -> Result<T, ServiceError> {
        record.validate()?;
        record.attach_links();
        let raw = entity::encode(&record)?;
        if !self.backend.set_if_absent(&record.key(), raw).await? {
            return Err(ServiceError::already_exists(T::LABEL, record.id()));
        }
        debug!(key = %record.key(), "record created");
        Ok(record)
    }

    pub async fn get(&self, id: EntityId) -> Result<T, ServiceError> {
        let key = key_for::<T>(id);
        let raw = self
            .backend
            .get(&key)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::LABEL, id))?;
        decode_record(&key, &raw)
    }

    /// Full replace of an existing record; no field merging.
    pub async fn update(&self, mut record: T) -> Result<T, ServiceError> {
        record.validate()?;
        record.attach_links();
        let raw = entity::encode(&record)?;
        if !self.backend.set_if_present(&record.key(), raw).await? {
            return Err(ServiceError::not_found(T::LABEL, record.id()));
        }
        debug!(key = %record.key(), "record overwritten");
        Ok(record)
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        let removed = self.backend.delete(&[key_for::<T>(id)]).await?;
        if removed == 0 {
            return Err(ServiceError::not_found(T::LABEL, id));
        }
        Ok(())
    }

    /// Clear the namespace. Keys written after the scan are not touched.
    /// Returns how many records were removed.
    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let keys = self.backend.keys_with_prefix(&key_prefix::<T>()).await?;
        let matched = keys.len() as u64;
        let removed = self.backend.delete(&keys).await?;
        if removed != matched {
            warn!(namespace = T::NAMESPACE, matched, removed, "bulk delete count mismatch");
            return Err(ServiceError::PartialFailure { matched, removed });
        }
        Ok(removed)
    }

    /// Every record in the namespace ordered by id; empty when there are none.
    pub async fn list_all(&self) -> Result<Vec<T>, ServiceError> {
        let keys = self.backend.keys_with_prefix(&key_prefix::<T>()).await?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            // deleted between the scan and the read
            let Some(raw) = self.backend.get(&key).await? else { continue };
            records.push(decode_record::<T>(&key, &raw)?);
        }
        records.sort_by_key(|r| r.id());
        Ok(records)
    }
}

fn decode_record<T: Entity>(key: &str, raw: &str) -> Result<T, ServiceError> {
    entity::decode(raw).map_err(|e| ServiceError::Corrupt { key: key.to_string(), reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_backend, sample_poll, UnderCountingBackend};
    use models::{links::POLL_LINKS, Poll, Vote, Voter};

    #[tokio::test]
    async fn create_then_get_returns_record_with_links() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Poll>::new(memory_backend());
        let created = store.create(sample_poll(5)).await?;
        let fetched = store.get(5).await?;

        assert_eq!(created, fetched);
        assert_eq!(fetched.poll_title, "Favourite colour");
        assert_eq!(fetched.links, POLL_LINKS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn second_create_fails_and_keeps_first() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Voter>::new(memory_backend());
        store.create(Voter::new(1, "Grace", "Hopper")).await?;

        let err = store.create(Voter::new(1, "Someone", "Else")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
        assert_eq!(store.get(1).await?.first_name, "Grace");
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_existing_record() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Voter>::new(memory_backend());
        let err = store.update(Voter::new(7, "a", "b")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(!store.exists(7).await?);

        store.create(Voter::new(7, "a", "b")).await?;
        store.update(Voter::new(7, "c", "d")).await?;
        let voter = store.get(7).await?;
        assert_eq!((voter.first_name.as_str(), voter.last_name.as_str()), ("c", "d"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_and_existing() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Vote>::new(memory_backend());
        assert!(matches!(store.delete(3).await, Err(ServiceError::NotFound(_))));

        store.create(Vote::new(3, 1, 1, 2)).await?;
        store.delete(3).await?;
        assert!(matches!(store.get(3).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_all_is_empty_then_sorted() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Poll>::new(memory_backend());
        assert!(store.list_all().await?.is_empty());

        for id in [9, 2, 5] {
            store.create(sample_poll(id)).await?;
        }
        let ids: Vec<_> = store.list_all().await?.iter().map(|p| p.poll_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_only_touches_its_namespace() -> Result<(), anyhow::Error> {
        let backend = memory_backend();
        let polls = EntityStore::<Poll>::new(backend.clone());
        let voters = EntityStore::<Voter>::new(backend);
        polls.create(sample_poll(1)).await?;
        polls.create(sample_poll(2)).await?;
        voters.create(Voter::new(1, "a", "b")).await?;

        assert_eq!(polls.delete_all().await?, 2);
        assert!(polls.list_all().await?.is_empty());
        assert_eq!(voters.list_all().await?.len(), 1);
        assert_eq!(polls.delete_all().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_reports_count_mismatch() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Poll>::new(Arc::new(UnderCountingBackend::default()));
        for id in [1, 2, 3] {
            store.create(sample_poll(id)).await?;
        }

        let err = store.delete_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::PartialFailure { matched: 3, removed: 2 }));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payload_is_not_written() -> Result<(), anyhow::Error> {
        let store = EntityStore::<Voter>::new(memory_backend());
        let mut voter = Voter::new(4, "a", "b");
        let entry = models::VoterPoll { poll_id: 1, vote_date: chrono::Utc::now() };
        voter.vote_history = vec![entry.clone(), entry];

        let err = store.create(voter).await.unwrap_err();
        assert!(err.is_malformed_input());
        assert!(!store.exists(4).await?);
        Ok(())
    }
}
