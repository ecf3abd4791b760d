use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ModelError;

/// Identity type shared by every record kind.
pub type EntityId = u32;

/// A record kept as one JSON document under `<NAMESPACE>:<id>`.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key prefix, also the collection name in URLs.
    const NAMESPACE: &'static str;
    /// Singular name used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    /// Shape checks beyond what deserialization already enforces.
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }

    /// Stamp static metadata onto the record before it is written.
    fn attach_links(&mut self) {}

    fn key(&self) -> String {
        key_for::<Self>(self.id())
    }
}

pub fn key_for<T: Entity>(id: EntityId) -> String {
    format!("{}{}", key_prefix::<T>(), id)
}

pub fn key_prefix<T: Entity>() -> String {
    format!("{}:", T::NAMESPACE)
}

pub fn encode<T: Entity>(entity: &T) -> Result<String, ModelError> {
    Ok(serde_json::to_string(entity)?)
}

pub fn decode<T: Entity>(raw: &str) -> Result<T, ModelError> {
    Ok(serde_json::from_str(raw)?)
}
