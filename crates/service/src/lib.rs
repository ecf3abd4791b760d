//! Service layer providing record operations on top of the shared cache.
//! - `storage` hides the cache behind `KvBackend` (Redis or in-process).
//! - `store` gives one namespaced collection per record type.
//! - `history` and `votes` hold the rules that span more than a single write.

pub mod errors;
pub mod history;
pub mod storage;
pub mod store;
#[cfg(test)]
pub mod test_support;
pub mod votes;

pub use errors::ServiceError;
pub use history::VoteHistoryEditor;
pub use storage::{connect, KvBackend};
pub use store::EntityStore;
pub use votes::{ReferenceValidator, VoteService};
