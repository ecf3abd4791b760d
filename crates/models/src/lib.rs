//! Record types for the voters, polls and votes services.
//! - One JSON document per record, keyed by `<namespace>:<id>`.
//! - Field names on the wire follow the published API (`VoterID`, `PollTitle`, ...).

pub mod entity;
pub mod errors;
pub mod links;
pub mod poll;
pub mod vote;
pub mod voter;

pub use entity::{Entity, EntityId};
pub use errors::ModelError;
pub use poll::{Poll, PollOption};
pub use vote::Vote;
pub use voter::{Voter, VoterPoll};
