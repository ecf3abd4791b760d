use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::errors::ModelError;

/// One entry of a voter's participation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterPoll {
    #[serde(rename = "PollID")]
    pub poll_id: EntityId,
    /// Missing dates read as the Unix epoch.
    #[serde(rename = "VoteDate", default)]
    pub vote_date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "VoterID")]
    pub voter_id: EntityId,
    #[serde(rename = "FirstName", default)]
    pub first_name: String,
    #[serde(rename = "LastName", default)]
    pub last_name: String,
    #[serde(rename = "VoteHistory", default)]
    pub vote_history: Vec<VoterPoll>,
}

impl Voter {
    pub fn new(voter_id: EntityId, first_name: &str, last_name: &str) -> Self {
        Self {
            voter_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            vote_history: Vec::new(),
        }
    }

    pub fn history_position(&self, poll_id: EntityId) -> Option<usize> {
        self.vote_history.iter().position(|p| p.poll_id == poll_id)
    }
}

impl Entity for Voter {
    const NAMESPACE: &'static str = "voters";
    const LABEL: &'static str = "voter";

    fn id(&self) -> EntityId {
        self.voter_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_history(&self.vote_history)
    }
}

/// A history may mention each poll at most once.
pub fn validate_history(history: &[VoterPoll]) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(history.len());
    for entry in history {
        if !seen.insert(entry.poll_id) {
            return Err(ModelError::Validation(format!(
                "poll {} appears more than once in VoteHistory",
                entry.poll_id
            )));
        }
    }
    Ok(())
}
