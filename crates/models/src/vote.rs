use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::links::VOTE_LINKS;

/// A ballot cast by a voter in a poll. `VoterID` and `PollID` are checked
/// against their stores only when the vote is first created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "VoteID")]
    pub vote_id: EntityId,
    #[serde(rename = "VoterID")]
    pub voter_id: EntityId,
    #[serde(rename = "PollID")]
    pub poll_id: EntityId,
    #[serde(rename = "VoteValue", default)]
    pub vote_value: u32,
    #[serde(rename = "Links", default)]
    pub links: Vec<String>,
}

impl Vote {
    pub fn new(vote_id: EntityId, voter_id: EntityId, poll_id: EntityId, vote_value: u32) -> Self {
        Self { vote_id, voter_id, poll_id, vote_value, links: Vec::new() }
    }
}

impl Entity for Vote {
    const NAMESPACE: &'static str = "votes";
    const LABEL: &'static str = "vote";

    fn id(&self) -> EntityId {
        self.vote_id
    }

    fn attach_links(&mut self) {
        self.links = VOTE_LINKS.iter().map(|s| s.to_string()).collect();
    }
}
