use models::{EntityId, Poll, Vote, Voter};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::store::EntityStore;

/// Confirms that a vote's voter and poll exist in the shared cache.
#[derive(Clone)]
pub struct ReferenceValidator {
    voters: EntityStore<Voter>,
    polls: EntityStore<Poll>,
}

impl ReferenceValidator {
    pub fn new(voters: EntityStore<Voter>, polls: EntityStore<Poll>) -> Self {
        Self { voters, polls }
    }

    /// The voter is checked first; a missing voter is reported even when the
    /// poll is missing too.
    pub async fn check(&self, vote: &Vote) -> Result<(), ServiceError> {
        if !self.voters.exists(vote.voter_id).await? {
            return Err(ServiceError::VoterNotFound(vote.voter_id));
        }
        if !self.polls.exists(vote.poll_id).await? {
            return Err(ServiceError::PollNotFound(vote.poll_id));
        }
        Ok(())
    }
}

/// Vote records plus the cross-namespace checks done on create.
///
/// References are only checked at creation time. Deleting a voter or poll
/// later leaves its votes in place, and updates are stored as sent.
#[derive(Clone)]
pub struct VoteService {
    votes: EntityStore<Vote>,
    refs: ReferenceValidator,
}

impl VoteService {
    pub fn new(votes: EntityStore<Vote>, refs: ReferenceValidator) -> Self {
        Self { votes, refs }
    }

    #[instrument(skip(self, vote), fields(vote_id = vote.vote_id, voter_id = vote.voter_id, poll_id = vote.poll_id))]
    pub async fn create(&self, vote: Vote) -> Result<Vote, ServiceError> {
        if self.votes.exists(vote.vote_id).await? {
            return Err(ServiceError::already_exists("vote", vote.vote_id));
        }
        self.refs.check(&vote).await?;
        let created = self.votes.create(vote).await?;
        info!("vote recorded");
        Ok(created)
    }

    pub async fn get(&self, id: EntityId) -> Result<Vote, ServiceError> {
        self.votes.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Vote>, ServiceError> {
        self.votes.list_all().await
    }

    pub async fn update(&self, vote: Vote) -> Result<Vote, ServiceError> {
        self.votes.update(vote).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        self.votes.delete(id).await
    }

    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        self.votes.delete_all().await
    }
}
