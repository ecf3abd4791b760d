//! Editing of the poll-history list embedded in a voter record.
//!
//! The backend has no field-level update, so every edit reads the whole
//! voter, changes the copy and writes the whole record back. Two edits to
//! the same voter racing each other can lose one of the changes.

use models::{EntityId, Voter, VoterPoll};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::store::EntityStore;

#[derive(Clone)]
pub struct VoteHistoryEditor {
    voters: EntityStore<Voter>,
}

impl VoteHistoryEditor {
    pub fn new(voters: EntityStore<Voter>) -> Self {
        Self { voters }
    }

    /// Entries in insertion order, as modified by any removals.
    pub async fn list(&self, voter_id: EntityId) -> Result<Vec<VoterPoll>, ServiceError> {
        Ok(self.voters.get(voter_id).await?.vote_history)
    }

    pub async fn find(&self, voter_id: EntityId, poll_id: EntityId) -> Result<VoterPoll, ServiceError> {
        let voter = self.voters.get(voter_id).await?;
        voter
            .vote_history
            .into_iter()
            .find(|p| p.poll_id == poll_id)
            .ok_or_else(|| missing_entry(voter_id, poll_id))
    }

    #[instrument(skip(self, entry), fields(poll_id = entry.poll_id))]
    pub async fn add(&self, voter_id: EntityId, entry: VoterPoll) -> Result<VoterPoll, ServiceError> {
        let mut voter = self.voters.get(voter_id).await?;
        if voter.history_position(entry.poll_id).is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "poll {} already in history of voter {}",
                entry.poll_id, voter_id
            )));
        }
        voter.vote_history.push(entry.clone());
        self.voters.update(voter).await?;
        info!("history entry added");
        Ok(entry)
    }

    /// Removal swaps the last entry into the vacated slot; order is not kept.
    #[instrument(skip(self))]
    pub async fn remove(&self, voter_id: EntityId, poll_id: EntityId) -> Result<(), ServiceError> {
        let mut voter = self.voters.get(voter_id).await?;
        let index = voter
            .history_position(poll_id)
            .ok_or_else(|| missing_entry(voter_id, poll_id))?;
        voter.vote_history.swap_remove(index);
        self.voters.update(voter).await?;
        info!("history entry removed");
        Ok(())
    }

    /// Overwrite the entry for `poll_id` in place. The replacement may carry a
    /// different poll id as long as that id is not already in the history.
    #[instrument(skip(self, entry), fields(new_poll_id = entry.poll_id))]
    pub async fn replace(
        &self,
        voter_id: EntityId,
        poll_id: EntityId,
        entry: VoterPoll,
    ) -> Result<VoterPoll, ServiceError> {
        let mut voter = self.voters.get(voter_id).await?;
        let index = voter
            .history_position(poll_id)
            .ok_or_else(|| missing_entry(voter_id, poll_id))?;
        if entry.poll_id != poll_id && voter.history_position(entry.poll_id).is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "poll {} already in history of voter {}",
                entry.poll_id, voter_id
            )));
        }
        voter.vote_history[index] = entry.clone();
        self.voters.update(voter).await?;
        info!("history entry replaced");
        Ok(entry)
    }
}

fn missing_entry(voter_id: EntityId, poll_id: EntityId) -> ServiceError {
    ServiceError::NotFound(format!("poll {} not in history of voter {}", poll_id, voter_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_backend;
    use chrono::{TimeZone, Utc};

    fn entry(poll_id: EntityId) -> VoterPoll {
        VoterPoll { poll_id, vote_date: Utc.with_ymd_and_hms(2023, 11, 7, 9, 0, 0).unwrap() }
    }

    async fn editor_with_voter(voter_id: EntityId) -> Result<VoteHistoryEditor, ServiceError> {
        let voters = EntityStore::<Voter>::new(memory_backend());
        voters.create(Voter::new(voter_id, "Alan", "Turing")).await?;
        Ok(VoteHistoryEditor::new(voters))
    }

    #[tokio::test]
    async fn unknown_voter_is_not_found() -> Result<(), anyhow::Error> {
        let editor = editor_with_voter(1).await?;
        assert!(matches!(editor.list(2).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(editor.add(2, entry(1)).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected() -> Result<(), anyhow::Error> {
        let editor = editor_with_voter(1).await?;
        editor.add(1, entry(5)).await?;

        let err = editor.add(1, entry(5)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
        assert_eq!(editor.list(1).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_poll_id() -> Result<(), anyhow::Error> {
        let editor = editor_with_voter(1).await?;
        editor.add(1, entry(3)).await?;
        editor.add(1, entry(4)).await?;

        assert_eq!(editor.find(1, 4).await?, entry(4));
        assert!(matches!(editor.find(1, 9).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn remove_swaps_in_last_entry() -> Result<(), anyhow::Error> {
        let editor = editor_with_voter(1).await?;
        for poll_id in [1, 2, 3, 4] {
            editor.add(1, entry(poll_id)).await?;
        }

        editor.remove(1, 2).await?;
        let ids: Vec<_> = editor.list(1).await?.iter().map(|p| p.poll_id).collect();
        assert_eq!(ids, vec![1, 4, 3]);

        assert!(matches!(editor.remove(1, 2).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn replace_in_place() -> Result<(), anyhow::Error> {
        let editor = editor_with_voter(1).await?;
        editor.add(1, entry(1)).await?;
        editor.add(1, entry(2)).await?;

        let later = VoterPoll { poll_id: 2, vote_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() };
        editor.replace(1, 2, later.clone()).await?;
        assert_eq!(editor.list(1).await?, vec![entry(1), later]);

        assert!(matches!(editor.replace(1, 7, entry(7)).await, Err(ServiceError::NotFound(_))));
        // moving entry 2 onto poll 1 would duplicate poll 1
        assert!(matches!(editor.replace(1, 2, entry(1)).await, Err(ServiceError::AlreadyExists(_))));
        Ok(())
    }
}
