use std::sync::Arc;

use common::ApiMetrics;
use models::{Poll, Voter};
use service::{EntityStore, KvBackend, ReferenceValidator, VoteHistoryEditor, VoteService};

/// Everything a handler needs, cloned into every request.
///
/// All stores share one backend, so the votes service can check voters and
/// polls written by the other two processes.
#[derive(Clone)]
pub struct ServerState {
    pub metrics: Arc<ApiMetrics>,
    pub voters: EntityStore<Voter>,
    pub polls: EntityStore<Poll>,
    pub history: VoteHistoryEditor,
    pub votes: VoteService,
}

impl ServerState {
    pub fn new(backend: Arc<dyn KvBackend>, metrics: Arc<ApiMetrics>) -> Self {
        let voters = EntityStore::<Voter>::new(Arc::clone(&backend));
        let polls = EntityStore::<Poll>::new(Arc::clone(&backend));
        let refs = ReferenceValidator::new(voters.clone(), polls.clone());
        Self {
            metrics,
            history: VoteHistoryEditor::new(voters.clone()),
            votes: VoteService::new(EntityStore::new(backend), refs),
            voters,
            polls,
        }
    }
}
