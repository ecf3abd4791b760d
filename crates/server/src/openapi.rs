use common::ServiceKind;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthDoc {
    #[serde(rename = "Service")]
    pub service: String,
    /// Nanoseconds since the process started.
    #[serde(rename = "Uptime")]
    pub uptime: u64,
    #[serde(rename = "APIcalls")]
    pub api_calls: u64,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VoterPollDoc {
    #[serde(rename = "PollID")]
    pub poll_id: u32,
    #[serde(rename = "VoteDate")]
    #[schema(example = "2023-11-02T10:00:00Z")]
    pub vote_date: String,
}

#[derive(Serialize, ToSchema)]
pub struct VoterDoc {
    #[serde(rename = "VoterID")]
    pub voter_id: u32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "VoteHistory")]
    pub vote_history: Vec<VoterPollDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct PollOptionDoc {
    #[serde(rename = "PollOptionID")]
    pub option_id: u32,
    #[serde(rename = "PollOptionText")]
    pub option_text: String,
}

#[derive(Serialize, ToSchema)]
pub struct PollDoc {
    #[serde(rename = "PollID")]
    pub poll_id: u32,
    #[serde(rename = "PollTitle")]
    pub poll_title: String,
    #[serde(rename = "PollQuestion")]
    pub poll_question: String,
    #[serde(rename = "PollOptions")]
    pub poll_options: Vec<PollOptionDoc>,
    /// Filled in by the server; ignored on input.
    #[serde(rename = "Links")]
    pub links: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VoteDoc {
    #[serde(rename = "VoteID")]
    pub vote_id: u32,
    #[serde(rename = "VoterID")]
    pub voter_id: u32,
    #[serde(rename = "PollID")]
    pub poll_id: u32,
    #[serde(rename = "VoteValue")]
    pub vote_value: u32,
    /// Filled in by the server; ignored on input.
    #[serde(rename = "Links")]
    pub links: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::voters::list,
        crate::routes::voters::get_one,
        crate::routes::voters::create,
        crate::routes::voters::update,
        crate::routes::voters::delete_one,
        crate::routes::voters::delete_all,
        crate::routes::voters::list_history,
        crate::routes::voters::add_history,
        crate::routes::voters::replace_history,
        crate::routes::voters::find_history,
        crate::routes::voters::replace_history_at,
        crate::routes::voters::remove_history,
    ),
    components(schemas(HealthDoc, ErrorDoc, VoterDoc, VoterPollDoc)),
    tags((name = "health"), (name = "voters"))
)]
pub struct VotersApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::polls::list,
        crate::routes::polls::get_one,
        crate::routes::polls::create,
        crate::routes::polls::update,
        crate::routes::polls::delete_one,
        crate::routes::polls::delete_all,
    ),
    components(schemas(HealthDoc, ErrorDoc, PollDoc, PollOptionDoc)),
    tags((name = "health"), (name = "polls"))
)]
pub struct PollsApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::votes::list,
        crate::routes::votes::get_one,
        crate::routes::votes::create,
        crate::routes::votes::update,
        crate::routes::votes::delete_one,
        crate::routes::votes::delete_all,
    ),
    components(schemas(HealthDoc, ErrorDoc, VoteDoc)),
    tags((name = "health"), (name = "votes"))
)]
pub struct VotesApiDoc;

pub fn document(kind: ServiceKind) -> utoipa::openapi::OpenApi {
    match kind {
        ServiceKind::Voters => VotersApiDoc::openapi(),
        ServiceKind::Polls => PollsApiDoc::openapi(),
        ServiceKind::Votes => VotesApiDoc::openapi(),
    }
}
