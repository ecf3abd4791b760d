use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::{Voter, VoterPoll};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::parse_id;
use crate::state::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/voters", get(list).post(create).put(update).delete(delete_all))
        .route("/voters/:id", get(get_one).delete(delete_one))
        .route("/voters/:id/polls", get(list_history).post(add_history).put(replace_history))
        .route(
            "/voters/:id/polls/:poll_id",
            get(find_history).put(replace_history_at).delete(remove_history),
        )
}

#[utoipa::path(
    get, path = "/voters", tag = "voters",
    responses((status = 200, description = "All voters, possibly empty", body = [crate::openapi::VoterDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Voter>>, JsonApiError> {
    let voters = state.voters.list_all().await?;
    info!(count = voters.len(), "list voters");
    Ok(Json(voters))
}

#[utoipa::path(
    get, path = "/voters/{id}", tag = "voters",
    params(("id" = u32, Path, description = "Voter ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VoterDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Voter>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.voters.get(id).await?))
}

#[utoipa::path(
    post, path = "/voters", tag = "voters",
    request_body = crate::openapi::VoterDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::VoterDoc),
        (status = 400, description = "Malformed Input"),
        (status = 409, description = "Already Exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Voter>, JsonRejection>,
) -> Result<Json<Voter>, JsonApiError> {
    let Json(voter) = payload?;
    let created = state.voters.create(voter).await?;
    info!(voter_id = created.voter_id, "created voter");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/voters", tag = "voters",
    request_body = crate::openapi::VoterDoc,
    responses(
        (status = 200, description = "Overwritten", body = crate::openapi::VoterDoc),
        (status = 400, description = "Malformed Input"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<Voter>, JsonRejection>,
) -> Result<Json<Voter>, JsonApiError> {
    let Json(voter) = payload?;
    let updated = state.voters.update(voter).await?;
    info!(voter_id = updated.voter_id, "updated voter");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/voters/{id}", tag = "voters",
    params(("id" = u32, Path, description = "Voter ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    state.voters.delete(id).await?;
    info!(voter_id = id, "deleted voter");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/voters", tag = "voters",
    responses((status = 200, description = "Namespace cleared"), (status = 500, description = "Partial Failure"))
)]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    let removed = state.voters.delete_all().await?;
    info!(removed, "cleared voters");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get, path = "/voters/{id}/polls", tag = "voters",
    params(("id" = u32, Path, description = "Voter ID")),
    responses(
        (status = 200, description = "Poll history", body = [crate::openapi::VoterPollDoc]),
        (status = 404, description = "Voter not found")
    )
)]
pub async fn list_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<VoterPoll>>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.history.list(id).await?))
}

#[utoipa::path(
    post, path = "/voters/{id}/polls", tag = "voters",
    params(("id" = u32, Path, description = "Voter ID")),
    request_body = crate::openapi::VoterPollDoc,
    responses(
        (status = 200, description = "Entry added", body = crate::openapi::VoterPollDoc),
        (status = 404, description = "Voter not found"),
        (status = 409, description = "Poll already in history")
    )
)]
pub async fn add_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<VoterPoll>, JsonRejection>,
) -> Result<Json<VoterPoll>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(entry) = payload?;
    Ok(Json(state.history.add(id, entry).await?))
}

/// The entry to replace is the one whose PollID matches the body.
#[utoipa::path(
    put, path = "/voters/{id}/polls", tag = "voters",
    params(("id" = u32, Path, description = "Voter ID")),
    request_body = crate::openapi::VoterPollDoc,
    responses(
        (status = 200, description = "Entry replaced", body = crate::openapi::VoterPollDoc),
        (status = 404, description = "Voter or entry not found")
    )
)]
pub async fn replace_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<VoterPoll>, JsonRejection>,
) -> Result<Json<VoterPoll>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(entry) = payload?;
    Ok(Json(state.history.replace(id, entry.poll_id, entry).await?))
}

#[utoipa::path(
    get, path = "/voters/{id}/polls/{poll_id}", tag = "voters",
    params(
        ("id" = u32, Path, description = "Voter ID"),
        ("poll_id" = u32, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VoterPollDoc),
        (status = 404, description = "Voter or entry not found")
    )
)]
pub async fn find_history(
    State(state): State<ServerState>,
    Path((id, poll_id)): Path<(String, String)>,
) -> Result<Json<VoterPoll>, JsonApiError> {
    let (id, poll_id) = (parse_id(&id)?, parse_id(&poll_id)?);
    Ok(Json(state.history.find(id, poll_id).await?))
}

#[utoipa::path(
    put, path = "/voters/{id}/polls/{poll_id}", tag = "voters",
    params(
        ("id" = u32, Path, description = "Voter ID"),
        ("poll_id" = u32, Path, description = "Poll ID")
    ),
    request_body = crate::openapi::VoterPollDoc,
    responses(
        (status = 200, description = "Entry replaced", body = crate::openapi::VoterPollDoc),
        (status = 404, description = "Voter or entry not found"),
        (status = 409, description = "New PollID already in history")
    )
)]
pub async fn replace_history_at(
    State(state): State<ServerState>,
    Path((id, poll_id)): Path<(String, String)>,
    payload: Result<Json<VoterPoll>, JsonRejection>,
) -> Result<Json<VoterPoll>, JsonApiError> {
    let (id, poll_id) = (parse_id(&id)?, parse_id(&poll_id)?);
    let Json(entry) = payload?;
    Ok(Json(state.history.replace(id, poll_id, entry).await?))
}

#[utoipa::path(
    delete, path = "/voters/{id}/polls/{poll_id}", tag = "voters",
    params(
        ("id" = u32, Path, description = "Voter ID"),
        ("poll_id" = u32, Path, description = "Poll ID")
    ),
    responses((status = 200, description = "Entry removed"), (status = 404, description = "Voter or entry not found"))
)]
pub async fn remove_history(
    State(state): State<ServerState>,
    Path((id, poll_id)): Path<(String, String)>,
) -> Result<StatusCode, JsonApiError> {
    let (id, poll_id) = (parse_id(&id)?, parse_id(&poll_id)?);
    state.history.remove(id, poll_id).await?;
    Ok(StatusCode::OK)
}
