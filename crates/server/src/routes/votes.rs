use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::Vote;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::parse_id;
use crate::state::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/votes", get(list).post(create).put(update).delete(delete_all))
        .route("/votes/:id", get(get_one).delete(delete_one))
}

#[utoipa::path(
    get, path = "/votes", tag = "votes",
    responses((status = 200, description = "All votes, possibly empty", body = [crate::openapi::VoteDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Vote>>, JsonApiError> {
    let votes = state.votes.list_all().await?;
    info!(count = votes.len(), "list votes");
    Ok(Json(votes))
}

#[utoipa::path(
    get, path = "/votes/{id}", tag = "votes",
    params(("id" = u32, Path, description = "Vote ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VoteDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vote>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.votes.get(id).await?))
}

/// The referenced voter and poll must already exist.
#[utoipa::path(
    post, path = "/votes", tag = "votes",
    request_body = crate::openapi::VoteDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::VoteDoc),
        (status = 400, description = "Malformed Input"),
        (status = 404, description = "Voter or poll not found"),
        (status = 409, description = "Already Exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Vote>, JsonRejection>,
) -> Result<Json<Vote>, JsonApiError> {
    let Json(vote) = payload?;
    Ok(Json(state.votes.create(vote).await?))
}

#[utoipa::path(
    put, path = "/votes", tag = "votes",
    request_body = crate::openapi::VoteDoc,
    responses(
        (status = 200, description = "Overwritten", body = crate::openapi::VoteDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<Vote>, JsonRejection>,
) -> Result<Json<Vote>, JsonApiError> {
    let Json(vote) = payload?;
    let updated = state.votes.update(vote).await?;
    info!(vote_id = updated.vote_id, "updated vote");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/votes/{id}", tag = "votes",
    params(("id" = u32, Path, description = "Vote ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    state.votes.delete(id).await?;
    info!(vote_id = id, "deleted vote");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/votes", tag = "votes",
    responses((status = 200, description = "Namespace cleared"), (status = 500, description = "Partial Failure"))
)]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    let removed = state.votes.delete_all().await?;
    info!(removed, "cleared votes");
    Ok(StatusCode::OK)
}
