use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::Poll;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::parse_id;
use crate::state::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/polls", get(list).post(create).put(update).delete(delete_all))
        .route("/polls/:id", get(get_one).delete(delete_one))
}

#[utoipa::path(
    get, path = "/polls", tag = "polls",
    responses((status = 200, description = "All polls, possibly empty", body = [crate::openapi::PollDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Poll>>, JsonApiError> {
    let polls = state.polls.list_all().await?;
    info!(count = polls.len(), "list polls");
    Ok(Json(polls))
}

#[utoipa::path(
    get, path = "/polls/{id}", tag = "polls",
    params(("id" = u32, Path, description = "Poll ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PollDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Poll>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.polls.get(id).await?))
}

#[utoipa::path(
    post, path = "/polls", tag = "polls",
    request_body = crate::openapi::PollDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PollDoc),
        (status = 400, description = "Malformed Input"),
        (status = 409, description = "Already Exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Poll>, JsonRejection>,
) -> Result<Json<Poll>, JsonApiError> {
    let Json(poll) = payload?;
    let created = state.polls.create(poll).await?;
    info!(poll_id = created.poll_id, options = created.poll_options.len(), "created poll");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/polls", tag = "polls",
    request_body = crate::openapi::PollDoc,
    responses(
        (status = 200, description = "Overwritten", body = crate::openapi::PollDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<Poll>, JsonRejection>,
) -> Result<Json<Poll>, JsonApiError> {
    let Json(poll) = payload?;
    let updated = state.polls.update(poll).await?;
    info!(poll_id = updated.poll_id, "updated poll");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/polls/{id}", tag = "polls",
    params(("id" = u32, Path, description = "Poll ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    state.polls.delete(id).await?;
    info!(poll_id = id, "deleted poll");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/polls", tag = "polls",
    responses((status = 200, description = "Namespace cleared"), (status = 500, description = "Partial Failure"))
)]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    let removed = state.polls.delete_all().await?;
    info!(removed, "cleared polls");
    Ok(StatusCode::OK)
}
