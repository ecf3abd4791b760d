use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{HealthReport, ServiceKind};
use models::EntityId;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::JsonApiError;
use crate::openapi;
use crate::state::ServerState;

pub mod polls;
pub mod voters;
pub mod votes;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[utoipa::path(
    get, path = "/{entities}/health", tag = "health",
    params(("entities" = String, Path, description = "voters, polls or votes")),
    responses((status = 200, description = "Uptime and call count", body = crate::openapi::HealthDoc))
)]
pub async fn health(State(state): State<ServerState>) -> Json<HealthReport> {
    Json(state.metrics.report())
}

pub async fn metrics(State(state): State<ServerState>) -> Result<Response, JsonApiError> {
    let body = state.metrics.encode().map_err(|e| {
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Metrics Unavailable", Some(e.to_string()))
    })?;
    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response())
}

/// Fault injection. The panic is turned into a 500 by `CatchPanicLayer`.
pub async fn crash() -> StatusCode {
    warn!("crash requested");
    panic!("crash endpoint invoked");
}

/// Counts every request, including ones that fail or panic downstream.
async fn track_calls(State(state): State<ServerState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    state.metrics.record_call();
    let response = next.run(req).await;
    state.metrics.observe_latency(started.elapsed());
    response
}

/// Path ids are unsigned 32-bit; anything else is malformed input.
pub(crate) fn parse_id(raw: &str) -> Result<EntityId, JsonApiError> {
    raw.trim()
        .parse::<EntityId>()
        .map_err(|e| JsonApiError::bad_request(format!("invalid id `{raw}`: {e}")))
}

/// Build the router for one service: its entity routes plus health, metrics,
/// crash and the OpenAPI description.
pub fn build_router(kind: ServiceKind, state: ServerState, cors: CorsLayer) -> Router {
    let entities = match kind {
        ServiceKind::Voters => voters::routes(),
        ServiceKind::Polls => polls::routes(),
        ServiceKind::Votes => votes::routes(),
    };

    Router::new()
        .merge(entities)
        .route(&format!("/{}/health", kind.name()), get(health))
        .route(&format!("/{}/metrics", kind.name()), get(metrics))
        .route("/crash", get(crash))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::document(kind)))
        .layer(middleware::from_fn_with_state(state.clone(), track_calls))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
