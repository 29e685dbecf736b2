//! Lambda-style invocation endpoints
//!
//! The request body is `{ "event": {...}, "context": {...} }`; the handler's
//! envelope is returned as-is with HTTP 200, the way a function runtime
//! hands it to an API gateway proxy integration.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::gateway::{InboundRequest, ResponseEnvelope};
use crate::models::AppState;
use crate::types::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct Invocation {
    pub event: InboundRequest,
    #[serde(default)]
    pub context: Value,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/invoke/list", post(invoke_list))
        .route("/invoke/put", post(invoke_put))
        .with_state(state)
}

fn parse(payload: Result<Json<Invocation>, JsonRejection>) -> AppResult<Invocation> {
    payload
        .map(|Json(invocation)| invocation)
        .map_err(|e| AppError::InvalidRequest(e.body_text()))
}

async fn invoke_list(
    State(state): State<AppState>,
    payload: Result<Json<Invocation>, JsonRejection>,
) -> AppResult<Json<ResponseEnvelope>> {
    let invocation = parse(payload)?;
    info!("List invocation");

    let envelope = state
        .list_handler
        .handle(&invocation.event, &invocation.context)
        .await;
    Ok(Json(envelope))
}

async fn invoke_put(
    State(state): State<AppState>,
    payload: Result<Json<Invocation>, JsonRejection>,
) -> AppResult<Json<ResponseEnvelope>> {
    let invocation = parse(payload)?;
    info!("Put invocation");

    let envelope = state
        .put_handler
        .handle(&invocation.event, &invocation.context)
        .await;
    Ok(Json(envelope))
}
