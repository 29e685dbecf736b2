//! API Routes
//!
//! - `/api/health` - Health checks
//! - `/invoke/{list,put}` - Lambda-style invocations, answer with the raw envelope
//! - `/objects` - Plain HTTP front door, answers with the unwrapped envelope

pub mod health;
pub mod invoke;
pub mod objects;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(invoke::router(state.clone()))
        .merge(objects::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http())
}
