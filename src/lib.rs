// Bucket Gateway - HTTP-triggered handlers over a single object-storage bucket

pub mod config;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
