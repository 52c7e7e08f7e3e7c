use std::sync::Arc;

use vetrina_pipeline::SigningPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable: inner data is behind `Arc` or is
/// already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vetrina_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The signing pipeline, built once at startup.
    pub pipeline: Arc<SigningPipeline>,
}
