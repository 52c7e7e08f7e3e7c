//! Route definitions for property signing.

use axum::routing::post;
use axum::Router;

use crate::handlers::signing;
use crate::state::AppState;

/// Signing routes mounted under `/api/v1`.
///
/// ```text
/// POST /immobili/{id_immobile}/firma -> sign_property
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/immobili/{id_immobile}/firma", post(signing::sign_property))
}
