pub mod health;
pub mod signing;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /immobili/{id_immobile}/firma    POST -> sign_property
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(signing::router())
}
