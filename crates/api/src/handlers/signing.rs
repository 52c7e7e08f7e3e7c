//! Handler for the property signing endpoint.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use vetrina_core::signing::{RawSigningBody, SigningRequest, SUCCESS_MESSAGE};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /immobili/{id_immobile}/firma
///
/// Validate the raw parts, run the signing pipeline, and answer with the
/// fixed confirmation message. The body is read as plain text so that an
/// absent or unparseable body gets the endpoint's own message instead of
/// a framework rejection.
pub async fn sign_property(
    State(state): State<AppState>,
    Path(id_immobile): Path<String>,
    body: String,
) -> AppResult<impl IntoResponse> {
    let parsed: Option<RawSigningBody> = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&body).ok()
    };

    let request = SigningRequest::from_parts(
        Some(&id_immobile),
        parsed.as_ref(),
        &state.config.allowed_colors,
    )?;

    let outcome = state.pipeline.execute(request).await?;
    tracing::info!(
        property_id = outcome.property_id,
        output_key = %outcome.output_key,
        "Signing request completed"
    );

    Ok(Json(DataResponse {
        data: SUCCESS_MESSAGE,
    }))
}
