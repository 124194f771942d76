//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::reserved::is_reserved;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject reserved codes without touching the store
/// 2. Resolve the code and record the click in one service call
/// 3. Return 302 Found with `Location` set to the destination
///
/// # Errors
///
/// Returns 404 Not Found if the code is reserved or doesn't exist.
/// Returns 503 Service Unavailable if the store times out.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if is_reserved(&code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let destination = state.link_service.redirect(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]).into_response())
}
