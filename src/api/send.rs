use super::error::AppError;
use super::{AppState, SuccessResponse};
use crate::message::EmailEnvelope;
use crate::send::{send, SendError};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::debug;

/// Create send API router
pub fn create_send_router(state: AppState) -> Router {
    Router::new()
        .route("/api/send", post(send_email))
        .with_state(Arc::new(state))
}

/// POST /api/send
///
/// Body: `{ "to": ..., "subject": ..., "message": ... }`
///
/// The session is checked before the body, so a request without a usable
/// cookie is always a 401. The response never touches the cookie.
async fn send_email(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<EmailEnvelope>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session = state.sessions.load(&jar).ok_or(SendError::Unauthenticated)?;
    let Json(envelope) = payload?;

    debug!(to = %envelope.to, "Send requested");

    send(state.provider.as_ref(), Some(&session), &envelope).await?;

    Ok(Json(SuccessResponse::ok()))
}
