//! OAuth endpoints for the manual (out-of-band) code flow.
//!
//! 1. UI calls GET /api/auth and shows the consent URL
//! 2. User approves on Google and copies the code
//! 3. UI posts the code to POST /api/auth/callback
//! 4. Code is exchanged and the tokens are stored in the session cookie

use super::error::AppError;
use super::{AppState, SuccessResponse};
use crate::provider::GMAIL_SEND_SCOPE;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shown for any exchange failure; details stay in the server log
const AUTH_FAILED: &str = "Authentication failed";

#[derive(Serialize)]
pub struct AuthUrlResponse {
    url: String,
}

/// Body of POST /api/auth/callback
#[derive(Deserialize)]
pub struct CallbackRequest {
    #[serde(default)]
    code: String,
}

#[derive(Serialize)]
pub struct AuthStatusResponse {
    authenticated: bool,
}

/// Create OAuth API router
pub fn create_auth_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth", get(auth_url))
        .route("/api/auth/callback", post(auth_callback))
        .route("/api/auth/status", get(auth_status))
        .with_state(Arc::new(state))
}

/// GET /api/auth
///
/// Returns the consent URL (gmail.send scope, offline access).
async fn auth_url(State(state): State<Arc<AppState>>) -> Result<Json<AuthUrlResponse>, AppError> {
    let url = state
        .provider
        .authorization_url(&[GMAIL_SEND_SCOPE])
        .map_err(|e| {
            error!(error = %e, "Failed to build authorization URL");
            AppError::ServerError("Failed to generate auth URL".to_string())
        })?;

    debug!("Authorization URL issued");

    Ok(Json(AuthUrlResponse { url }))
}

/// POST /api/auth/callback
///
/// Exchanges the pasted code and replaces the session cookie with the new
/// token bundle. The client only ever learns that authentication failed.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<CallbackRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    let Json(request) = payload?;

    let code = request.code.trim();
    if code.is_empty() {
        warn!("Callback without authorization code");
        return Err(AppError::ServerError(AUTH_FAILED.to_string()));
    }

    let bundle = state.provider.exchange_code(code).await.map_err(|e| {
        error!(error = %e, "Token exchange failed");
        AppError::ServerError(AUTH_FAILED.to_string())
    })?;

    let jar = state.sessions.persist(jar, &bundle).map_err(|e| {
        error!(error = %e, "Failed to store token bundle");
        AppError::ServerError(AUTH_FAILED.to_string())
    })?;

    info!(
        has_refresh_token = bundle.refresh_token.is_some(),
        sealed = state.sessions.is_sealed(),
        "OAuth flow completed successfully"
    );

    Ok((jar, Json(SuccessResponse::ok())))
}

/// GET /api/auth/status
async fn auth_status(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: state.sessions.auth_state(&jar).is_authenticated(),
    })
}
