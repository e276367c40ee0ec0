// HTTP API and UI page

mod error;
pub mod auth;
pub mod send;
pub mod ui;

pub use auth::create_auth_router;
pub use send::create_send_router;
pub use ui::create_ui_router;

use crate::provider::MailProvider;
use crate::session::SessionStore;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Read-only after startup; sessions live in the client cookie.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MailProvider>,
    pub sessions: SessionStore,
}

/// `{ "success": true }`
#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

/// Full application: UI page, OAuth endpoints and send endpoint
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_ui_router())
        .merge(create_auth_router(state.clone()))
        .merge(create_send_router(state))
        .layer(TraceLayer::new_for_http())
}
