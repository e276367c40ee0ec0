// Configuration (file + environment)
pub mod config;

// Token bundle, cookie codec and session store
pub mod session;

// Message composition
pub mod message;

// Google OAuth / Gmail client behind the MailProvider trait
pub mod provider;

// Send workflow
pub mod send;

// HTTP API and UI
pub mod api;

pub use api::{create_app_router, AppState};
pub use config::AppConfig;
pub use message::{compose, EmailEnvelope, RawMessage};
pub use provider::{GoogleClient, MailProvider, ProviderError, SendReceipt};
pub use send::SendError;
pub use session::{AuthState, SessionStore, TokenBundle};
