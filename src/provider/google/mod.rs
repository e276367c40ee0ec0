//! Google OAuth 2.0 + Gmail REST client.
//!
//! Talks to Google directly over HTTPS:
//! 1. Consent URL on `accounts.google.com` (offline access, gmail.send scope)
//! 2. Code exchange at `oauth2.googleapis.com/token`
//! 3. `POST /gmail/v1/users/{user}/messages/send` with the raw message

mod exchange;
mod gmail;

use super::{MailProvider, ProviderError, SendReceipt};
use crate::config::GoogleConfig;
use crate::message::RawMessage;
use crate::session::TokenBundle;
use async_trait::async_trait;

/// Google implementation of [`MailProvider`].
pub struct GoogleClient {
    config: GoogleConfig,
    http: reqwest::Client,
}

/// Client id and secret, once both are known to be present
struct ClientCredentials<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

impl GoogleClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Result<ClientCredentials<'_>, ProviderError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or_else(|| ProviderError::Configuration("GOOGLE_CLIENT_ID is not set".to_string()))?;
        let client_secret = self.config.client_secret.as_deref().ok_or_else(|| {
            ProviderError::Configuration("GOOGLE_CLIENT_SECRET is not set".to_string())
        })?;

        Ok(ClientCredentials {
            client_id,
            client_secret,
        })
    }

    /// Build the consent URL for `scopes`.
    pub fn build_auth_url(&self, scopes: &[&str]) -> Result<String, ProviderError> {
        let credentials = self.credentials()?;
        let scope = scopes.join(" ");

        Ok(format!(
            "{}?access_type=offline&scope={}&response_type=code&client_id={}&redirect_uri={}",
            self.config.auth_url,
            urlencoding::encode(&scope),
            urlencoding::encode(credentials.client_id),
            urlencoding::encode(&self.config.redirect_uri)
        ))
    }
}

#[async_trait]
impl MailProvider for GoogleClient {
    fn authorization_url(&self, scopes: &[&str]) -> Result<String, ProviderError> {
        self.build_auth_url(scopes)
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenBundle, ProviderError> {
        let credentials = self.credentials()?;
        exchange::exchange_code_for_token(
            &self.http,
            &self.config.token_url,
            code,
            &self.config.redirect_uri,
            credentials.client_id,
            credentials.client_secret,
        )
        .await
    }

    async fn submit(
        &self,
        bundle: &TokenBundle,
        identity: &str,
        raw: &RawMessage,
    ) -> Result<SendReceipt, ProviderError> {
        gmail::send_raw_message(
            &self.http,
            &self.config.gmail_api_url,
            &bundle.access_token,
            identity,
            raw,
        )
        .await
    }
}

/// Turn a non-success Google response into [`ProviderError::Rejected`].
///
/// Google uses two error shapes: the OAuth one
/// (`{"error": "invalid_grant", "error_description": "..."}`) and the API one
/// (`{"error": {"code": 400, "message": "..."}}`). The human-readable message
/// is extracted from either; anything else is passed through as the raw body.
async fn rejection(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ProviderError::Rejected {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                body
            }
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;

    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    value
        .get("error_description")
        .and_then(|d| d.as_str())
        .or_else(|| error.as_str())
        .map(|s| s.to_string())
}
