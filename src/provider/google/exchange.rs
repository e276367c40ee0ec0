//! Authorization code → token bundle.

use super::rejection;
use crate::provider::ProviderError;
use crate::session::TokenBundle;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Google token endpoint response
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Space-separated granted scopes
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_bundle(self) -> TokenBundle {
        TokenBundle {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.and_then(expiry_from_now),
            scope: self
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            token_type: self.token_type,
        }
    }
}

/// `now + seconds`, or `None` when the lifetime is out of range.
fn expiry_from_now(seconds: i64) -> Option<DateTime<Utc>> {
    let expiry = Duration::try_seconds(seconds).and_then(|d| Utc::now().checked_add_signed(d));
    if expiry.is_none() {
        tracing::warn!(expires_in = seconds, "Ignoring out-of-range token lifetime");
    }
    expiry
}

/// Exchange an authorization code at `token_url`.
///
/// Codes are single-use: a replayed, expired or mistyped code comes back as
/// `invalid_grant`.
pub(super) async fn exchange_code_for_token(
    http: &reqwest::Client,
    token_url: &str,
    code: &str,
    redirect_uri: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<TokenBundle, ProviderError> {
    let mut form_data = HashMap::new();
    form_data.insert("grant_type", "authorization_code");
    form_data.insert("code", code);
    form_data.insert("redirect_uri", redirect_uri);
    form_data.insert("client_id", client_id);
    form_data.insert("client_secret", client_secret);

    tracing::debug!(url = %token_url, "Exchanging authorization code for token");

    let response = http
        .post(token_url)
        .header("Accept", "application/json")
        .form(&form_data)
        .send()
        .await
        .map_err(|e| ProviderError::Transport(format!("Token exchange request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(rejection(response).await);
    }

    let token_response: TokenResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::Transport(format!("Failed to parse token response: {}", e)))?;

    tracing::debug!(
        has_refresh_token = token_response.refresh_token.is_some(),
        expires_in = ?token_response.expires_in,
        "Token exchange successful"
    );

    Ok(token_response.into_bundle())
}
