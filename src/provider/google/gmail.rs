use super::rejection;
use crate::message::RawMessage;
use crate::provider::{ProviderError, SendReceipt};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SendRequest<'a> {
    raw: &'a str,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    thread_id: Option<String>,
}

/// `users.messages.send` with an already-encoded message.
pub(super) async fn send_raw_message(
    http: &reqwest::Client,
    api_base: &str,
    access_token: &str,
    user_id: &str,
    raw: &RawMessage,
) -> Result<SendReceipt, ProviderError> {
    let url = format!(
        "{}/gmail/v1/users/{}/messages/send",
        api_base.trim_end_matches('/'),
        urlencoding::encode(user_id)
    );

    tracing::debug!(url = %url, "Submitting message to Gmail");

    let response = http
        .post(&url)
        .bearer_auth(access_token)
        .json(&SendRequest { raw: raw.as_str() })
        .send()
        .await
        .map_err(|e| ProviderError::Transport(format!("Gmail send request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(rejection(response).await);
    }

    // Any 2xx means the message was accepted; the body only carries ids
    let body = response.text().await.unwrap_or_default();
    let sent = serde_json::from_str::<SendResponse>(&body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable Gmail send response, treating as sent");
        SendResponse::default()
    });

    Ok(SendReceipt {
        id: sent.id,
        thread_id: sent.thread_id,
    })
}
