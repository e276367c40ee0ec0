// Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use gmail_sender::api::{create_app_router, AppState};
use gmail_sender::provider::{MailProvider, ProviderError, SendReceipt};
use gmail_sender::{RawMessage, SessionStore, TokenBundle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const VALID_CODE: &str = "VALID_CODE";

/// In-process stand-in for Google.
///
/// Accepts only `VALID_CODE`, counts every call, and fails submissions when
/// `submit_error` is set.
#[derive(Default)]
pub struct FakeProvider {
    pub exchanges: AtomicUsize,
    pub submissions: AtomicUsize,
    pub last_submission: Mutex<Option<(String, String, String)>>,
    pub submit_error: Option<ProviderError>,
}

impl FakeProvider {
    pub fn failing(error: ProviderError) -> Self {
        Self {
            submit_error: Some(error),
            ..Self::default()
        }
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

pub fn issued_bundle() -> TokenBundle {
    TokenBundle {
        access_token: "ya29.fake-access".to_string(),
        refresh_token: Some("1//fake-refresh".to_string()),
        expires_at: None,
        scope: vec!["https://www.googleapis.com/auth/gmail.send".to_string()],
        token_type: Some("Bearer".to_string()),
    }
}

#[async_trait]
impl MailProvider for FakeProvider {
    fn authorization_url(&self, scopes: &[&str]) -> Result<String, ProviderError> {
        Ok(format!(
            "https://accounts.example/auth?access_type=offline&scope={}",
            scopes.join("+")
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenBundle, ProviderError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if code == VALID_CODE {
            Ok(issued_bundle())
        } else {
            Err(ProviderError::Rejected {
                status: 400,
                message: "invalid_grant".to_string(),
            })
        }
    }

    async fn submit(
        &self,
        bundle: &TokenBundle,
        identity: &str,
        raw: &RawMessage,
    ) -> Result<SendReceipt, ProviderError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.last_submission.lock().unwrap() = Some((
            bundle.access_token.clone(),
            identity.to_string(),
            raw.as_str().to_string(),
        ));

        match &self.submit_error {
            Some(err) => Err(err.clone()),
            None => Ok(SendReceipt {
                id: Some("18c0f1".to_string()),
                thread_id: Some("18c0f1".to_string()),
            }),
        }
    }
}

pub fn app(provider: Arc<dyn MailProvider>, sessions: SessionStore) -> Router {
    create_app_router(AppState { provider, sessions })
}

pub fn fake_app(provider: &Arc<FakeProvider>) -> Router {
    app(provider.clone(), SessionStore::new(false))
}

pub fn json_request(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn call(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// Run the callback with `VALID_CODE` and return the `name=value` pair the
/// browser would send back.
pub async fn authenticate(app: Router) -> String {
    let response = call(
        app,
        json_request(
            "POST",
            "/api/auth/callback",
            &format!(r#"{{"code":"{}"}}"#, VALID_CODE),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let header = set_cookie(&response).expect("callback sets the session cookie");
    header.split(';').next().unwrap().trim().to_string()
}
