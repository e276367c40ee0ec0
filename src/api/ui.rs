use axum::{response::Html, routing::get, Router};

/// Single-page form driving the auth and send endpoints
const INDEX_HTML: &str = include_str!("../../static/index.html");

pub fn create_ui_router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
