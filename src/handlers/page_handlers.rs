use axum::{http::header, response::{Html, IntoResponse}};

use crate::pages;

/// Handler for the marketplace page at `/`
pub async fn index_page_handler() -> Html<&'static str> {
    Html(pages::INDEX)
}

/// Handler for the minting admin page at `/admin`
pub async fn admin_page_handler() -> Html<&'static str> {
    Html(pages::ADMIN)
}

pub async fn scratch_page_handler() -> Html<&'static str> {
    Html(pages::SCRATCH)
}

pub async fn crash_page_handler() -> Html<&'static str> {
    Html(pages::CRASH)
}

pub async fn live_page_handler() -> Html<&'static str> {
    Html(pages::LIVE)
}

pub async fn dashboard_page_handler() -> Html<&'static str> {
    Html(pages::DASHBOARD)
}

/// Handler for the shared stylesheet at `/static/style.css`
pub async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], pages::STYLESHEET)
}
