//! HTTP route handlers for the HTML to PDF service.
//!
//! JSON endpoints live under `/api`; the landing page is rendered with Askama
//! from the `templates` module.

mod convert;
mod fonts;
mod pages;
mod savepdf;

pub use convert::convert_html;
pub use fonts::{list_fonts, refresh_fonts};
pub use pages::index;
pub use savepdf::save_pdf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        // Pages
        .route("/", get(index))
        // API endpoints
        .route("/api/fonts", get(list_fonts))
        .route("/api/fonts/refresh", post(refresh_fonts))
        .route("/api/convert-html", post(convert_html))
        .route("/api/pdf/savepdf", post(save_pdf))
        // Middleware
        // Generated documents are never reused between requests
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, max-age=0"),
        ))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
