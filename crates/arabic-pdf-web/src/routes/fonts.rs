//! Font catalog routes.

use axum::{Json, extract::State};
use arabic_pdf_core::FontEntry;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// Arabic-capable fonts as `[{filename, family}]`.
pub async fn list_fonts(State(state): State<Arc<AppState>>) -> Json<Vec<FontEntry>> {
    Json(state.converter.list_fonts().await.to_vec())
}

/// Drop any cached scan and list the fonts again.
pub async fn refresh_fonts(State(state): State<Arc<AppState>>) -> Json<Vec<FontEntry>> {
    state.converter.refresh_fonts();
    let fonts = state.converter.list_fonts().await;
    info!("Font catalog refreshed: {} fonts", fonts.len());
    Json(fonts.to_vec())
}
