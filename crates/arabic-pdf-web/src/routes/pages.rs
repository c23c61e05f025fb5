//! Page routes.

use axum::extract::State;
use std::sync::Arc;

use crate::state::AppState;
use crate::templates::IndexTemplate;

/// Landing page listing the available fonts.
pub async fn index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    IndexTemplate {
        fonts: state.converter.list_fonts().await.to_vec(),
        engine: state.converter.engine_name(),
    }
}
