//! Download route returning the raw PDF.

use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Response,
};
use arabic_pdf_core::{RenderRequest, SelectionPolicy};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::helpers::{ApiError, ResultExt, RouteResult};
use crate::state::AppState;

const DEFAULT_FILE_NAME: &str = "document.pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SavePdfRequest {
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub font_file_name: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
}

/// Render and return the PDF as an attachment.
///
/// Font hints are treated leniently: a bad pair falls back to automatic
/// selection rather than failing the download.
pub async fn save_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SavePdfRequest>, JsonRejection>,
) -> RouteResult<Response> {
    let Json(payload) = payload.or_bad_request()?;
    let file_name = attachment_name(payload.file_name.as_deref());

    let request = RenderRequest::from_parts(
        payload.html_content,
        payload.font_family,
        payload.font_file_name,
    );
    let pdf = state
        .converter
        .convert(&request, SelectionPolicy::Lenient)
        .await
        .map_err(|e| {
            if !e.is_validation() {
                error!("Conversion failed for {}: {}", file_name, e);
            }
            ApiError::from(e)
        })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, content_disposition(&file_name))
        .body(Body::from(pdf.bytes))
        .or_internal_error()
}

/// File name safe to place inside a quoted header parameter.
fn attachment_name(requested: Option<&str>) -> String {
    let cleaned: String = requested
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// `attachment` disposition for `file_name`.
///
/// Non-ASCII names get an ASCII `filename` fallback plus an RFC 6266
/// `filename*` parameter carrying the UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    if file_name.is_ascii() {
        return format!("attachment; filename=\"{file_name}\"");
    }

    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}
