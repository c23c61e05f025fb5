//! Conversion route returning the PDF as base64 JSON.

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header,
};
use axum_extra::extract::Multipart;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use arabic_pdf_core::{RenderRequest, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::helpers::{ApiError, OptionExt, ResultExt, RouteResult};
use crate::state::AppState;

/// Fields accepted by `/api/convert-html`.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertForm {
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub font_filename: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
}

impl ConvertForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "html_content" => self.html_content = Some(value),
            "font_filename" => self.font_filename = Some(value),
            "font_family" => self.font_family = Some(value),
            _ => {}
        }
    }
}

/// Form fields read from a JSON, multipart or urlencoded body.
pub struct ConvertInput(pub ConvertForm);

impl<S> FromRequest<S> for ConvertInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(form) = Json::<ConvertForm>::from_request(req, state)
                .await
                .or_bad_request()?;
            return Ok(Self(form));
        }

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state).await.or_bad_request()?;
            let mut form = ConvertForm::default();
            while let Some(field) = multipart.next_field().await.or_bad_request()? {
                let name = field
                    .name()
                    .map(str::to_string)
                    .or_bad_request("Multipart field without a name")?;
                let value = field.text().await.or_bad_request()?;
                form.set(&name, value);
            }
            return Ok(Self(form));
        }

        let Form(form) = Form::<ConvertForm>::from_request(req, state)
            .await
            .or_bad_request()?;
        Ok(Self(form))
    }
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub pdf_base64: String,
}

/// Convert HTML and return the PDF encoded as base64.
///
/// Supplying both font fields makes the selection strict.
pub async fn convert_html(
    State(state): State<Arc<AppState>>,
    ConvertInput(form): ConvertInput,
) -> RouteResult<Json<ConvertResponse>> {
    let request = RenderRequest::from_parts(form.html_content, form.font_family, form.font_filename);
    let policy = SelectionPolicy::for_fields(request.font_family(), request.font_filename());

    let pdf = state
        .converter
        .convert(&request, policy)
        .await
        .map_err(|e| {
            if !e.is_validation() {
                error!("Conversion failed: {}", e);
            }
            ApiError::from(e)
        })?;

    info!("Converted document to {} bytes of PDF", pdf.bytes.len());
    Ok(Json(ConvertResponse {
        pdf_base64: STANDARD.encode(&pdf.bytes),
    }))
}
