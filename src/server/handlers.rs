use super::types::{AnalyzeResponse, ErrorResponse, HealthResponse};
use crate::{
    Error, Result,
    analysis::{Analyst, Notice, UploadedImage},
    error::FailureKind,
    render::Page,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Multipart field names accepted for the image.
const UPLOAD_FIELDS: [&str; 2] = ["image", "file"];

pub const MISSING_UPLOAD_MESSAGE: &str = "Please upload an image before generating the analysis.";

#[derive(Clone)]
pub struct AppState {
    pub analyst: Arc<Analyst>,
}

pub async fn index() -> Html<String> {
    Html(Page::new().render())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Form submit. Always answers with a page; failures show up as banners.
pub async fn analyze_page(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            info!("Form submitted without an image");
            let mut page = Page::new();
            page.notify(Notice::error(MISSING_UPLOAD_MESSAGE));
            return Html(page.render());
        }
        Err(e) => {
            warn!("Could not read upload: {}", e);
            let mut page = Page::new();
            page.notify(Notice::error(e.to_string()));
            return Html(page.render());
        }
    };

    let outcome = state.analyst.analyze(upload).await;
    Html(Page::from_outcome(&outcome).render())
}

pub async fn analyze_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<(StatusCode, Json<AnalyzeResponse>), (StatusCode, Json<ErrorResponse>)> {
    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: MISSING_UPLOAD_MESSAGE.to_string(),
                }),
            ));
        }
        Err(e) => {
            warn!("Could not read upload: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
    };

    let outcome = state.analyst.analyze(upload).await;
    let status = match outcome.failure {
        None => StatusCode::OK,
        Some(FailureKind::InvalidUpload) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Transport) | Some(FailureKind::EmptyResponse) => StatusCode::BAD_GATEWAY,
        Some(FailureKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((status, Json(AnalyzeResponse::from(&outcome))))
}

/// Pulls the first image field out of the form. A file input left empty
/// arrives as a part with no name and no bytes and counts as missing.
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedImage>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_upload(e.body_text()))?
    {
        let is_upload = field
            .name()
            .is_some_and(|name| UPLOAD_FIELDS.contains(&name));
        if !is_upload {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_upload(e.body_text()))?;

        if file_name.is_none() && bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(UploadedImage {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}
