use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::IntoResponse,
};
use stagecraft_model::SceneId;

use crate::{
    error::{ApiError, ErrorResponse},
    routes::run_blocking,
    state::ApiState,
};

#[utoipa::path(
    get,
    path = "/api/scenes/{id}/export",
    operation_id = "export_scene",
    params(("id" = str, Path, description = "Scene ID.")),
    responses(
        (
            status = 200,
            description = "OBS scene JSON, sent as an attachment named after the scene.",
            content_type = "application/json",
            body = serde_json::Value,
        ),
        (status = 404, description = "Scene not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_export(
    State(api): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = SceneId::from(id);
    let store = api.store.clone();
    let exported = run_blocking(move || store.export(&id)).await?;
    let body = exported
        .document
        .to_pretty_json()
        .map_err(|err| ApiError::internal(&err))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&exported.file_name),
            ),
        ],
        body,
    ))
}

/// `attachment; filename="<name>"` with characters that would break the
/// quoted string replaced.
fn content_disposition(file_name: &str) -> HeaderValue {
    let file_name: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    HeaderValue::from_bytes(format!("attachment; filename=\"{file_name}\"").as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"scene.json\""))
}
