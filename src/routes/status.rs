use std::{path::Path, sync::Arc};

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::{
    error::{ApiError, ErrorResponse},
    routes::run_blocking,
    state::ApiState,
};

#[derive(Serialize)]
struct InstanceConfiguration {
    api_port: u16,
    scene_storage_path: Arc<Path>,
    persist_metadata: bool,
}

#[utoipa::path(
    get,
    path = "/status",
    operation_id = "status",
    responses(
        (
            status = 200,
            description = "Instance id, configuration and number of stored scenes.",
            body = serde_json::Value,
        ),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["status"],
)]
pub async fn status_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let scene_count = run_blocking(move || store.list().map(|scenes| scenes.len())).await?;

    let configuration = InstanceConfiguration {
        api_port: state.config.api_port,
        scene_storage_path: state.config.scene_storage_path.clone(),
        persist_metadata: state.config.persist_metadata,
    };

    Ok(axum::Json(json!({
        "instance_id": state.config.instance_id,
        "configuration": configuration,
        "scene_count": scene_count,
    })))
}
