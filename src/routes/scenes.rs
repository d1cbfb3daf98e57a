use std::sync::Arc;

use axum::extract::{Path, State};
use stagecraft_api::{CreateSceneRequest, ImportSceneRequest, SceneMetadata, UpdateSceneRequest};
use stagecraft_core::{NewScene, SceneImport, SceneUpdate};
use stagecraft_model::SceneId;

use crate::{
    error::{ApiError, ErrorResponse},
    routes::{Json, run_blocking},
    state::{ApiState, Created, Response},
};

#[utoipa::path(
    get,
    path = "/api/scenes",
    operation_id = "list_scenes",
    responses(
        (status = 200, description = "Scene metadata, newest first.", body = Response),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_list(State(api): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    let store = api.store.clone();
    let scenes = run_blocking(move || store.list()).await?;
    Ok(Response::Scenes {
        scenes: scenes.into_iter().map(SceneMetadata::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/api/scenes",
    operation_id = "create_scene",
    request_body = CreateSceneRequest,
    responses(
        (status = 201, description = "Scene created.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_create(
    State(api): State<Arc<ApiState>>,
    Json(request): Json<CreateSceneRequest>,
) -> Result<Created, ApiError> {
    let scene = NewScene::try_from(request)?;
    let store = api.store.clone();
    let record = run_blocking(move || store.create(scene)).await?;
    Ok(Created(Response::SceneMetadata {
        scene: record.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/scenes/import",
    operation_id = "import_scene",
    request_body = ImportSceneRequest,
    responses(
        (status = 201, description = "Scene imported from an OBS document.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_import(
    State(api): State<Arc<ApiState>>,
    Json(request): Json<ImportSceneRequest>,
) -> Result<Created, ApiError> {
    let import = SceneImport::try_from(request)?;
    let store = api.store.clone();
    let imported = run_blocking(move || store.import(import)).await?;
    Ok(Created(Response::ImportedScene {
        scene: imported.scene,
        unrecognized_source_types: imported.unrecognized_source_types,
    }))
}

#[utoipa::path(
    get,
    path = "/api/scenes/{id}",
    operation_id = "get_scene",
    params(("id" = str, Path, description = "Scene ID.")),
    responses(
        (status = 200, description = "Scene with all its elements.", body = Response),
        (status = 404, description = "Scene not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_get(
    State(api): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = SceneId::from(id);
    let store = api.store.clone();
    let scene = run_blocking(move || store.get(&id)).await?;
    Ok(Response::Scene { scene })
}

#[utoipa::path(
    put,
    path = "/api/scenes/{id}",
    operation_id = "update_scene",
    params(("id" = str, Path, description = "Scene ID.")),
    request_body = UpdateSceneRequest,
    responses(
        (status = 200, description = "Scene updated.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 404, description = "Scene not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_update(
    State(api): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSceneRequest>,
) -> Result<Response, ApiError> {
    let id = SceneId::from(id);
    let update = SceneUpdate::try_from(request)?;
    let store = api.store.clone();
    let scene = run_blocking(move || store.update(&id, update)).await?;
    Ok(Response::Scene { scene })
}

#[utoipa::path(
    delete,
    path = "/api/scenes/{id}",
    operation_id = "delete_scene",
    params(("id" = str, Path, description = "Scene ID.")),
    responses(
        (status = 200, description = "Scene deleted.", body = Response),
        (status = 404, description = "Scene not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["scenes"],
)]
pub async fn handle_delete(
    State(api): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = SceneId::from(id);
    let store = api.store.clone();
    run_blocking(move || store.delete(&id)).await?;
    Ok(Response::Success { success: true })
}
