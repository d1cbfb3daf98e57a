use std::sync::Arc;

use axum::extract::{Path, State};
use stagecraft_api::{AddElementRequest, ElementPatchRequest, MoveElementRequest};
use stagecraft_core::NewElement;
use stagecraft_model::{ElementId, ElementPatch, LayerMove, SceneId};

use crate::{
    error::{ApiError, ErrorResponse},
    routes::{Json, run_blocking},
    state::{ApiState, Created, Response},
};

#[utoipa::path(
    post,
    path = "/api/scenes/{id}/elements",
    operation_id = "add_element",
    params(("id" = str, Path, description = "Scene ID.")),
    request_body = AddElementRequest,
    responses(
        (status = 201, description = "Element added on top of the scene.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 404, description = "Scene not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["elements"],
)]
pub async fn handle_add(
    State(api): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<AddElementRequest>,
) -> Result<Created, ApiError> {
    let id = SceneId::from(id);
    let element = NewElement::try_from(request)?;
    let store = api.store.clone();
    let element = run_blocking(move || store.add_element(&id, element)).await?;
    Ok(Created(Response::Element { element }))
}

#[utoipa::path(
    patch,
    path = "/api/scenes/{id}/elements/{element_id}",
    operation_id = "update_element",
    params(
        ("id" = str, Path, description = "Scene ID."),
        ("element_id" = str, Path, description = "Element ID."),
    ),
    request_body = ElementPatchRequest,
    responses(
        (status = 200, description = "Element updated.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 404, description = "Scene or element not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["elements"],
)]
pub async fn handle_update(
    State(api): State<Arc<ApiState>>,
    Path((id, element_id)): Path<(String, String)>,
    Json(request): Json<ElementPatchRequest>,
) -> Result<Response, ApiError> {
    let (id, element_id) = (SceneId::from(id), ElementId::from(element_id));
    let patch = ElementPatch::try_from(request)?;
    let store = api.store.clone();
    let element = run_blocking(move || store.update_element(&id, &element_id, patch)).await?;
    Ok(Response::Element { element })
}

#[utoipa::path(
    delete,
    path = "/api/scenes/{id}/elements/{element_id}",
    operation_id = "remove_element",
    params(
        ("id" = str, Path, description = "Scene ID."),
        ("element_id" = str, Path, description = "Element ID."),
    ),
    responses(
        (status = 200, description = "Element removed.", body = Response),
        (status = 404, description = "Scene or element not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["elements"],
)]
pub async fn handle_remove(
    State(api): State<Arc<ApiState>>,
    Path((id, element_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let (id, element_id) = (SceneId::from(id), ElementId::from(element_id));
    let store = api.store.clone();
    run_blocking(move || store.remove_element(&id, &element_id)).await?;
    Ok(Response::Success { success: true })
}

#[utoipa::path(
    post,
    path = "/api/scenes/{id}/elements/{element_id}/duplicate",
    operation_id = "duplicate_element",
    params(
        ("id" = str, Path, description = "Scene ID."),
        ("element_id" = str, Path, description = "Element ID."),
    ),
    responses(
        (status = 201, description = "Copy placed on top of the scene.", body = Response),
        (status = 404, description = "Scene or element not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["elements"],
)]
pub async fn handle_duplicate(
    State(api): State<Arc<ApiState>>,
    Path((id, element_id)): Path<(String, String)>,
) -> Result<Created, ApiError> {
    let (id, element_id) = (SceneId::from(id), ElementId::from(element_id));
    let store = api.store.clone();
    let element = run_blocking(move || store.duplicate_element(&id, &element_id)).await?;
    Ok(Created(Response::Element { element }))
}

#[utoipa::path(
    post,
    path = "/api/scenes/{id}/elements/{element_id}/move",
    operation_id = "move_element",
    params(
        ("id" = str, Path, description = "Scene ID."),
        ("element_id" = str, Path, description = "Element ID."),
    ),
    request_body = MoveElementRequest,
    responses(
        (status = 200, description = "Scene after the element changed its layer.", body = Response),
        (status = 400, description = "Bad request.", body = ErrorResponse),
        (status = 404, description = "Scene or element not found.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse),
    ),
    tags = ["elements"],
)]
pub async fn handle_move(
    State(api): State<Arc<ApiState>>,
    Path((id, element_id)): Path<(String, String)>,
    Json(request): Json<MoveElementRequest>,
) -> Result<Response, ApiError> {
    let (id, element_id) = (SceneId::from(id), ElementId::from(element_id));
    let direction = LayerMove::from(request.direction);
    let store = api.store.clone();
    let scene = run_blocking(move || store.move_element(&id, &element_id, direction)).await?;
    Ok(Response::Scene { scene })
}
