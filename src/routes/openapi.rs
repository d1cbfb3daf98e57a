use axum::response::IntoResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stagecraft",
        description = "OBS Studio scene layout builder",
        version = "0.1.0",
    ),
    paths(
        crate::routes::scenes::handle_list,
        crate::routes::scenes::handle_create,
        crate::routes::scenes::handle_import,
        crate::routes::scenes::handle_get,
        crate::routes::scenes::handle_update,
        crate::routes::scenes::handle_delete,
        crate::routes::export::handle_export,
        crate::routes::elements::handle_add,
        crate::routes::elements::handle_update,
        crate::routes::elements::handle_remove,
        crate::routes::elements::handle_duplicate,
        crate::routes::elements::handle_move,
        crate::routes::status::status_handler,
    ),
    tags(
        (name = "scenes", description = "Scene CRUD, OBS import and export."),
        (name = "elements", description = "Editing elements of a stored scene."),
    )
)]
pub struct ApiDoc;

pub async fn handle_openapi() -> impl IntoResponse {
    axum::Json(ApiDoc::openapi())
}
