use std::sync::Arc;

use axum::{
    Router, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
    routing::{get, patch, post},
};
use serde::de::DeserializeOwned;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{error::ApiError, state::ApiState};

pub mod elements;
pub mod export;
pub mod openapi;
pub mod scenes;
pub mod status;

pub fn routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/api/scenes",
            get(scenes::handle_list).post(scenes::handle_create),
        )
        .route("/api/scenes/import", post(scenes::handle_import))
        .route(
            "/api/scenes/:id",
            get(scenes::handle_get)
                .put(scenes::handle_update)
                .delete(scenes::handle_delete),
        )
        .route("/api/scenes/:id/export", get(export::handle_export))
        .route("/api/scenes/:id/elements", post(elements::handle_add))
        .route(
            "/api/scenes/:id/elements/:element_id",
            patch(elements::handle_update).delete(elements::handle_remove),
        )
        .route(
            "/api/scenes/:id/elements/:element_id/duplicate",
            post(elements::handle_duplicate),
        )
        .route(
            "/api/scenes/:id/elements/:element_id/move",
            post(elements::handle_move),
        )
        .route("/api/openapi.json", get(openapi::handle_openapi))
        .route("/status", get(status::status_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wrapper over [`axum::Json`] that reports invalid bodies as [`ApiError`].
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(err) => Err(malformed_json(err)),
        }
    }
}

fn malformed_json(err: JsonRejection) -> ApiError {
    ApiError::malformed_request(&err.body_text())
}

/// Runs a blocking store call on the tokio blocking pool.
pub(crate) async fn run_blocking<T, E>(
    f: impl FnOnce() -> Result<T, E> + Send + 'static,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    E: Send + 'static,
    ApiError: From<E>,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
