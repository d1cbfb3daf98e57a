use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;
use stagecraft_api::SceneMetadata;
use stagecraft_core::{SceneStore, SceneStoreOptions, error::InitSceneStoreError};
use stagecraft_model::{Scene, SceneElement};
use utoipa::ToSchema;

use crate::config::Config;

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum Response {
    Success {
        success: bool,
    },
    Scenes {
        scenes: Vec<SceneMetadata>,
    },
    SceneMetadata {
        scene: SceneMetadata,
    },
    Scene {
        #[schema(value_type = Object)]
        scene: Scene,
    },
    ImportedScene {
        #[schema(value_type = Object)]
        scene: Scene,
        /// OBS source types imported as `browser_source`.
        unrecognized_source_types: Vec<String>,
    },
    Element {
        #[schema(value_type = Object)]
        element: SceneElement,
    },
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

/// Response sent with `201 Created`.
pub struct Created(pub Response);

impl IntoResponse for Created {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

pub struct ApiState {
    pub store: SceneStore,
    pub config: Config,
}

impl ApiState {
    pub fn new(config: Config) -> Result<ApiState, InitSceneStoreError> {
        let store = SceneStore::from_options(&SceneStoreOptions {
            storage_path: config.scene_storage_path.to_path_buf(),
            persist_metadata: config.persist_metadata,
        })?;
        Ok(ApiState { store, config })
    }
}
