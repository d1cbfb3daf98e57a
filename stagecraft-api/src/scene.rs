use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::*;

/// Parameters of a new, empty scene.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateSceneRequest {
    /// Scene name. Required.
    pub name: Option<String>,
    pub description: Option<String>,
    /// (**default=`1920`**) Canvas width in pixels.
    pub width: Option<u32>,
    /// (**default=`1080`**) Canvas height in pixels.
    pub height: Option<u32>,
}

/// Partial scene update. Only the provided fields change.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSceneRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Replaces all elements of the scene. Element ids have to be unique and
    /// elements that already exist can not change their type.
    #[schema(value_type = Option<Vec<Object>>)]
    #[schemars(with = "Option<Vec<serde_json::Value>>")]
    pub elements: Option<Vec<stagecraft_model::SceneElement>>,
}

/// Creates a scene from an OBS scene document.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ImportSceneRequest {
    /// OBS scene JSON, `{ name, sources }`.
    #[schema(value_type = Object)]
    #[schemars(with = "serde_json::Value")]
    pub document: stagecraft_obs::ObsDocument,
    pub description: Option<String>,
    /// (**default=`1920`**)
    pub width: Option<u32>,
    /// (**default=`1080`**)
    pub height: Option<u32>,
}

/// Metadata record of a stored scene.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    pub id: SceneId,
    pub name: String,
    pub description: Option<String>,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Path of the scene document in the document store.
    pub json_path: String,
}
