use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::*;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddElementRequest {
    /// One of `browser_source`, `text`, `image`, `game_capture`,
    /// `window_capture`, `display_capture`, `audio_capture`,
    /// `video_capture`, `color_source`, `media_source`.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Id of the new element. Generated when not provided.
    pub id: Option<ElementId>,
}

/// Partial element update. Element type and layer order can not be changed
/// this way.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ElementPatchRequest {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    /// Also moves and resizes `transform`.
    pub bounds: Option<Bounds>,
    /// Replaces the transform, `bounds` follow its position and size. When
    /// both are provided `bounds` win.
    pub transform: Option<Transform>,
    /// Type specific settings, passed to OBS as is.
    #[schema(value_type = Option<Object>)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    pub filters: Option<Vec<Filter>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Mirrors the transform block of an OBS source.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
    pub scale: Vec2,
    /// (**default=`5`**) OBS alignment flags, `5` is top left.
    pub alignment: Option<i32>,
    pub bounds_type: Option<i32>,
    pub bounds_alignment: Option<i32>,
    pub bounds: Vec2,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    pub id: String,
    pub name: String,
    /// OBS filter id, e.g. `chroma_key_filter`.
    #[serde(rename = "type")]
    pub filter_type: String,
    /// (**default=`true`**)
    pub enabled: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MoveElementRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, JsonSchema, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Towards the top of the stack.
    Up,
    Down,
}
