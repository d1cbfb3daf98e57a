use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[schema(value_type = String)]
pub struct SceneId(Arc<str>);

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema, ToSchema)]
#[schema(value_type = String)]
pub struct ElementId(Arc<str>);

impl From<SceneId> for stagecraft_model::SceneId {
    fn from(id: SceneId) -> Self {
        Self(id.0)
    }
}

impl From<stagecraft_model::SceneId> for SceneId {
    fn from(id: stagecraft_model::SceneId) -> Self {
        Self(id.0)
    }
}

impl From<ElementId> for stagecraft_model::ElementId {
    fn from(id: ElementId) -> Self {
        Self(id.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, JsonSchema, ToSchema)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl From<Vec2> for stagecraft_model::Vec2 {
    fn from(value: Vec2) -> Self {
        Self::new(value.x, value.y)
    }
}
