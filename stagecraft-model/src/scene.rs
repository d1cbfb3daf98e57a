use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ElementType;

pub const DEFAULT_SCENE_WIDTH: u32 = 1920;
pub const DEFAULT_SCENE_HEIGHT: u32 = 1080;

/// Open key/value payload of an element or a filter. Its schema depends on
/// the element type and is not validated.
pub type Properties = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub Arc<str>);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub Arc<str>);

impl SceneId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }
}

impl ElementId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }
}

impl Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SceneId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for SceneId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
        }
    }
}

/// Scene document as persisted by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Sequence position carries no meaning, layering is defined by
    /// [`SceneElement::order`].
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
}

impl Scene {
    /// Empty scene, as created before any element is added.
    pub fn new(id: SceneId, name: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            width: resolution.width,
            height: resolution.height,
            elements: Vec::new(),
            created_at: None,
            updated_at: None,
            json_path: None,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<&SceneElement> {
        self.elements.iter().find(|element| &element.id == id)
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut SceneElement> {
        self.elements.iter_mut().find(|element| &element.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneElement {
    pub id: ElementId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementType,
    pub visible: bool,
    pub locked: bool,
    /// Same rectangle as `transform.position` + `transform.bounds`. Mutate
    /// through [`SceneElement::set_position`] and [`SceneElement::set_size`]
    /// to keep both in sync.
    pub bounds: Bounds,
    pub transform: Transform,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Layer order, lower values are rendered first.
    pub order: i64,
}

impl SceneElement {
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.transform.position = Vec2 { x, y };
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.bounds.width = width;
        self.bounds.height = height;
        self.transform.bounds = Vec2 {
            x: width,
            y: height,
        };
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.set_position(bounds.x, bounds.y);
        self.set_size(bounds.width, bounds.height);
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.bounds = Bounds::from_transform(&transform);
        self.transform = transform;
    }

    pub fn geometry_in_sync(&self) -> bool {
        self.bounds == Bounds::from_transform(&self.transform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Rectangle described by the transform block: position as origin and
    /// transform bounds as size. Alignment and bounds type are not taken
    /// into account.
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            x: transform.position.x,
            y: transform.position.y,
            width: transform.bounds.x,
            height: transform.bounds.y,
        }
    }
}

/// OBS alignment code for top-left anchoring (`OBS_ALIGN_LEFT | OBS_ALIGN_TOP`).
pub const ALIGN_TOP_LEFT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
    pub scale: Vec2,
    pub alignment: i32,
    pub bounds_type: i32,
    pub bounds_alignment: i32,
    pub bounds: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            rotation: 0.0,
            scale: Vec2 { x: 1.0, y: 1.0 },
            alignment: ALIGN_TOP_LEFT,
            bounds_type: 0,
            bounds_alignment: 0,
            bounds: Vec2::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Local identifier, OBS documents have no filter ids.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    #[serde(default)]
    pub settings: Properties,
}
