use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagecraft_model::{ElementId, ElementType, Resolution, Scene, SceneElement, SceneId};
use stagecraft_obs::ObsDocument;

/// Record kept by the metadata store for every scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    pub id: SceneId,
    pub name: String,
    pub description: Option<String>,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Location of the scene document, `/scenes/<id>.json`.
    pub json_path: String,
}

impl SceneMetadata {
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScene {
    pub name: String,
    pub description: Option<String>,
    pub resolution: Resolution,
}

/// Fields of a metadata record to overwrite. `updated_at` is bumped even
/// when nothing is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Current time when not set.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Replaces all elements of the scene.
    pub elements: Option<Vec<SceneElement>>,
}

impl SceneUpdate {
    pub(crate) fn metadata_update(&self) -> MetadataUpdate {
        MetadataUpdate {
            name: self.name.clone(),
            description: self.description.clone(),
            width: self.width,
            height: self.height,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub kind: ElementType,
    /// Generated when not set.
    pub id: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneImport {
    pub document: ObsDocument,
    pub description: Option<String>,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedScene {
    pub scene: Scene,
    /// OBS source types that were imported as `browser_source`.
    pub unrecognized_source_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedScene {
    pub file_name: String,
    pub document: ObsDocument,
}
