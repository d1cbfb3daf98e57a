use stagecraft_core::{NewScene, SceneImport, SceneUpdate};
use stagecraft_model::{DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, Resolution};

use crate::*;

impl TryFrom<CreateSceneRequest> for NewScene {
    type Error = TypeError;

    fn try_from(request: CreateSceneRequest) -> Result<Self, Self::Error> {
        let name = match request.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(TypeError::new("Scene name is required.")),
        };
        Ok(Self {
            name,
            description: request.description,
            resolution: resolution(request.width, request.height)?,
        })
    }
}

impl TryFrom<UpdateSceneRequest> for SceneUpdate {
    type Error = TypeError;

    fn try_from(request: UpdateSceneRequest) -> Result<Self, Self::Error> {
        if let Some(name) = &request.name
            && name.trim().is_empty()
        {
            return Err(TypeError::new("Scene name cannot be empty."));
        }
        if request.width == Some(0) || request.height == Some(0) {
            return Err(TypeError::new("Scene width and height have to be positive."));
        }
        Ok(Self {
            name: request.name,
            description: request.description,
            width: request.width,
            height: request.height,
            elements: request.elements,
        })
    }
}

impl TryFrom<ImportSceneRequest> for SceneImport {
    type Error = TypeError;

    fn try_from(request: ImportSceneRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            resolution: resolution(request.width, request.height)?,
            document: request.document,
            description: request.description,
        })
    }
}

impl From<stagecraft_core::SceneMetadata> for SceneMetadata {
    fn from(record: stagecraft_core::SceneMetadata) -> Self {
        Self {
            id: record.id.into(),
            name: record.name,
            description: record.description,
            width: record.width,
            height: record.height,
            created_at: record.created_at,
            updated_at: record.updated_at,
            json_path: record.json_path,
        }
    }
}

fn resolution(width: Option<u32>, height: Option<u32>) -> Result<Resolution, TypeError> {
    let resolution = Resolution {
        width: width.unwrap_or(DEFAULT_SCENE_WIDTH),
        height: height.unwrap_or(DEFAULT_SCENE_HEIGHT),
    };
    if resolution.width == 0 || resolution.height == 0 {
        return Err(TypeError::new("Scene width and height have to be positive."));
    }
    Ok(resolution)
}
