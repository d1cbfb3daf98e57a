use std::{io, path::PathBuf};

use stagecraft_model::{ElementId, ElementType, SceneId, error::EditError};

#[derive(Debug, thiserror::Error)]
pub enum InitSceneStoreError {
    #[error("Failed to create scene storage directory \"{}\".", .0.display())]
    CreateStorageDir(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Metadata(#[from] MetadataStoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataStoreError {
    #[error("Failed to read scene index \"{}\".", .0.display())]
    ReadIndex(PathBuf, #[source] io::Error),

    #[error("Scene index \"{}\" is not a valid JSON list of scenes.", .0.display())]
    ParseIndex(PathBuf, #[source] serde_json::Error),

    #[error("Failed to write scene index \"{}\".", .0.display())]
    WriteIndex(PathBuf, #[source] io::Error),

    #[error("Failed to serialize scene index.")]
    SerializeIndex(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("Document path \"{0}\" does not name a file.")]
    InvalidPath(String),

    #[error("Failed to read scene document \"{}\".", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error("Scene document \"{}\" is not a valid scene.", .0.display())]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize scene \"{0}\".")]
    Serialize(SceneId, #[source] serde_json::Error),

    #[error("Failed to write scene document \"{}\".", .0.display())]
    Write(PathBuf, #[source] io::Error),

    #[error("Failed to delete scene document \"{}\".", .0.display())]
    Delete(PathBuf, #[source] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SceneStoreError {
    #[error("Scene \"{0}\" does not exist.")]
    SceneNotFound(SceneId),

    #[error("Document of scene \"{0}\" does not exist.")]
    DocumentNotFound(SceneId),

    #[error("Scene name cannot be empty.")]
    EmptyName,

    #[error("Scene resolution {width}x{height} is invalid, both dimensions have to be positive.")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Element \"{id}\" cannot change its type from \"{from}\" to \"{to}\".")]
    ElementTypeChanged {
        id: ElementId,
        from: ElementType,
        to: ElementType,
    },

    #[error("Element \"{id}\" has unknown type \"{kind}\".")]
    UnknownElementType { id: ElementId, kind: ElementType },

    #[error("Element \"{0}\" cannot have a negative width or height.")]
    NegativeElementSize(ElementId),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Metadata store failed.")]
    Metadata(#[from] MetadataStoreError),

    #[error("Document store failed.")]
    Document(#[from] DocumentStoreError),
}

/// How an error should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    UserError,
    ServerError,
    EntityNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorInfo {
    pub error_code: &'static str,
    pub error_type: ErrorType,
}

impl ErrorInfo {
    fn new(error_code: &'static str, error_type: ErrorType) -> Self {
        Self {
            error_code,
            error_type,
        }
    }
}

impl From<&InitSceneStoreError> for ErrorInfo {
    fn from(_value: &InitSceneStoreError) -> Self {
        ErrorInfo::new("SCENE_STORE_INIT_FAILED", ErrorType::ServerError)
    }
}

impl From<&SceneStoreError> for ErrorInfo {
    fn from(err: &SceneStoreError) -> Self {
        match err {
            SceneStoreError::SceneNotFound(_) => {
                ErrorInfo::new("SCENE_NOT_FOUND", ErrorType::EntityNotFound)
            }
            SceneStoreError::DocumentNotFound(_) => {
                ErrorInfo::new("SCENE_DOCUMENT_NOT_FOUND", ErrorType::EntityNotFound)
            }
            SceneStoreError::EmptyName => {
                ErrorInfo::new("INVALID_SCENE_NAME", ErrorType::UserError)
            }
            SceneStoreError::InvalidResolution { .. } => {
                ErrorInfo::new("INVALID_RESOLUTION", ErrorType::UserError)
            }
            SceneStoreError::ElementTypeChanged { .. } => {
                ErrorInfo::new("ELEMENT_TYPE_CHANGED", ErrorType::UserError)
            }
            SceneStoreError::UnknownElementType { .. } => {
                ErrorInfo::new("UNKNOWN_ELEMENT_TYPE", ErrorType::UserError)
            }
            SceneStoreError::NegativeElementSize(_) => {
                ErrorInfo::new("INVALID_ELEMENT_BOUNDS", ErrorType::UserError)
            }
            SceneStoreError::Edit(EditError::ElementNotFound(_)) => {
                ErrorInfo::new("ELEMENT_NOT_FOUND", ErrorType::EntityNotFound)
            }
            SceneStoreError::Edit(EditError::DuplicateElementId(_)) => {
                ErrorInfo::new("DUPLICATE_ELEMENT_ID", ErrorType::UserError)
            }
            SceneStoreError::Metadata(_) => {
                ErrorInfo::new("METADATA_STORE_ERROR", ErrorType::ServerError)
            }
            SceneStoreError::Document(_) => {
                ErrorInfo::new("DOCUMENT_STORE_ERROR", ErrorType::ServerError)
            }
        }
    }
}
