use std::{
    fs, io,
    path::{Path, PathBuf},
};

use stagecraft_model::{Scene, SceneId};
use tracing::debug;

use crate::error::DocumentStoreError;

/// Path under which the document of a scene is stored.
pub fn document_path(id: &SceneId) -> String {
    format!("/scenes/{id}.json")
}

/// Store of full scene documents addressed by path.
pub trait DocumentStore: Send + Sync + 'static {
    /// `None` when there is no document under `path`.
    fn load(&self, path: &str) -> Result<Option<Scene>, DocumentStoreError>;

    /// Returns the path the scene was saved under.
    fn save(&self, scene: &Scene) -> Result<String, DocumentStoreError>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, path: &str) -> Result<bool, DocumentStoreError>;
}

/// Scene documents stored as pretty printed JSON files in a single
/// directory. Only the file name of a document path is used, so a path can
/// not point outside of the storage directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, DocumentStoreError> {
        match Path::new(path).file_name() {
            Some(file_name) => Ok(self.root.join(file_name)),
            None => Err(DocumentStoreError::InvalidPath(path.to_string())),
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, path: &str) -> Result<Option<Scene>, DocumentStoreError> {
        let file_path = self.resolve(path)?;
        let bytes = match fs::read(&file_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(DocumentStoreError::Read(file_path, err)),
        };
        let scene = serde_json::from_slice(&bytes)
            .map_err(|err| DocumentStoreError::Parse(file_path, err))?;
        Ok(Some(scene))
    }

    fn save(&self, scene: &Scene) -> Result<String, DocumentStoreError> {
        let path = document_path(&scene.id);
        let file_path = self.resolve(&path)?;
        let json = serde_json::to_vec_pretty(scene)
            .map_err(|err| DocumentStoreError::Serialize(scene.id.clone(), err))?;

        fs::create_dir_all(&self.root)
            .map_err(|err| DocumentStoreError::Write(file_path.clone(), err))?;
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|err| DocumentStoreError::Write(tmp_path.clone(), err))?;
        fs::rename(&tmp_path, &file_path)
            .map_err(|err| DocumentStoreError::Write(file_path.clone(), err))?;

        debug!(scene_id = %scene.id, path = %file_path.display(), "Scene document saved.");
        Ok(path)
    }

    fn delete(&self, path: &str) -> Result<bool, DocumentStoreError> {
        let file_path = self.resolve(path)?;
        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(DocumentStoreError::Delete(file_path, err)),
        }
    }
}
