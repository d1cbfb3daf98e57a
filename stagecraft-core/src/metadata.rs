use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;
use stagecraft_model::SceneId;
use tracing::{debug, info};

use crate::{
    MetadataUpdate, NewScene, SceneMetadata, document_path, error::MetadataStoreError,
};

/// Store of scene metadata records, keyed by scene id.
pub trait MetadataStore: Send + Sync + 'static {
    /// Creates a record with a new id, document path and timestamps.
    fn create(&self, scene: &NewScene) -> Result<SceneMetadata, MetadataStoreError>;

    fn get(&self, id: &SceneId) -> Result<Option<SceneMetadata>, MetadataStoreError>;

    /// All records, newest first.
    fn list(&self) -> Result<Vec<SceneMetadata>, MetadataStoreError>;

    fn update(
        &self,
        id: &SceneId,
        update: &MetadataUpdate,
    ) -> Result<Option<SceneMetadata>, MetadataStoreError>;

    /// Returns `false` if there was no record with this id.
    fn delete(&self, id: &SceneId) -> Result<bool, MetadataStoreError>;
}

/// Metadata records held in memory, in creation order. When created with
/// [`InMemoryMetadataStore::persisted`], every change is written to a JSON
/// index file before it becomes visible.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    records: Mutex<Vec<SceneMetadata>>,
    index_path: Option<PathBuf>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads records from `index_path` if the file exists.
    pub fn persisted(index_path: PathBuf) -> Result<Self, MetadataStoreError> {
        let records: Vec<SceneMetadata> = match fs::read(&index_path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| MetadataStoreError::ParseIndex(index_path.clone(), err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(MetadataStoreError::ReadIndex(index_path, err)),
        };
        info!(
            path = %index_path.display(),
            scene_count = records.len(),
            "Loaded scene index."
        );
        Ok(Self {
            records: Mutex::new(records),
            index_path: Some(index_path),
        })
    }

    fn records(&self) -> MutexGuard<'_, Vec<SceneMetadata>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` to a copy of the records, persists it and only then
    /// replaces the current state.
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<SceneMetadata>) -> T,
    ) -> Result<T, MetadataStoreError> {
        let mut records = self.records();
        let mut updated = records.clone();
        let result = change(&mut updated);
        if let Some(index_path) = &self.index_path {
            write_index(index_path, &updated)?;
        }
        *records = updated;
        Ok(result)
    }
}

fn write_index(path: &Path, records: &[SceneMetadata]) -> Result<(), MetadataStoreError> {
    let json = serde_json::to_vec_pretty(records).map_err(MetadataStoreError::SerializeIndex)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| MetadataStoreError::WriteIndex(path.to_path_buf(), err))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .map_err(|err| MetadataStoreError::WriteIndex(tmp_path.clone(), err))?;
    fs::rename(&tmp_path, path)
        .map_err(|err| MetadataStoreError::WriteIndex(path.to_path_buf(), err))?;
    debug!(path = %path.display(), "Scene index written.");
    Ok(())
}

impl MetadataStore for InMemoryMetadataStore {
    fn create(&self, scene: &NewScene) -> Result<SceneMetadata, MetadataStoreError> {
        let id = SceneId::generate();
        let now = Utc::now();
        let record = SceneMetadata {
            json_path: document_path(&id),
            id,
            name: scene.name.clone(),
            description: scene.description.clone(),
            width: scene.resolution.width,
            height: scene.resolution.height,
            created_at: now,
            updated_at: now,
        };
        self.modify(|records| records.push(record.clone()))?;
        Ok(record)
    }

    fn get(&self, id: &SceneId) -> Result<Option<SceneMetadata>, MetadataStoreError> {
        Ok(self.records().iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<SceneMetadata>, MetadataStoreError> {
        // Reversed before the stable sort, so records created within the same
        // clock tick still come out newest first.
        let mut records: Vec<SceneMetadata> = self.records().iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn update(
        &self,
        id: &SceneId,
        update: &MetadataUpdate,
    ) -> Result<Option<SceneMetadata>, MetadataStoreError> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }
        self.modify(|records| {
            let record = records.iter_mut().find(|record| &record.id == id)?;
            if let Some(name) = &update.name {
                record.name = name.clone();
            }
            if let Some(description) = &update.description {
                record.description = Some(description.clone());
            }
            if let Some(width) = update.width {
                record.width = width;
            }
            if let Some(height) = update.height {
                record.height = height;
            }
            record.updated_at = update.updated_at.unwrap_or_else(Utc::now);
            Some(record.clone())
        })
    }

    fn delete(&self, id: &SceneId) -> Result<bool, MetadataStoreError> {
        if self.get(id)?.is_none() {
            return Ok(false);
        }
        self.modify(|records| {
            let count = records.len();
            records.retain(|record| &record.id != id);
            records.len() != count
        })
    }
}
