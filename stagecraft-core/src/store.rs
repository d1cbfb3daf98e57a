use std::{
    collections::HashSet,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::Utc;
use stagecraft_model::{
    ElementId, ElementPatch, LayerMove, Resolution, Scene, SceneElement, SceneId, SceneIssue,
    error::{EditError, ErrorStack},
};
use stagecraft_obs::{scene_from_obs, scene_to_obs, unrecognized_source_types};
use tracing::{error, info, warn};

use crate::{
    DocumentStore, ExportedScene, FsDocumentStore, ImportedScene, InMemoryMetadataStore,
    MetadataStore, MetadataUpdate, NewElement, NewScene, SceneImport, SceneMetadata, SceneUpdate,
    error::{InitSceneStoreError, SceneStoreError},
};

const IMPORTED_SCENE_NAME: &str = "Imported Scene";
const METADATA_INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone)]
pub struct SceneStoreOptions {
    pub storage_path: PathBuf,
    /// Keep metadata in `<storage_path>/index.json` across restarts.
    pub persist_metadata: bool,
}

/// Scene CRUD on top of a metadata store and a document store.
///
/// The two stores are not transactional. Operations order their writes so
/// that a failure leaves at most an orphaned document behind, never a
/// metadata record without a document. Changes to an existing scene write
/// the document first and put the previous document back when the metadata
/// record can not be updated.
#[derive(Clone)]
pub struct SceneStore {
    metadata: Arc<dyn MetadataStore>,
    documents: Arc<dyn DocumentStore>,
    /// Serializes read-modify-write cycles of scene documents.
    write_lock: Arc<Mutex<()>>,
}

impl SceneStore {
    pub fn new(metadata: Arc<dyn MetadataStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            metadata,
            documents,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_options(opts: &SceneStoreOptions) -> Result<Self, InitSceneStoreError> {
        std::fs::create_dir_all(&opts.storage_path).map_err(|err| {
            InitSceneStoreError::CreateStorageDir(opts.storage_path.clone(), err)
        })?;
        let metadata = match opts.persist_metadata {
            true => {
                InMemoryMetadataStore::persisted(opts.storage_path.join(METADATA_INDEX_FILE))?
            }
            false => InMemoryMetadataStore::new(),
        };
        let documents = FsDocumentStore::new(&opts.storage_path);
        Ok(Self::new(Arc::new(metadata), Arc::new(documents)))
    }

    pub fn list(&self) -> Result<Vec<SceneMetadata>, SceneStoreError> {
        Ok(self.metadata.list()?)
    }

    /// Creates the metadata record and an empty scene document.
    pub fn create(&self, scene: NewScene) -> Result<SceneMetadata, SceneStoreError> {
        validate_name(&scene.name)?;
        validate_resolution(scene.resolution)?;

        let record = self.metadata.create(&scene)?;
        let mut document = Scene::new(record.id.clone(), record.name.clone(), record.resolution());
        document.description = record.description.clone();
        self.save_new(&record, document)?;

        info!(scene_id = %record.id, name = %record.name, "Scene created.");
        Ok(record)
    }

    /// Stored scene with the metadata record applied on top of the document.
    pub fn get(&self, id: &SceneId) -> Result<Scene, SceneStoreError> {
        let (record, scene) = self.load(id)?;
        Ok(merge_metadata(scene, &record))
    }

    pub fn update(&self, id: &SceneId, update: SceneUpdate) -> Result<Scene, SceneStoreError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (record, mut scene) = self.load(id)?;
        validate_resolution(Resolution {
            width: update.width.unwrap_or(record.width),
            height: update.height.unwrap_or(record.height),
        })?;
        if let Some(elements) = &update.elements {
            validate_elements(&scene, elements)?;
        }

        let previous = scene.clone();
        let updated_at = Utc::now();
        let metadata_update = MetadataUpdate {
            updated_at: Some(updated_at),
            ..update.metadata_update()
        };

        let SceneUpdate {
            name,
            description,
            width,
            height,
            elements,
        } = update;
        if let Some(name) = name {
            scene.name = name;
        }
        if description.is_some() {
            scene.description = description;
        }
        if let Some(width) = width {
            scene.width = width;
        }
        if let Some(height) = height {
            scene.height = height;
        }
        if let Some(elements) = elements {
            scene.elements = elements;
        }
        scene.updated_at = Some(updated_at);
        self.documents.save(&scene)?;

        let record = self.update_metadata(id, &metadata_update, &previous)?;
        info!(scene_id = %id, "Scene updated.");
        Ok(merge_metadata(scene, &record))
    }

    /// Removes the metadata record and the document. A document that can not
    /// be removed is logged, the scene is gone either way.
    pub fn delete(&self, id: &SceneId) -> Result<(), SceneStoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let record = self
            .metadata
            .get(id)?
            .ok_or_else(|| SceneStoreError::SceneNotFound(id.clone()))?;
        if !self.metadata.delete(id)? {
            return Err(SceneStoreError::SceneNotFound(id.clone()));
        }

        match self.documents.delete(&record.json_path) {
            Ok(true) => (),
            Ok(false) => warn!(
                scene_id = %id,
                path = %record.json_path,
                "Scene document was already missing."
            ),
            Err(err) => error!(
                scene_id = %id,
                "Failed to delete scene document: {}",
                ErrorStack::new(&err).into_string()
            ),
        }
        info!(scene_id = %id, "Scene deleted.");
        Ok(())
    }

    /// OBS document of a stored scene and the file name it should be
    /// downloaded as.
    pub fn export(&self, id: &SceneId) -> Result<ExportedScene, SceneStoreError> {
        let scene = self.get(id)?;
        Ok(ExportedScene {
            file_name: format!("{}.json", scene.name),
            document: scene_to_obs(&scene),
        })
    }

    /// Creates a scene from an OBS document.
    pub fn import(&self, import: SceneImport) -> Result<ImportedScene, SceneStoreError> {
        let SceneImport {
            document,
            description,
            resolution,
        } = import;
        validate_resolution(resolution)?;

        let name = match document.name.trim() {
            "" => IMPORTED_SCENE_NAME.to_string(),
            _ => document.name.clone(),
        };
        let record = self.metadata.create(&NewScene {
            name: name.clone(),
            description: description.clone(),
            resolution,
        })?;

        let unrecognized_source_types = unrecognized_source_types(&document);
        let mut scene = scene_from_obs(&document, record.id.clone(), resolution);
        make_element_ids_unique(&mut scene);
        scene.name = name;
        scene.description = description;
        for issue in scene.validate() {
            warn!(scene_id = %record.id, "Imported scene: {issue}");
        }
        self.save_new(&record, scene.clone())?;

        info!(
            scene_id = %record.id,
            elements = scene.elements.len(),
            "Scene imported."
        );
        Ok(ImportedScene {
            scene: merge_metadata(scene, &record),
            unrecognized_source_types,
        })
    }

    pub fn add_element(
        &self,
        id: &SceneId,
        element: NewElement,
    ) -> Result<SceneElement, SceneStoreError> {
        let element_id = element.id.unwrap_or_else(ElementId::generate);
        self.edit(id, |scene| {
            Ok(scene.add_element(element.kind, element_id)?.clone())
        })
    }

    pub fn update_element(
        &self,
        id: &SceneId,
        element_id: &ElementId,
        patch: ElementPatch,
    ) -> Result<SceneElement, SceneStoreError> {
        self.edit(id, |scene| Ok(scene.update_element(element_id, patch)?.clone()))
    }

    pub fn remove_element(
        &self,
        id: &SceneId,
        element_id: &ElementId,
    ) -> Result<SceneElement, SceneStoreError> {
        self.edit(id, |scene| Ok(scene.remove_element(element_id)?))
    }

    pub fn duplicate_element(
        &self,
        id: &SceneId,
        element_id: &ElementId,
    ) -> Result<SceneElement, SceneStoreError> {
        self.edit(id, |scene| {
            Ok(scene
                .duplicate_element(element_id, ElementId::generate())?
                .clone())
        })
    }

    /// Moves an element one layer up or down. Returns the whole scene, as
    /// the order of other elements changes too.
    pub fn move_element(
        &self,
        id: &SceneId,
        element_id: &ElementId,
        direction: LayerMove,
    ) -> Result<Scene, SceneStoreError> {
        self.edit(id, |scene| {
            scene.move_element(element_id, direction)?;
            Ok(())
        })?;
        self.get(id)
    }

    fn load(&self, id: &SceneId) -> Result<(SceneMetadata, Scene), SceneStoreError> {
        let record = self
            .metadata
            .get(id)?
            .ok_or_else(|| SceneStoreError::SceneNotFound(id.clone()))?;
        let scene = self
            .documents
            .load(&record.json_path)?
            .ok_or_else(|| SceneStoreError::DocumentNotFound(id.clone()))?;
        Ok((record, scene))
    }

    /// Saves the document of a freshly created record. Drops the record if
    /// the document can not be written.
    fn save_new(&self, record: &SceneMetadata, mut scene: Scene) -> Result<(), SceneStoreError> {
        scene.created_at = Some(record.created_at);
        scene.updated_at = Some(record.updated_at);
        scene.json_path = Some(record.json_path.clone());

        if let Err(err) = self.documents.save(&scene) {
            if let Err(cleanup_err) = self.metadata.delete(&record.id) {
                error!(
                    scene_id = %record.id,
                    "Failed to remove metadata of a scene without a document: {}",
                    ErrorStack::new(&cleanup_err).into_string()
                );
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn edit<T>(
        &self,
        id: &SceneId,
        change: impl FnOnce(&mut Scene) -> Result<T, SceneStoreError>,
    ) -> Result<T, SceneStoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (_, mut scene) = self.load(id)?;
        let previous = scene.clone();
        let result = change(&mut scene)?;

        let updated_at = Utc::now();
        scene.updated_at = Some(updated_at);
        self.documents.save(&scene)?;

        let metadata_update = MetadataUpdate {
            updated_at: Some(updated_at),
            ..Default::default()
        };
        self.update_metadata(id, &metadata_update, &previous)?;
        Ok(result)
    }

    /// Updates the record of a scene whose document was already saved. On
    /// failure `previous` is written back.
    fn update_metadata(
        &self,
        id: &SceneId,
        update: &MetadataUpdate,
        previous: &Scene,
    ) -> Result<SceneMetadata, SceneStoreError> {
        let err = match self.metadata.update(id, update) {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => SceneStoreError::SceneNotFound(id.clone()),
            Err(err) => err.into(),
        };
        if let Err(restore_err) = self.documents.save(previous) {
            error!(
                scene_id = %id,
                "Failed to restore scene document: {}",
                ErrorStack::new(&restore_err).into_string()
            );
        }
        Err(err)
    }
}

/// Renames elements with an empty or repeated id. A repeated id becomes
/// `<id>-<index>` unless that is taken too, an empty one gets a generated id.
fn make_element_ids_unique(scene: &mut Scene) {
    let original: HashSet<ElementId> = scene
        .elements
        .iter()
        .map(|element| element.id.clone())
        .collect();
    let mut seen = HashSet::with_capacity(scene.elements.len());
    for (index, element) in scene.elements.iter_mut().enumerate() {
        if !element.id.0.is_empty() && !seen.contains(&element.id) {
            seen.insert(element.id.clone());
            continue;
        }
        let candidate = ElementId::from(format!("{}-{index}", element.id));
        let new_id = match element.id.0.is_empty()
            || original.contains(&candidate)
            || seen.contains(&candidate)
        {
            true => ElementId::generate(),
            false => candidate,
        };
        warn!(
            scene_id = %scene.id,
            element_id = %element.id,
            new_id = %new_id,
            "Imported element id is empty or repeated, renaming."
        );
        seen.insert(new_id.clone());
        element.id = new_id;
    }
}

/// Metadata fields take precedence over the ones stored in the document.
fn merge_metadata(mut scene: Scene, record: &SceneMetadata) -> Scene {
    scene.id = record.id.clone();
    scene.name = record.name.clone();
    scene.description = record.description.clone();
    scene.width = record.width;
    scene.height = record.height;
    scene.created_at = Some(record.created_at);
    scene.updated_at = Some(record.updated_at);
    scene.json_path = Some(record.json_path.clone());
    scene
}

fn validate_name(name: &str) -> Result<(), SceneStoreError> {
    match name.trim().is_empty() {
        true => Err(SceneStoreError::EmptyName),
        false => Ok(()),
    }
}

fn validate_resolution(resolution: Resolution) -> Result<(), SceneStoreError> {
    match resolution.width > 0 && resolution.height > 0 {
        true => Ok(()),
        false => Err(SceneStoreError::InvalidResolution {
            width: resolution.width,
            height: resolution.height,
        }),
    }
}

/// Rejects a replacement element list with repeated ids or with elements
/// whose type differs from the stored element of the same id. Elements not
/// stored yet need a known type and a non-negative size, as when added one
/// by one. Geometry drift is only reported.
fn validate_elements(current: &Scene, elements: &[SceneElement]) -> Result<(), SceneStoreError> {
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if !seen.insert(&element.id) {
            return Err(EditError::DuplicateElementId(element.id.clone()).into());
        }
        match current.element(&element.id) {
            Some(existing) if existing.kind != element.kind => {
                return Err(SceneStoreError::ElementTypeChanged {
                    id: element.id.clone(),
                    from: existing.kind.clone(),
                    to: element.kind.clone(),
                });
            }
            Some(_) => (),
            None if !element.kind.is_known() => {
                return Err(SceneStoreError::UnknownElementType {
                    id: element.id.clone(),
                    kind: element.kind.clone(),
                });
            }
            None if element.bounds.width < 0.0 || element.bounds.height < 0.0 => {
                return Err(SceneStoreError::NegativeElementSize(element.id.clone()));
            }
            None => (),
        }
        if !element.geometry_in_sync() {
            warn!(
                scene_id = %current.id,
                "{}",
                SceneIssue::GeometryOutOfSync(element.id.clone())
            );
        }
    }
    Ok(())
}
