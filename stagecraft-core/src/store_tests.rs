use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use serde_json::json;
use stagecraft_model::{
    ElementId, ElementPatch, ElementType, LayerMove, Resolution, Scene, SceneId,
    error::EditError,
};
use stagecraft_obs::ObsDocument;
use tempfile::TempDir;

use crate::{
    DocumentStore, FsDocumentStore, InMemoryMetadataStore, MetadataStore, NewElement, NewScene,
    SceneImport, SceneStore, SceneStoreOptions, SceneUpdate,
    error::{DocumentStoreError, ErrorInfo, ErrorType, SceneStoreError},
};

fn store() -> (TempDir, SceneStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SceneStore::from_options(&SceneStoreOptions {
        storage_path: dir.path().join("scenes"),
        persist_metadata: true,
    })
    .unwrap();
    (dir, store)
}

fn new_scene(name: &str) -> NewScene {
    NewScene {
        name: name.to_string(),
        description: None,
        resolution: Resolution::default(),
    }
}

fn new_element(kind: ElementType, id: Option<ElementId>) -> NewElement {
    NewElement { kind, id }
}

fn error_type(err: &SceneStoreError) -> ErrorType {
    ErrorInfo::from(err).error_type
}

#[test]
fn test_create_persists_empty_document() {
    let (dir, store) = store();
    let record = store
        .create(NewScene {
            description: Some("Main layout".to_string()),
            ..new_scene("Stream Layout")
        })
        .unwrap();

    assert_eq!(record.name, "Stream Layout");
    assert_eq!((record.width, record.height), (1920, 1080));
    assert_eq!(record.json_path, format!("/scenes/{}.json", record.id));
    assert!(dir.path().join(format!("scenes/{}.json", record.id)).exists());
    assert!(dir.path().join("scenes/index.json").exists());

    let scene = store.get(&record.id).unwrap();
    assert!(scene.elements.is_empty());
    assert_eq!(scene.description.as_deref(), Some("Main layout"));
    assert_eq!(scene.created_at, Some(record.created_at));
}

#[test]
fn test_create_validation() {
    let (_dir, store) = store();
    let err = store.create(new_scene("  ")).unwrap_err();
    assert!(matches!(err, SceneStoreError::EmptyName));
    assert_eq!(error_type(&err), ErrorType::UserError);

    let err = store
        .create(NewScene {
            resolution: Resolution {
                width: 0,
                height: 1080,
            },
            ..new_scene("Layout")
        })
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::InvalidResolution { .. }));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_list_newest_first() {
    let (_dir, store) = store();
    let first = store.create(new_scene("first")).unwrap();
    let second = store.create(new_scene("second")).unwrap();

    let names: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, vec!["second", "first"]);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_missing_scene() {
    let (_dir, store) = store();
    let id = SceneId::from("missing");

    let err = store.get(&id).unwrap_err();
    assert!(matches!(err, SceneStoreError::SceneNotFound(_)));
    assert_eq!(error_type(&err), ErrorType::EntityNotFound);
    assert!(store.delete(&id).is_err());
    assert!(store.export(&id).is_err());
    assert!(store.update(&id, SceneUpdate::default()).is_err());
}

#[test]
fn test_missing_document() {
    let (dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    std::fs::remove_file(dir.path().join(format!("scenes/{}.json", record.id))).unwrap();

    let err = store.get(&record.id).unwrap_err();
    assert!(matches!(err, SceneStoreError::DocumentNotFound(_)));
    assert_eq!(error_type(&err), ErrorType::EntityNotFound);

    store.delete(&record.id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_update_merges_fields() {
    let (_dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    let element = store
        .add_element(&record.id, new_element(ElementType::Text, Some("title".into())))
        .unwrap();

    let scene = store
        .update(
            &record.id,
            SceneUpdate {
                name: Some("Renamed".to_string()),
                width: Some(1280),
                height: Some(720),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(scene.name, "Renamed");
    assert_eq!((scene.width, scene.height), (1280, 720));
    assert_eq!(scene.elements, vec![element]);
    assert!(scene.updated_at >= Some(record.updated_at));

    let stored = store.get(&record.id).unwrap();
    assert_eq!(stored, scene);
    assert_eq!(store.list().unwrap()[0].name, "Renamed");
}

#[test]
fn test_update_replaces_elements() {
    let (_dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    store
        .add_element(&record.id, new_element(ElementType::Image, Some("a".into())))
        .unwrap();

    let mut replacement = Scene::new(record.id.clone(), "Layout", Resolution::default());
    replacement
        .add_element(ElementType::Image, "a".into())
        .unwrap();
    replacement
        .add_element(ElementType::ColorSource, "b".into())
        .unwrap();

    let scene = store
        .update(
            &record.id,
            SceneUpdate {
                elements: Some(replacement.elements.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(scene.elements, replacement.elements);
}

#[test]
fn test_update_rejects_invalid_elements() {
    let (_dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    let element = store
        .add_element(&record.id, new_element(ElementType::Image, Some("a".into())))
        .unwrap();

    let err = store
        .update(
            &record.id,
            SceneUpdate {
                elements: Some(vec![element.clone(), element.clone()]),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        SceneStoreError::Edit(EditError::DuplicateElementId(_))
    ));
    assert_eq!(error_type(&err), ErrorType::UserError);

    let mut retyped = element.clone();
    retyped.kind = ElementType::Text;
    let err = store
        .update(
            &record.id,
            SceneUpdate {
                elements: Some(vec![retyped]),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::ElementTypeChanged { .. }));

    assert_eq!(store.get(&record.id).unwrap().elements, vec![element]);
}

#[test]
fn test_update_validates_new_elements() {
    let (_dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    let mut scene = Scene::new(record.id.clone(), "Layout", Resolution::default());
    scene.add_element(ElementType::Image, "a".into()).unwrap();

    let mut unknown = scene.elements[0].clone();
    unknown.kind = ElementType::from("vlc_source");
    let err = store
        .update(
            &record.id,
            SceneUpdate {
                elements: Some(vec![unknown]),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::UnknownElementType { .. }));
    assert_eq!(ErrorInfo::from(&err).error_code, "UNKNOWN_ELEMENT_TYPE");

    let mut negative = scene.elements[0].clone();
    negative.set_size(-10.0, 20.0);
    let err = store
        .update(
            &record.id,
            SceneUpdate {
                elements: Some(vec![negative]),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::NegativeElementSize(_)));
    assert_eq!(error_type(&err), ErrorType::UserError);

    assert!(store.get(&record.id).unwrap().elements.is_empty());
}

#[test]
fn test_delete_removes_document() {
    let (dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    let document = dir.path().join(format!("scenes/{}.json", record.id));
    assert!(document.exists());

    store.delete(&record.id).unwrap();
    assert!(!document.exists());
    assert!(matches!(
        store.get(&record.id),
        Err(SceneStoreError::SceneNotFound(_))
    ));
}

#[test]
fn test_element_operations() {
    let (_dir, store) = store();
    let id = store.create(new_scene("Layout")).unwrap().id;

    let text = store.add_element(&id, new_element(ElementType::Text, None)).unwrap();
    let image = store.add_element(&id, new_element(ElementType::Image, None)).unwrap();
    assert_eq!((text.order, image.order), (0, 1));

    let patch = ElementPatch {
        visible: Some(false),
        ..Default::default()
    };
    let updated = store.update_element(&id, &text.id, patch).unwrap();
    assert!(!updated.visible);

    let copy = store.duplicate_element(&id, &image.id).unwrap();
    assert_eq!(copy.name, "image 2 (copy)");
    assert_eq!(copy.order, 2);

    let scene = store.move_element(&id, &copy.id, LayerMove::Down).unwrap();
    let ids: Vec<ElementId> = scene
        .sorted_elements()
        .into_iter()
        .map(|element| element.id.clone())
        .collect();
    assert_eq!(ids, vec![text.id.clone(), copy.id.clone(), image.id.clone()]);

    store.remove_element(&id, &text.id).unwrap();
    let scene = store.get(&id).unwrap();
    assert_eq!(scene.elements.len(), 2);
    assert!(scene.element(&text.id).is_none());

    let err = store.remove_element(&id, &text.id).unwrap_err();
    assert_eq!(error_type(&err), ErrorType::EntityNotFound);

    let err = store
        .add_element(&id, new_element(ElementType::Text, Some(image.id.clone())))
        .unwrap_err();
    assert_eq!(error_type(&err), ErrorType::UserError);
}

#[test]
fn test_text_element_export() {
    let (_dir, store) = store();
    let id = store.create(new_scene("Stream Layout")).unwrap().id;
    let element = store.add_element(&id, new_element(ElementType::Text, None)).unwrap();
    let patch = ElementPatch {
        properties: json!({ "text": "Hello" }).as_object().cloned(),
        ..Default::default()
    };
    store.update_element(&id, &element.id, patch).unwrap();

    let exported = store.export(&id).unwrap();
    assert_eq!(exported.file_name, "Stream Layout.json");
    assert_eq!(exported.document.sources.len(), 1);
    assert_eq!(exported.document.sources[0].source_type, "text_gdiplus_v2");
    assert_eq!(exported.document.sources[0].settings["text"], "Hello");

    let again = store.export(&id).unwrap();
    assert_eq!(
        exported.document.to_pretty_json().unwrap(),
        again.document.to_pretty_json().unwrap()
    );
}

#[test]
fn test_import() {
    let (_dir, store) = store();
    let document: ObsDocument = serde_json::from_value(json!({
        "name": "",
        "sources": [
            { "id": "a", "name": "A", "type": "image_source" },
            { "id": "b", "name": "B", "type": "unknown_source_xyz" }
        ]
    }))
    .unwrap();

    let imported = store
        .import(SceneImport {
            document,
            description: None,
            resolution: Resolution {
                width: 1280,
                height: 720,
            },
        })
        .unwrap();
    assert_eq!(imported.unrecognized_source_types, vec!["unknown_source_xyz"]);
    assert_eq!(imported.scene.name, "Imported Scene");
    assert_eq!(imported.scene.elements[1].kind, ElementType::BrowserSource);

    let stored = store.get(&imported.scene.id).unwrap();
    assert_eq!(stored, imported.scene);
    assert_eq!((stored.width, stored.height), (1280, 720));
}

#[test]
fn test_import_renames_repeated_ids() {
    let (_dir, store) = store();
    let document: ObsDocument = serde_json::from_value(json!({
        "name": "Cameras",
        "sources": [
            { "id": "cam", "name": "Front", "type": "dshow_input",
              "filters": [{ "name": "Crop", "type": "crop_filter" }] },
            { "id": "cam", "name": "Side", "type": "dshow_input",
              "filters": [{ "name": "Crop", "type": "crop_filter" }] },
            { "name": "No id", "type": "image_source" },
            { "id": "cam-1", "name": "Back", "type": "dshow_input" }
        ]
    }))
    .unwrap();

    let imported = store
        .import(SceneImport {
            document,
            description: None,
            resolution: Resolution::default(),
        })
        .unwrap();
    let scene = imported.scene;
    assert!(scene.validate().is_empty());

    let ids: Vec<&str> = scene.elements.iter().map(|e| e.id.0.as_ref()).collect();
    assert_eq!(ids[0], "cam");
    assert!(!ids[1].is_empty() && ids[1] != "cam" && ids[1] != "cam-1");
    assert!(!ids[2].is_empty());
    assert_eq!(ids[3], "cam-1");
    assert_eq!(scene.elements[1].filters[0].id, "filter-cam-0");

    let saved = store
        .update(
            &scene.id,
            SceneUpdate {
                elements: Some(scene.elements.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(saved.elements, scene.elements);
}

#[test]
fn test_import_suffixes_repeated_id() {
    let (_dir, store) = store();
    let document: ObsDocument = serde_json::from_value(json!({
        "name": "Cameras",
        "sources": [
            { "id": "cam", "type": "dshow_input" },
            { "id": "cam", "type": "dshow_input" }
        ]
    }))
    .unwrap();

    let imported = store
        .import(SceneImport {
            document,
            description: None,
            resolution: Resolution::default(),
        })
        .unwrap();
    let ids: Vec<ElementId> = imported.scene.elements.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![ElementId::from("cam"), ElementId::from("cam-1")]);
}

#[test]
fn test_metadata_survives_restart() {
    let (dir, store) = store();
    let record = store.create(new_scene("Layout")).unwrap();
    drop(store);

    let reopened = SceneStore::from_options(&SceneStoreOptions {
        storage_path: dir.path().join("scenes"),
        persist_metadata: true,
    })
    .unwrap();
    assert_eq!(reopened.list().unwrap(), vec![record.clone()]);
    assert_eq!(reopened.get(&record.id).unwrap().name, "Layout");
}

struct ReadOnlyDocuments;

impl DocumentStore for ReadOnlyDocuments {
    fn load(&self, _path: &str) -> Result<Option<Scene>, DocumentStoreError> {
        Ok(None)
    }

    fn save(&self, scene: &Scene) -> Result<String, DocumentStoreError> {
        Err(DocumentStoreError::Write(
            Path::new("/read-only").join(scene.id.to_string()),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ))
    }

    fn delete(&self, _path: &str) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }
}

#[test]
fn test_failed_document_write_drops_metadata() {
    let metadata = Arc::new(InMemoryMetadataStore::new());
    let store = SceneStore::new(metadata.clone(), Arc::new(ReadOnlyDocuments));

    let err = store.create(new_scene("Layout")).unwrap_err();
    assert!(matches!(err, SceneStoreError::Document(_)));
    assert_eq!(error_type(&err), ErrorType::ServerError);
    assert!(metadata.list().unwrap().is_empty());
}

/// Document store that starts rejecting writes once `fail_saves` is set.
struct FlakyDocuments {
    inner: FsDocumentStore,
    fail_saves: AtomicBool,
}

impl DocumentStore for FlakyDocuments {
    fn load(&self, path: &str) -> Result<Option<Scene>, DocumentStoreError> {
        self.inner.load(path)
    }

    fn save(&self, scene: &Scene) -> Result<String, DocumentStoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return ReadOnlyDocuments.save(scene);
        }
        self.inner.save(scene)
    }

    fn delete(&self, path: &str) -> Result<bool, DocumentStoreError> {
        self.inner.delete(path)
    }
}

fn flaky_store(dir: &TempDir) -> (Arc<FlakyDocuments>, SceneStore) {
    let documents = Arc::new(FlakyDocuments {
        inner: FsDocumentStore::new(dir.path()),
        fail_saves: AtomicBool::new(false),
    });
    let store = SceneStore::new(Arc::new(InMemoryMetadataStore::new()), documents.clone());
    (documents, store)
}

#[test]
fn test_failed_update_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let (documents, store) = flaky_store(&dir);
    let record = store.create(new_scene("Before")).unwrap();
    store
        .add_element(&record.id, new_element(ElementType::Text, Some("a".into())))
        .unwrap();
    let before = store.get(&record.id).unwrap();

    documents.fail_saves.store(true, Ordering::SeqCst);
    let err = store
        .update(
            &record.id,
            SceneUpdate {
                name: Some("After".to_string()),
                width: Some(640),
                elements: Some(Vec::new()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::Document(_)));

    let err = store
        .remove_element(&record.id, &"a".into())
        .unwrap_err();
    assert!(matches!(err, SceneStoreError::Document(_)));

    let after = store.get(&record.id).unwrap();
    assert_eq!(after, before);
    assert_eq!(after.name, "Before");
    assert_eq!(after.width, 1920);
    assert_eq!(store.list().unwrap()[0].updated_at, before.updated_at.unwrap());
}
