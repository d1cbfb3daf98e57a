use serde_json::json;
use stagecraft_model::{
    ElementId, ElementPatch, ElementType, Filter, Properties, Resolution, Scene, SceneId,
    Transform, Vec2,
};

use crate::{ObsVec2, scene_to_obs};

fn properties(value: serde_json::Value) -> Properties {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn empty_scene() -> Scene {
    Scene::new(SceneId::from("scene-1"), "Stream Layout", Resolution::default())
}

#[test]
fn test_element_types() {
    let cases = [
        (ElementType::BrowserSource, "browser_source"),
        (ElementType::Text, "text_gdiplus_v2"),
        (ElementType::Image, "image_source"),
        (ElementType::GameCapture, "game_capture"),
        (ElementType::WindowCapture, "window_capture"),
        (ElementType::DisplayCapture, "monitor_capture"),
        (ElementType::AudioCapture, "wasapi_input_capture"),
        (ElementType::VideoCapture, "dshow_input"),
        (ElementType::ColorSource, "color_source"),
        (ElementType::MediaSource, "ffmpeg_source"),
    ];
    for (kind, expected) in cases {
        let mut scene = empty_scene();
        scene.add_element(kind.clone(), ElementId::generate()).unwrap();

        let document = scene_to_obs(&scene);
        assert_eq!(document.sources.len(), 1);
        assert_eq!(document.sources[0].source_type, expected, "type {kind}");
    }
}

#[test]
fn test_unknown_type_passes_through() {
    let mut scene = empty_scene();
    scene
        .add_element(ElementType::from("vlc_source"), "a".into())
        .unwrap();

    let document = scene_to_obs(&scene);
    assert_eq!(document.sources[0].source_type, "vlc_source");
}

#[test]
fn test_sources_follow_layer_order() {
    let mut scene = empty_scene();
    for id in ["a", "b", "c", "d"] {
        scene.add_element(ElementType::Image, id.into()).unwrap();
    }
    scene.elements[0].order = 3;
    scene.elements[1].order = 0;
    scene.elements[2].order = 3;
    scene.elements[3].order = -1;

    let document = scene_to_obs(&scene);
    let ids: Vec<&str> = document.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "b", "a", "c"]);
    assert_eq!(document.sources.len(), scene.elements.len());
}

#[test]
fn test_source_fields() {
    let mut scene = empty_scene();
    scene.add_element(ElementType::Text, "title".into()).unwrap();
    let transform = Transform {
        position: Vec2::new(10.5, 20.0),
        rotation: 45.0,
        scale: Vec2::new(2.0, 0.5),
        alignment: 0,
        bounds_type: 2,
        bounds_alignment: 8,
        bounds: Vec2::new(640.0, 360.0),
    };
    let patch = ElementPatch {
        name: Some("Title".to_string()),
        visible: Some(false),
        locked: Some(true),
        transform: Some(transform),
        properties: Some(properties(json!({ "text": "Hello", "extra": [1, 2] }))),
        ..Default::default()
    };
    scene.update_element(&"title".into(), patch).unwrap();

    let document = scene_to_obs(&scene);
    assert_eq!(document.name, "Stream Layout");

    let source = &document.sources[0];
    assert_eq!(source.id, "title");
    assert_eq!(source.name, "Title");
    assert!(!source.visible);
    assert!(source.locked);
    assert_eq!(source.settings["text"], "Hello");
    assert_eq!(source.settings["extra"], json!([1, 2]));
    assert_eq!(source.transform.pos, ObsVec2 { x: 10.5, y: 20.0 });
    assert_eq!(source.transform.rot, 45.0);
    assert_eq!(source.transform.scale, ObsVec2 { x: 2.0, y: 0.5 });
    assert_eq!(source.transform.alignment, 0);
    assert_eq!(source.transform.bounds_type, 2);
    assert_eq!(source.transform.bounds_alignment, 8);
    assert_eq!(source.transform.bounds, ObsVec2 { x: 640.0, y: 360.0 });
}

#[test]
fn test_filters_drop_ids() {
    let mut scene = empty_scene();
    scene.add_element(ElementType::VideoCapture, "cam".into()).unwrap();
    let filters = vec![
        Filter {
            id: "local-1".to_string(),
            name: "Chroma Key".to_string(),
            kind: "chroma_key_filter".to_string(),
            enabled: true,
            settings: properties(json!({ "similarity": 400 })),
        },
        Filter {
            id: "local-2".to_string(),
            name: "Sharpen".to_string(),
            kind: "sharpness_filter".to_string(),
            enabled: false,
            settings: Properties::new(),
        },
    ];
    let patch = ElementPatch {
        filters: Some(filters),
        ..Default::default()
    };
    scene.update_element(&"cam".into(), patch).unwrap();

    let document = scene_to_obs(&scene);
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value["sources"][0]["filters"],
        json!([
            {
                "name": "Chroma Key",
                "type": "chroma_key_filter",
                "enabled": true,
                "settings": { "similarity": 400 }
            },
            {
                "name": "Sharpen",
                "type": "sharpness_filter",
                "enabled": false,
                "settings": {}
            }
        ])
    );
}

#[test]
fn test_key_order() {
    let mut scene = empty_scene();
    scene.add_element(ElementType::ColorSource, "bg".into()).unwrap();

    let json = String::from_utf8(scene_to_obs(&scene).to_pretty_json().unwrap()).unwrap();
    let positions: Vec<usize> = [
        "\"name\": \"Stream Layout\"",
        "\"sources\"",
        "\"id\": \"bg\"",
        "\"type\": \"color_source\"",
        "\"settings\"",
        "\"filters\"",
        "\"transform\"",
        "\"pos\"",
        "\"rot\"",
        "\"scale\"",
        "\"alignment\"",
        "\"bounds_type\"",
        "\"bounds_alignment\"",
        "\"bounds\": {",
        "\"visible\"",
        "\"locked\"",
    ]
    .iter()
    .map(|key| json.find(key).unwrap())
    .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{json}");
    assert!(json.starts_with("{\n  \"name\""));
}

#[test]
fn test_export_is_deterministic() {
    let mut scene = empty_scene();
    for kind in ElementType::ALL {
        scene.add_element(kind, ElementId::generate()).unwrap();
    }
    let before = scene.clone();

    let first = scene_to_obs(&scene).to_pretty_json().unwrap();
    let second = scene_to_obs(&scene).to_pretty_json().unwrap();
    assert_eq!(first, second);
    assert_eq!(scene, before);
}

#[test]
fn test_text_element_end_to_end() {
    let mut scene = empty_scene();
    assert_eq!((scene.width, scene.height), (1920, 1080));
    let patch = ElementPatch {
        properties: Some(properties(json!({ "text": "Hello" }))),
        ..Default::default()
    };
    let id = scene
        .add_element(ElementType::Text, ElementId::generate())
        .unwrap()
        .id
        .clone();
    scene.update_element(&id, patch).unwrap();

    let bytes = scene_to_obs(&scene).to_pretty_json().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["name"], "Stream Layout");
    assert_eq!(value["sources"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["sources"][0]["type"], "text_gdiplus_v2");
    assert_eq!(value["sources"][0]["settings"]["text"], "Hello");
}
