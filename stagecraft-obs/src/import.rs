use itertools::Itertools;
use stagecraft_model::{
    Bounds, ElementId, Filter, Resolution, Scene, SceneElement, SceneId, Transform, Vec2,
};
use tracing::warn;

use crate::{
    FALLBACK_ELEMENT_TYPE, ObsDocument, ObsFilter, ObsSource, ObsTransform, ObsVec2,
    element_type_from_obs,
};

/// Builds a scene from an OBS document. Id and resolution are not part of
/// the OBS format and have to be provided.
///
/// Position in `sources` becomes the element `order`. Element bounds are
/// rebuilt from `pos` and transform `bounds` without taking alignment or
/// bounds type into account. Filters get ids `filter-<source id>-<index>`.
pub fn scene_from_obs(document: &ObsDocument, id: SceneId, resolution: Resolution) -> Scene {
    let mut scene = Scene::new(id, document.name.clone(), resolution);
    scene.elements = document
        .sources
        .iter()
        .enumerate()
        .map(|(index, source)| element_from_source(source, index as i64))
        .collect();
    scene
}

/// Source types of the document that import maps to the fallback element
/// type, deduplicated, in order of first appearance.
pub fn unrecognized_source_types(document: &ObsDocument) -> Vec<String> {
    document
        .sources
        .iter()
        .map(|source| source.source_type.as_str())
        .filter(|source_type| element_type_from_obs(source_type).is_none())
        .unique()
        .map(str::to_string)
        .collect()
}

fn element_from_source(source: &ObsSource, order: i64) -> SceneElement {
    let kind = element_type_from_obs(&source.source_type).unwrap_or_else(|| {
        warn!(
            source_id = %source.id,
            source_type = %source.source_type,
            "Unrecognized OBS source type, importing as {FALLBACK_ELEMENT_TYPE}."
        );
        FALLBACK_ELEMENT_TYPE
    });
    let transform = Transform::from(source.transform);

    SceneElement {
        id: ElementId::from(source.id.as_str()),
        name: source.name.clone(),
        kind,
        visible: source.visible,
        locked: source.locked,
        bounds: Bounds::from_transform(&transform),
        transform,
        properties: source.settings.clone(),
        filters: source
            .filters
            .iter()
            .enumerate()
            .map(|(index, filter)| filter_from_obs(&source.id, index, filter))
            .collect(),
        order,
    }
}

fn filter_from_obs(source_id: &str, index: usize, filter: &ObsFilter) -> Filter {
    Filter {
        id: format!("filter-{source_id}-{index}"),
        name: filter.name.clone(),
        kind: filter.filter_type.clone(),
        enabled: filter.enabled,
        settings: filter.settings.clone(),
    }
}

impl From<ObsTransform> for Transform {
    fn from(transform: ObsTransform) -> Self {
        Self {
            position: transform.pos.into(),
            rotation: transform.rot,
            scale: transform.scale.into(),
            alignment: transform.alignment,
            bounds_type: transform.bounds_type,
            bounds_alignment: transform.bounds_alignment,
            bounds: transform.bounds.into(),
        }
    }
}

impl From<ObsVec2> for Vec2 {
    fn from(value: ObsVec2) -> Self {
        Vec2::new(value.x, value.y)
    }
}
