use stagecraft_model::{Filter, Scene, SceneElement, Transform, Vec2};

use crate::{ObsDocument, ObsFilter, ObsSource, ObsTransform, ObsVec2, obs_source_type};

/// Sources are emitted in layer order (ascending `order`, ties keep their
/// position in `scene.elements`), so the result does not depend on how the
/// caller ordered the elements.
pub fn scene_to_obs(scene: &Scene) -> ObsDocument {
    ObsDocument {
        name: scene.name.clone(),
        sources: scene.sorted_elements().into_iter().map(ObsSource::from).collect(),
    }
}

impl From<&Scene> for ObsDocument {
    fn from(scene: &Scene) -> Self {
        scene_to_obs(scene)
    }
}

impl From<&SceneElement> for ObsSource {
    fn from(element: &SceneElement) -> Self {
        Self {
            id: element.id.to_string(),
            name: element.name.clone(),
            source_type: obs_source_type(&element.kind).to_string(),
            settings: element.properties.clone(),
            filters: element.filters.iter().map(ObsFilter::from).collect(),
            transform: element.transform.into(),
            visible: element.visible,
            locked: element.locked,
        }
    }
}

impl From<&Filter> for ObsFilter {
    fn from(filter: &Filter) -> Self {
        Self {
            name: filter.name.clone(),
            filter_type: filter.kind.clone(),
            enabled: filter.enabled,
            settings: filter.settings.clone(),
        }
    }
}

impl From<Transform> for ObsTransform {
    fn from(transform: Transform) -> Self {
        Self {
            pos: transform.position.into(),
            rot: transform.rotation,
            scale: transform.scale.into(),
            alignment: transform.alignment,
            bounds_type: transform.bounds_type,
            bounds_alignment: transform.bounds_alignment,
            bounds: transform.bounds.into(),
        }
    }
}

impl From<Vec2> for ObsVec2 {
    fn from(value: Vec2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}
