use stagecraft_core::NewElement;
use stagecraft_model::{self as model, ALIGN_TOP_LEFT, ElementPatch, ElementType, LayerMove};

use crate::*;

impl TryFrom<AddElementRequest> for NewElement {
    type Error = TypeError;

    fn try_from(request: AddElementRequest) -> Result<Self, Self::Error> {
        let kind = ElementType::from(request.element_type.as_str());
        if !kind.is_known() {
            return Err(TypeError::new(format!(
                "Unknown element type \"{}\". Expected one of: {}.",
                request.element_type,
                ElementType::ALL.map(|kind| kind.to_string()).join(", ")
            )));
        }
        Ok(Self {
            kind,
            id: request.id.map(Into::into),
        })
    }
}

impl TryFrom<ElementPatchRequest> for ElementPatch {
    type Error = TypeError;

    fn try_from(request: ElementPatchRequest) -> Result<Self, Self::Error> {
        let filters = request
            .filters
            .map(|filters| filters.into_iter().map(Into::into).collect());
        Ok(Self {
            name: request.name,
            visible: request.visible,
            locked: request.locked,
            bounds: request.bounds.map(model::Bounds::try_from).transpose()?,
            transform: request.transform.map(Into::into),
            properties: request.properties,
            filters,
        })
    }
}

impl TryFrom<Bounds> for model::Bounds {
    type Error = TypeError;

    fn try_from(bounds: Bounds) -> Result<Self, Self::Error> {
        if bounds.width < 0.0 || bounds.height < 0.0 {
            return Err(TypeError::new("Element width and height can not be negative."));
        }
        Ok(Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        })
    }
}

impl From<Transform> for model::Transform {
    fn from(transform: Transform) -> Self {
        Self {
            position: transform.position.into(),
            rotation: transform.rotation,
            scale: transform.scale.into(),
            alignment: transform.alignment.unwrap_or(ALIGN_TOP_LEFT),
            bounds_type: transform.bounds_type.unwrap_or(0),
            bounds_alignment: transform.bounds_alignment.unwrap_or(0),
            bounds: transform.bounds.into(),
        }
    }
}

impl From<Filter> for model::Filter {
    fn from(filter: Filter) -> Self {
        Self {
            id: filter.id,
            name: filter.name,
            kind: filter.filter_type,
            enabled: filter.enabled.unwrap_or(true),
            settings: filter.settings.unwrap_or_default(),
        }
    }
}

impl From<MoveDirection> for LayerMove {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => LayerMove::Up,
            MoveDirection::Down => LayerMove::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn add_element_rejects_unknown_type() {
        let request: AddElementRequest =
            serde_json::from_value(json!({ "type": "vlc_source" })).unwrap();
        let err = NewElement::try_from(request).unwrap_err();
        assert!(err.to_string().starts_with("Unknown element type \"vlc_source\""));

        let request: AddElementRequest =
            serde_json::from_value(json!({ "type": "text", "id": "title" })).unwrap();
        let element = NewElement::try_from(request).unwrap();
        assert_eq!(element.kind, ElementType::Text);
        assert_eq!(element.id, Some(model::ElementId::from("title")));
    }

    #[test]
    fn patch_with_transform_defaults() {
        let request: ElementPatchRequest = serde_json::from_value(json!({
            "transform": {
                "position": { "x": 1, "y": 2 },
                "rotation": 0,
                "scale": { "x": 1, "y": 1 },
                "bounds": { "x": 30, "y": 40 }
            },
            "filters": [{ "id": "f", "name": "Crop", "type": "crop_filter" }]
        }))
        .unwrap();

        let patch = ElementPatch::try_from(request).unwrap();
        let transform = patch.transform.unwrap();
        assert_eq!(transform.alignment, ALIGN_TOP_LEFT);
        assert_eq!(transform.bounds, model::Vec2::new(30.0, 40.0));
        let filters = patch.filters.unwrap();
        assert!(filters[0].enabled);
        assert!(filters[0].settings.is_empty());
    }

    #[test]
    fn patch_rejects_negative_size() {
        let request: ElementPatchRequest = serde_json::from_value(json!({
            "bounds": { "x": 0, "y": 0, "width": -1, "height": 10 }
        }))
        .unwrap();
        assert!(ElementPatch::try_from(request).is_err());
    }

    #[test]
    fn patch_rejects_type_change() {
        let result: Result<ElementPatchRequest, _> =
            serde_json::from_value(json!({ "type": "text" }));
        assert!(result.is_err());
    }
}
