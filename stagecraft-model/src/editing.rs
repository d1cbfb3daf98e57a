use itertools::Itertools;

use crate::{
    Bounds, ElementId, ElementType, Filter, Properties, Scene, SceneElement, Transform,
    error::EditError,
};

const NEW_ELEMENT_OFFSET: f64 = 100.0;
const NEW_ELEMENT_STEP: f64 = 20.0;
const NEW_ELEMENT_WIDTH: f64 = 400.0;
const NEW_ELEMENT_HEIGHT: f64 = 300.0;
const DUPLICATE_OFFSET: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMove {
    /// Towards the top of the stack (higher `order`).
    Up,
    Down,
}

/// Partial element update. Type and order are not editable this way.
///
/// When both `transform` and `bounds` are set, the transform is applied
/// first and `bounds` then overrides its geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub bounds: Option<Bounds>,
    pub transform: Option<Transform>,
    pub properties: Option<Properties>,
    pub filters: Option<Vec<Filter>>,
}

impl Scene {
    /// Elements in layer order, bottom first. Equal `order` values keep
    /// their sequence position.
    pub fn sorted_elements(&self) -> Vec<&SceneElement> {
        self.elements
            .iter()
            .sorted_by_key(|element| element.order)
            .collect()
    }

    pub fn next_order(&self) -> i64 {
        self.elements
            .iter()
            .map(|element| element.order)
            .max()
            .map_or(0, |order| order + 1)
    }

    /// Sorts elements by layer and rewrites `order` to `0..n-1`.
    pub fn normalize_order(&mut self) {
        self.elements.sort_by_key(|element| element.order);
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.order = index as i64;
        }
    }

    pub fn add_element(
        &mut self,
        kind: ElementType,
        id: ElementId,
    ) -> Result<&SceneElement, EditError> {
        if self.element(&id).is_some() {
            return Err(EditError::DuplicateElementId(id));
        }
        let count = self.elements.len();
        let offset = NEW_ELEMENT_OFFSET + count as f64 * NEW_ELEMENT_STEP;
        let mut element = SceneElement {
            id,
            name: format!("{kind} {}", count + 1),
            properties: kind.default_properties(),
            kind,
            visible: true,
            locked: false,
            bounds: Bounds::default(),
            transform: Transform::default(),
            filters: Vec::new(),
            order: self.next_order(),
        };
        element.set_bounds(Bounds {
            x: offset,
            y: offset,
            width: NEW_ELEMENT_WIDTH,
            height: NEW_ELEMENT_HEIGHT,
        });
        self.elements.push(element);
        Ok(&self.elements[count])
    }

    pub fn update_element(
        &mut self,
        id: &ElementId,
        patch: ElementPatch,
    ) -> Result<&SceneElement, EditError> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;

        let ElementPatch {
            name,
            visible,
            locked,
            bounds,
            transform,
            properties,
            filters,
        } = patch;

        if let Some(name) = name {
            element.name = name;
        }
        if let Some(visible) = visible {
            element.visible = visible;
        }
        if let Some(locked) = locked {
            element.locked = locked;
        }
        if let Some(transform) = transform {
            element.set_transform(transform);
        }
        if let Some(bounds) = bounds {
            element.set_bounds(bounds);
        }
        if let Some(properties) = properties {
            element.properties = properties;
        }
        if let Some(filters) = filters {
            element.filters = filters;
        }
        Ok(element)
    }

    pub fn remove_element(&mut self, id: &ElementId) -> Result<SceneElement, EditError> {
        let index = self
            .elements
            .iter()
            .position(|element| &element.id == id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;
        Ok(self.elements.remove(index))
    }

    /// Copies an element on top of the stack, shifted down and right.
    pub fn duplicate_element(
        &mut self,
        id: &ElementId,
        new_id: ElementId,
    ) -> Result<&SceneElement, EditError> {
        if self.element(&new_id).is_some() {
            return Err(EditError::DuplicateElementId(new_id));
        }
        let source = self
            .element(id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;

        let mut copy = source.clone();
        copy.id = new_id;
        copy.name = format!("{} (copy)", source.name);
        copy.order = self.next_order();
        copy.set_position(
            source.bounds.x + DUPLICATE_OFFSET,
            source.bounds.y + DUPLICATE_OFFSET,
        );

        self.elements.push(copy);
        Ok(&self.elements[self.elements.len() - 1])
    }

    /// Swaps the element with its neighbour in layer order. Returns `false`
    /// when the element is already at the top (or bottom) of the stack.
    pub fn move_element(
        &mut self,
        id: &ElementId,
        direction: LayerMove,
    ) -> Result<bool, EditError> {
        if self.element(id).is_none() {
            return Err(EditError::ElementNotFound(id.clone()));
        }
        self.normalize_order();
        let index = self
            .elements
            .iter()
            .position(|element| &element.id == id)
            .ok_or_else(|| EditError::ElementNotFound(id.clone()))?;

        let neighbour = match direction {
            LayerMove::Up if index + 1 < self.elements.len() => index + 1,
            LayerMove::Down if index > 0 => index - 1,
            _ => return Ok(false),
        };
        self.elements.swap(index, neighbour);
        self.elements[index].order = index as i64;
        self.elements[neighbour].order = neighbour as i64;
        Ok(true)
    }
}
