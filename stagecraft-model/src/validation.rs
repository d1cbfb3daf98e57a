use std::{collections::HashSet, fmt::Display};

use crate::{ElementId, Scene};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneIssue {
    DuplicateElementId(ElementId),
    /// `bounds` and `transform` of the element describe different rectangles.
    GeometryOutOfSync(ElementId),
}

impl Display for SceneIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneIssue::DuplicateElementId(id) => {
                write!(f, "Element id \"{id}\" is used more than once.")
            }
            SceneIssue::GeometryOutOfSync(id) => write!(
                f,
                "Bounds of element \"{id}\" do not match its transform position and bounds."
            ),
        }
    }
}

impl Scene {
    pub fn validate(&self) -> Vec<SceneIssue> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        let mut issues = Vec::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                issues.push(SceneIssue::DuplicateElementId(element.id.clone()));
            }
            if !element.geometry_in_sync() {
                issues.push(SceneIssue::GeometryOutOfSync(element.id.clone()));
            }
        }
        issues
    }
}
