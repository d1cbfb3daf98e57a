use std::{error::Error, fmt::Write};

use crate::ElementId;

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Element \"{0}\" does not exist in this scene.")]
    ElementNotFound(ElementId),

    #[error("Element \"{0}\" already exists in this scene.")]
    DuplicateElementId(ElementId),
}

/// Iterates over an error and all of its sources.
pub struct ErrorStack<'a>(Option<&'a (dyn Error + 'static)>);

impl<'a> ErrorStack<'a> {
    pub fn new(value: &'a (dyn Error + 'static)) -> Self {
        ErrorStack(Some(value))
    }

    pub fn into_string(self) -> String {
        let mut result = String::new();
        for (index, err) in self.enumerate() {
            if index == 0 {
                let _ = write!(result, "{err}");
            } else {
                let _ = write!(result, "\n - {err}");
            }
        }
        result
    }
}

impl<'a> Iterator for ErrorStack<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.0?;
        self.0 = current.source();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] EditError);

    #[test]
    fn walks_source_chain() {
        let err = Outer(EditError::ElementNotFound("abc".into()));
        assert_eq!(
            ErrorStack::new(&err).into_string(),
            "outer\n - Element \"abc\" does not exist in this scene."
        );
    }
}
