pub mod error;

mod editing;
mod element_type;
mod scene;
mod validation;

pub use editing::{ElementPatch, LayerMove};
pub use element_type::ElementType;
pub use error::EditError;
pub use scene::*;
pub use validation::SceneIssue;
