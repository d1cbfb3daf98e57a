//! Types accepted and returned by the HTTP API, with conversions into the
//! types of `stagecraft-core`.

mod common;
mod element;
mod element_into;
mod error;
mod scene;
mod scene_into;

pub use common::*;
pub use element::*;
pub use error::TypeError;
pub use scene::*;
