pub mod documents;
pub mod error;
pub mod metadata;

mod store;
mod types;

#[cfg(test)]
mod store_tests;

pub use documents::{DocumentStore, FsDocumentStore, document_path};
pub use metadata::{InMemoryMetadataStore, MetadataStore};
pub use store::{SceneStore, SceneStoreOptions};
pub use types::*;
