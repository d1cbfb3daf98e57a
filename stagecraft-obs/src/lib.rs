//! Conversion between stagecraft scenes and the OBS Studio scene JSON format.
//!
//! Both directions are total. Export never fails, import falls back to
//! `browser_source` for source types it does not recognize.

mod document;
mod export;
mod import;
mod source_kind;

#[cfg(test)]
mod export_tests;

pub use document::*;
pub use export::scene_to_obs;
pub use import::{scene_from_obs, unrecognized_source_types};
pub use source_kind::{element_type_from_obs, obs_source_type, FALLBACK_ELEMENT_TYPE};
