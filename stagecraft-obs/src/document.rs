use serde::{Deserialize, Serialize};
use stagecraft_model::{ALIGN_TOP_LEFT, Properties};

/// Scene as stored in an OBS scene collection. Field order matches the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsDocument {
    #[serde(default)]
    pub name: String,
    /// Bottom layer first.
    #[serde(default)]
    pub sources: Vec<ObsSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(default)]
    pub settings: Properties,
    #[serde(default)]
    pub filters: Vec<ObsFilter>,
    #[serde(default)]
    pub transform: ObsTransform,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsFilter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub filter_type: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObsTransform {
    pub pos: ObsVec2,
    /// Degrees.
    pub rot: f64,
    pub scale: ObsVec2,
    pub alignment: i32,
    pub bounds_type: i32,
    pub bounds_alignment: i32,
    pub bounds: ObsVec2,
}

impl Default for ObsTransform {
    fn default() -> Self {
        Self {
            pos: ObsVec2::default(),
            rot: 0.0,
            scale: ObsVec2 { x: 1.0, y: 1.0 },
            alignment: ALIGN_TOP_LEFT,
            bounds_type: 0,
            bounds_alignment: 0,
            bounds: ObsVec2::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObsVec2 {
    pub x: f64,
    pub y: f64,
}

fn default_true() -> bool {
    true
}

impl ObsDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Pretty printed with 2-space indentation.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
