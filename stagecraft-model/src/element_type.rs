use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::Properties;

/// Kind of a scene element.
///
/// `Other` only appears when a stored document names a type this version
/// does not know. It is kept verbatim so the document can still be loaded
/// and exported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    BrowserSource,
    Text,
    Image,
    GameCapture,
    WindowCapture,
    DisplayCapture,
    AudioCapture,
    VideoCapture,
    ColorSource,
    MediaSource,
    Other(Arc<str>),
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::BrowserSource,
        ElementType::Text,
        ElementType::Image,
        ElementType::GameCapture,
        ElementType::WindowCapture,
        ElementType::DisplayCapture,
        ElementType::AudioCapture,
        ElementType::VideoCapture,
        ElementType::ColorSource,
        ElementType::MediaSource,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ElementType::BrowserSource => "browser_source",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::GameCapture => "game_capture",
            ElementType::WindowCapture => "window_capture",
            ElementType::DisplayCapture => "display_capture",
            ElementType::AudioCapture => "audio_capture",
            ElementType::VideoCapture => "video_capture",
            ElementType::ColorSource => "color_source",
            ElementType::MediaSource => "media_source",
            ElementType::Other(name) => name.as_ref(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ElementType::Other(_))
    }

    /// Settings a freshly added element of this type starts with.
    pub fn default_properties(&self) -> Properties {
        let value = match self {
            ElementType::BrowserSource => json!({
                "url": "",
                "width": 1920,
                "height": 1080,
                "fps": 30,
                "css": "",
            }),
            ElementType::Text => json!({
                "text": "Sample Text",
                "font": {
                    "face": "Arial",
                    "size": 32,
                    "flags": 0,
                    "style": "",
                },
                "color": 0xffffff,
            }),
            ElementType::Image => json!({
                "file": "",
                "unload": false,
            }),
            ElementType::ColorSource => json!({
                "color": 0xff00ff,
            }),
            _ => return Properties::new(),
        };
        match value {
            serde_json::Value::Object(map) => map,
            _ => Properties::new(),
        }
    }
}

impl From<&str> for ElementType {
    fn from(value: &str) -> Self {
        ElementType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or_else(|| ElementType::Other(value.into()))
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_name() {
        for kind in ElementType::ALL {
            assert_eq!(ElementType::from(kind.as_str()), kind);
        }
    }

    #[test]
    fn keeps_unknown_names_verbatim() {
        let kind = ElementType::from("vlc_source");
        assert_eq!(kind, ElementType::Other("vlc_source".into()));
        assert_eq!(kind.as_str(), "vlc_source");
        assert!(!kind.is_known());

        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"vlc_source\"");
    }

    #[test]
    fn text_defaults() {
        let properties = ElementType::Text.default_properties();
        assert_eq!(properties["text"], "Sample Text");
        assert_eq!(properties["font"]["face"], "Arial");
        assert_eq!(properties["color"], 0xffffff);
        assert!(ElementType::AudioCapture.default_properties().is_empty());
    }
}
