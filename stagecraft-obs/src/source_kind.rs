use stagecraft_model::ElementType;

/// Element type assigned to imported sources whose OBS type is not known.
pub const FALLBACK_ELEMENT_TYPE: ElementType = ElementType::BrowserSource;

/// OBS source id an element type is exported as. Types this version does not
/// know are written out unchanged.
pub fn obs_source_type(kind: &ElementType) -> &str {
    match kind {
        ElementType::BrowserSource => "browser_source",
        ElementType::Text => "text_gdiplus_v2",
        ElementType::Image => "image_source",
        ElementType::GameCapture => "game_capture",
        ElementType::WindowCapture => "window_capture",
        ElementType::DisplayCapture => "monitor_capture",
        ElementType::AudioCapture => "wasapi_input_capture",
        ElementType::VideoCapture => "dshow_input",
        ElementType::ColorSource => "color_source",
        ElementType::MediaSource => "ffmpeg_source",
        ElementType::Other(name) => name.as_ref(),
    }
}

/// Element type of an OBS source id, `None` when the id is not recognized.
///
/// Not an inverse of [`obs_source_type`]: the GDI+ and FreeType text sources
/// both become `text`, WASAPI input and output capture both become
/// `audio_capture`.
pub fn element_type_from_obs(source_type: &str) -> Option<ElementType> {
    let kind = match source_type {
        "browser_source" => ElementType::BrowserSource,
        "text_gdiplus_v2" | "text_ft2_source_v2" => ElementType::Text,
        "image_source" => ElementType::Image,
        "game_capture" => ElementType::GameCapture,
        "window_capture" => ElementType::WindowCapture,
        "monitor_capture" => ElementType::DisplayCapture,
        "wasapi_input_capture" | "wasapi_output_capture" => ElementType::AudioCapture,
        "dshow_input" => ElementType::VideoCapture,
        "color_source" => ElementType::ColorSource,
        "ffmpeg_source" => ElementType::MediaSource,
        _ => return None,
    };
    Some(kind)
}
