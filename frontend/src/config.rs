use shared::LuckyDrawConfig;
use web_sys::window;

pub const CONFIG_ELEMENT_ID: &str = "lucky-draw-config";

// Reads `<script id="lucky-draw-config" type="application/json">` if the page has one
pub fn load_config() -> LuckyDrawConfig {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    parse_config(raw.as_deref())
}

pub fn parse_config(raw: Option<&str>) -> LuckyDrawConfig {
    match raw.map(str::trim) {
        Some(json) if !json.is_empty() => match LuckyDrawConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring page lucky draw config: {}", e);
                LuckyDrawConfig::default()
            }
        },
        _ => LuckyDrawConfig::default(),
    }
}
