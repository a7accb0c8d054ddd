use log::LevelFilter;
use serde::Deserialize;

/// Settings handed over from JavaScript when the editor is created.
///
/// Every field is optional on the JavaScript side; missing ones fall back to
/// the markup the editor page ships with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Where the `family -> variant -> URL` catalog is fetched from.
    pub catalog_url: String,
    /// `localStorage` key of the saved editor state.
    pub storage_key: String,
    pub log_level: LevelFilter,
    pub font_family_id: String,
    pub font_weight_id: String,
    pub italic_toggle_id: String,
    pub editor_id: String,
    pub save_button_id: String,
    pub reset_button_id: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_url: "fonts.json".to_owned(),
            storage_key: "editorState".to_owned(),
            log_level: LevelFilter::Info,
            font_family_id: "font-family".to_owned(),
            font_weight_id: "font-weight".to_owned(),
            italic_toggle_id: "italic-toggle".to_owned(),
            editor_id: "editor".to_owned(),
            save_button_id: "save-btn".to_owned(),
            reset_button_id: "reset-btn".to_owned(),
        }
    }
}
