use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::FontFace;

use super::describe;
use crate::{error::FontLoadError, ports::FontLoader, state::FontFaceRequest};

/// Loads faces through the CSS Font Loading API and adds them to
/// `document.fonts`, so the text area can refer to them by family name.
pub struct DocumentFontLoader;

#[async_trait(?Send)]
impl FontLoader for DocumentFontLoader {
    async fn load(&self, face: &FontFaceRequest) -> Result<(), FontLoadError> {
        let failed = |err: JsValue| FontLoadError {
            family: face.family.clone(),
            url: face.url.clone(),
            reason: describe(&err),
        };

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| failed(JsValue::from_str("no document")))?;

        let font = FontFace::new_with_str(&face.family, &face.source()).map_err(failed)?;
        let loaded = JsFuture::from(font.load().map_err(failed)?)
            .await
            .map_err(failed)?
            .dyn_into::<FontFace>()
            .map_err(failed)?;
        document.fonts().add(&loaded).map_err(failed)?;
        Ok(())
    }
}
