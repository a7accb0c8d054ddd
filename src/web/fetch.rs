use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::describe;
use crate::{catalog::FontCatalog, error::CatalogError, ports::CatalogProvider};

/// Fetches the catalog JSON with the page's `fetch`.
pub struct HttpCatalog {
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn network_error(err: JsValue) -> CatalogError {
    CatalogError::Unreachable(describe(&err))
}

#[async_trait(?Send)]
impl CatalogProvider for HttpCatalog {
    async fn fetch_catalog(&self) -> Result<FontCatalog, CatalogError> {
        let window =
            web_sys::window().ok_or_else(|| CatalogError::Unreachable("no window".to_owned()))?;

        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(network_error)?
            .dyn_into::<Response>()
            .map_err(network_error)?;
        if !response.ok() {
            return Err(CatalogError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?;
        let text = body
            .as_string()
            .ok_or_else(|| CatalogError::Json("response body is not text".to_owned()))?;
        FontCatalog::from_json(&text)
    }
}
