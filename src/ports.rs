//! Seams between the font manager and the world around it.
//!
//! Everything runs on the browser's single thread, so none of these need to
//! be `Send`.

use async_trait::async_trait;

use crate::{
    catalog::FontCatalog,
    error::{CatalogError, FontLoadError, StoreError},
    state::{FontFaceRequest, FontStyle},
};

/// Where the font catalog comes from.
#[async_trait(?Send)]
pub trait CatalogProvider {
    async fn fetch_catalog(&self) -> Result<FontCatalog, CatalogError>;
}

/// Fetches a remote font face and makes it available under its family name.
#[async_trait(?Send)]
pub trait FontLoader {
    async fn load(&self, face: &FontFaceRequest) -> Result<(), FontLoadError>;
}

/// A single key-value slot that outlives the page.
pub trait StateStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, value: &str) -> Result<(), StoreError>;
    fn remove(&self) -> Result<(), StoreError>;
}

/// The widgets the manager drives.
///
/// Implementations own their interior mutability; the manager only ever
/// holds a shared reference.
pub trait EditorSurface {
    fn show_families(&self, families: &[String]);
    fn show_variants(&self, variants: &[String]);
    fn select_family(&self, family: Option<&str>);
    fn select_weight(&self, weight: Option<&str>);
    fn set_italic(&self, italic: bool);
    fn set_content(&self, content: &str);
    /// `None` restores the platform default font.
    fn apply_style(&self, style: Option<&FontStyle>);
}
