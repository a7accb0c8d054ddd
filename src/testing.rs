//! In-memory stand-ins for the browser, used by unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use async_trait::async_trait;

use crate::{
    catalog::FontCatalog,
    error::{CatalogError, FontLoadError, StoreError},
    ports::{CatalogProvider, EditorSurface, FontLoader, StateStore},
    state::{FontFaceRequest, FontStyle},
};

pub struct StaticCatalog(Result<FontCatalog, CatalogError>);

impl StaticCatalog {
    pub fn json(text: &str) -> Self {
        Self(FontCatalog::from_json(text))
    }

    pub fn failing(err: CatalogError) -> Self {
        Self(Err(err))
    }
}

#[async_trait(?Send)]
impl CatalogProvider for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<FontCatalog, CatalogError> {
        self.0.clone()
    }
}

/// Succeeds for every URL except those marked with [`ScriptedLoader::fail`].
#[derive(Default)]
pub struct ScriptedLoader {
    failures: RefCell<HashMap<String, String>>,
    requests: RefCell<Vec<FontFaceRequest>>,
}

impl ScriptedLoader {
    pub fn fail(&self, url: &str, reason: &str) {
        self.failures
            .borrow_mut()
            .insert(url.to_owned(), reason.to_owned());
    }

    pub fn requests(&self) -> Vec<FontFaceRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FontLoader for ScriptedLoader {
    async fn load(&self, face: &FontFaceRequest) -> Result<(), FontLoadError> {
        self.requests.borrow_mut().push(face.clone());
        match self.failures.borrow().get(&face.url) {
            Some(reason) => Err(FontLoadError {
                family: face.family.clone(),
                url: face.url.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
    pub writes: Cell<usize>,
    pub fail_writes: Cell<bool>,
    /// Every call fails, as when the browser blocks storage.
    pub unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn with(value: &str) -> Self {
        Self {
            slot: RefCell::new(Some(value.to_owned())),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.get() {
            return Err(StoreError::Unavailable("storage blocked".to_owned()));
        }
        Ok(())
    }
}

/// Copies the stored value, as a second page load would see it.
impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            slot: RefCell::new(self.contents()),
            ..Self::default()
        }
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.contents())
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        self.check()?;
        if self.fail_writes.get() {
            return Err(StoreError::Write("quota exceeded".to_owned()));
        }
        self.writes.set(self.writes.get() + 1);
        *self.slot.borrow_mut() = Some(value.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.check()?;
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// Remembers what the widgets were last told to show.
#[derive(Default)]
pub struct RecordingSurface {
    pub families: RefCell<Vec<String>>,
    pub variants: RefCell<Vec<String>>,
    pub family: RefCell<Option<String>>,
    pub weight: RefCell<Option<String>>,
    pub italic: Cell<bool>,
    pub content: RefCell<String>,
    pub style: RefCell<Option<FontStyle>>,
    pub styles_applied: Cell<usize>,
}

impl RecordingSurface {
    pub fn clear_history(&self) {
        self.styles_applied.set(0);
    }
}

impl EditorSurface for RecordingSurface {
    fn show_families(&self, families: &[String]) {
        *self.families.borrow_mut() = families.to_vec();
    }

    fn show_variants(&self, variants: &[String]) {
        *self.variants.borrow_mut() = variants.to_vec();
    }

    fn select_family(&self, family: Option<&str>) {
        *self.family.borrow_mut() = family.map(str::to_owned);
    }

    fn select_weight(&self, weight: Option<&str>) {
        *self.weight.borrow_mut() = weight.map(str::to_owned);
    }

    fn set_italic(&self, italic: bool) {
        self.italic.set(italic);
    }

    fn set_content(&self, content: &str) {
        *self.content.borrow_mut() = content.to_owned();
    }

    fn apply_style(&self, style: Option<&FontStyle>) {
        self.styles_applied.set(self.styles_applied.get() + 1);
        *self.style.borrow_mut() = style.cloned();
    }
}
