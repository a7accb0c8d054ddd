use std::cell::{Cell, Ref, RefCell};

use log::{debug, error, info, warn};

use crate::{
    catalog::FontCatalog,
    error::FontLoadError,
    ports::{CatalogProvider, EditorSurface, FontLoader, StateStore},
    state::{EditorState, FontFaceRequest, Selection},
};

/// Where an editor session is in its lifecycle.
///
/// Font loads run alongside any of these; see
/// [`FontManager::pending_font_loads`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    CatalogLoading,
    CatalogLoaded,
    Editing,
}

/// What happened when a font was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOutcome {
    /// The remote face loaded and the text area now uses it.
    Loaded { url: String },
    /// No variant matched, the family was applied by name only.
    ByName,
    /// The remote face failed to load, the family was applied by name.
    LoadFailed(FontLoadError),
    /// Nothing to apply: no selection, or a family the catalog lacks.
    Skipped,
}

#[derive(Debug, Default)]
struct Session {
    content: String,
    family: Option<String>,
    weight: Option<String>,
    italic: bool,
}

impl Session {
    fn selection(&self) -> Option<Selection> {
        Some(Selection::new(
            self.family.clone()?,
            self.weight.clone()?,
            self.italic,
        ))
    }

    fn snapshot(&self) -> EditorState {
        EditorState {
            content: self.content.clone(),
            selection: self.selection(),
        }
    }
}

/// Owns the font catalog and keeps the surface, the loaded fonts and the
/// durable store in step with the user's choices.
///
/// Every operation takes `&self` so one manager can be shared between event
/// handlers on the browser thread. No `RefCell` borrow is held across an
/// `.await`, so handlers may interleave freely with in-flight font loads.
pub struct FontManager<P, L, S, U> {
    provider: P,
    loader: L,
    store: S,
    surface: U,
    catalog: RefCell<FontCatalog>,
    session: RefCell<Session>,
    phase: Cell<SessionPhase>,
    pending_loads: Cell<usize>,
}

impl<P, L, S, U> FontManager<P, L, S, U>
where
    P: CatalogProvider,
    L: FontLoader,
    S: StateStore,
    U: EditorSurface,
{
    pub fn new(provider: P, loader: L, store: S, surface: U) -> Self {
        Self {
            provider,
            loader,
            store,
            surface,
            catalog: RefCell::new(FontCatalog::new()),
            session: RefCell::default(),
            phase: Cell::new(SessionPhase::Uninitialized),
            pending_loads: Cell::new(0),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    /// Number of remote font loads that have not completed yet.
    pub fn pending_font_loads(&self) -> usize {
        self.pending_loads.get()
    }

    pub fn catalog(&self) -> Ref<'_, FontCatalog> {
        self.catalog.borrow()
    }

    pub fn state(&self) -> EditorState {
        self.session.borrow().snapshot()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.session.borrow().selection()
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the catalog, then restores whatever the last session left
    /// behind. The catalog must be in place before the saved family can be
    /// matched against it.
    pub async fn start(&self) {
        self.load_catalog().await;
        self.load_state().await;
    }

    /// Fetches the catalog and selects its first family.
    ///
    /// A failed fetch leaves an empty catalog; editing keeps working without
    /// any selectable fonts.
    pub async fn load_catalog(&self) -> FontOutcome {
        self.install_catalog().await;
        self.select_default().await
    }

    /// Fetches the catalog again, keeping the current selection if its
    /// family is still offered.
    pub async fn reload_catalog(&self) -> FontOutcome {
        let previous = self.selection();
        self.install_catalog().await;

        let kept = previous.filter(|s| self.catalog.borrow().family(&s.family).is_some());
        match kept {
            Some(selection) => self.restore_selection(selection).await,
            None => self.select_default().await,
        }
    }

    async fn install_catalog(&self) {
        let resumed = self.phase.get() == SessionPhase::Editing;
        self.phase.set(SessionPhase::CatalogLoading);

        let catalog = match self.provider.fetch_catalog().await {
            Ok(catalog) => {
                info!("Loaded font catalog with {} families", catalog.len());
                catalog
            }
            Err(err) => {
                error!("Error fetching font data: {err}");
                FontCatalog::new()
            }
        };
        let families = catalog.family_names();
        *self.catalog.borrow_mut() = catalog;

        self.phase.set(if resumed {
            SessionPhase::Editing
        } else {
            SessionPhase::CatalogLoaded
        });
        self.surface.show_families(&families);
    }

    async fn select_default(&self) -> FontOutcome {
        let first = self.catalog.borrow().first_family().map(|f| f.name().to_owned());
        match first {
            Some(family) => {
                let italic = self.session.borrow().italic;
                self.show_family(&family, None, italic).await
            }
            None => {
                self.clear_selection();
                FontOutcome::Skipped
            }
        }
    }

    /// Variant keys of `family` in catalog order, or nothing when the
    /// catalog does not know it.
    pub fn list_variants(&self, family: &str) -> Vec<String> {
        match self.catalog.borrow().family(family) {
            Some(found) => found.variant_keys().map(str::to_owned).collect(),
            None => {
                warn!("Selected font `{family}` does not have data or variants");
                Vec::new()
            }
        }
    }

    pub fn resolve_font_url(&self, family: &str, weight: &str, italic: bool) -> Option<String> {
        self.catalog
            .borrow()
            .resolve_url(family, weight, italic)
            .map(str::to_owned)
    }

    /// Loads the matching remote face, if any, then styles the text area.
    ///
    /// A missing or broken face never blocks editing: the family is applied
    /// by name and the browser falls back to a local font or its default.
    /// Concurrent calls are not cancelled, the last one to finish decides
    /// what the text area shows.
    pub async fn apply_font(&self, family: &str, weight: &str, italic: bool) -> FontOutcome {
        let url = {
            let catalog = self.catalog.borrow();
            let Some(found) = catalog.family(family) else {
                warn!("Cannot apply font `{family}`, it is not in the catalog");
                return FontOutcome::Skipped;
            };
            found.resolve_url(weight, italic).map(str::to_owned)
        };
        let style = Selection::new(family, weight, italic).style();

        let Some(url) = url else {
            debug!("No `{weight}` variant for `{family}`, applying it by name");
            self.surface.apply_style(Some(&style));
            return FontOutcome::ByName;
        };

        let face = FontFaceRequest {
            family: family.to_owned(),
            url,
        };
        self.pending_loads.set(self.pending_loads.get() + 1);
        let loaded = self.loader.load(&face).await;
        self.pending_loads.set(self.pending_loads.get().saturating_sub(1));

        self.surface.apply_style(Some(&style));
        match loaded {
            Ok(()) => {
                debug!("Applied `{family}` {weight} from {}", face.url);
                FontOutcome::Loaded { url: face.url }
            }
            Err(err) => {
                error!("Error loading font: {err}");
                FontOutcome::LoadFailed(err)
            }
        }
    }

    async fn apply_selection(&self) -> FontOutcome {
        match self.selection() {
            Some(s) => self.apply_font(&s.family, &s.weight, s.italic).await,
            None => FontOutcome::Skipped,
        }
    }

    /// The family selector changed: list its variants, pick the first one
    /// and apply it. Unknown families are ignored.
    pub async fn select_family(&self, family: &str) -> FontOutcome {
        let italic = self.session.borrow().italic;
        let outcome = self.show_family(family, None, italic).await;
        if outcome != FontOutcome::Skipped {
            self.touch();
        }
        outcome
    }

    pub async fn select_weight(&self, weight: &str) -> FontOutcome {
        {
            let mut session = self.session.borrow_mut();
            if session.family.is_none() {
                debug!("Ignoring weight `{weight}` without a font family");
                return FontOutcome::Skipped;
            }
            session.weight = Some(weight.to_owned());
        }
        self.surface.select_weight(Some(weight));
        self.touch();
        self.apply_selection().await
    }

    pub async fn set_italic(&self, italic: bool) -> FontOutcome {
        self.session.borrow_mut().italic = italic;
        self.surface.set_italic(italic);
        self.touch();
        self.apply_selection().await
    }

    /// The text changed. Saves right away; every keystroke rewrites the
    /// stored record.
    pub fn edit(&self, content: &str) {
        self.session.borrow_mut().content = content.to_owned();
        self.touch();
    }

    pub fn save(&self) {
        let state = self.state();
        self.persist_state(&state.content, state.selection.as_ref());
    }

    /// Replaces the stored record with `content` and `selection`.
    pub fn persist_state(&self, content: &str, selection: Option<&Selection>) {
        let state = EditorState {
            content: content.to_owned(),
            selection: selection.cloned(),
        };
        let written = state
            .to_json()
            .map_err(|err| err.to_string())
            .and_then(|json| self.store.write(&json).map_err(|err| err.to_string()));
        if let Err(err) = written {
            error!("Error saving editor state: {err}");
        }
    }

    /// Restores the stored record, if there is a readable one, and applies
    /// its font. Returns the restored state.
    pub async fn load_state(&self) -> Option<EditorState> {
        let saved = match self.store.read() {
            Ok(Some(text)) => EditorState::from_json(&text),
            Ok(None) => None,
            Err(err) => {
                debug!("Editor state unavailable: {err}");
                None
            }
        };
        let Some(saved) = saved else {
            debug!("No saved editor state");
            return None;
        };

        self.session.borrow_mut().content = saved.content.clone();
        self.surface.set_content(&saved.content);
        match &saved.selection {
            Some(selection) => {
                self.restore_selection(selection.clone()).await;
            }
            None => self.clear_selection(),
        }
        Some(saved)
    }

    /// Forgets the stored record and empties the editor. There is no undo.
    pub fn reset_state(&self) {
        if let Err(err) = self.store.remove() {
            error!("Error removing editor state: {err}");
        }
        self.session.borrow_mut().content.clear();
        self.surface.set_content("");
        self.clear_selection();
        if self.phase.get() == SessionPhase::Editing {
            self.phase.set(SessionPhase::CatalogLoaded);
        }
        info!("Editor state reset");
    }

    /// Brings back a saved selection as it was. A weight without a matching
    /// variant is kept and applied by name.
    async fn restore_selection(&self, selection: Selection) -> FontOutcome {
        let outcome = self
            .show_family(
                &selection.family,
                Some(selection.weight.as_str()),
                selection.italic,
            )
            .await;
        if outcome == FontOutcome::Skipped {
            self.clear_selection();
            self.session.borrow_mut().italic = selection.italic;
            self.surface.set_italic(selection.italic);
        }
        outcome
    }

    /// Points the surface at `family`, selecting `weight` or else the
    /// family's first variant, and applies the font.
    async fn show_family(&self, family: &str, weight: Option<&str>, italic: bool) -> FontOutcome {
        let variants = self.list_variants(family);
        let Some(first) = variants.first() else {
            return FontOutcome::Skipped;
        };
        let weight = weight.unwrap_or(first.as_str()).to_owned();

        {
            let mut session = self.session.borrow_mut();
            session.family = Some(family.to_owned());
            session.weight = Some(weight.clone());
            session.italic = italic;
        }
        self.surface.show_variants(&variants);
        self.surface.select_family(Some(family));
        self.surface.select_weight(Some(&weight));
        self.surface.set_italic(italic);

        self.apply_font(family, &weight, italic).await
    }

    fn clear_selection(&self) {
        {
            let mut session = self.session.borrow_mut();
            session.family = None;
            session.weight = None;
            session.italic = false;
        }
        self.surface.select_family(None);
        self.surface.show_variants(&[]);
        self.surface.select_weight(None);
        self.surface.set_italic(false);
        self.surface.apply_style(None);
    }

    /// A user change: enter the editing phase and auto-save.
    fn touch(&self) {
        if self.phase.get() == SessionPhase::CatalogLoaded {
            self.phase.set(SessionPhase::Editing);
        }
        self.save();
    }
}
