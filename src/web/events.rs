use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, EventTarget, HtmlElement};

use super::{dom::element, DomSurface};
use crate::{
    config::EditorConfig,
    manager::FontManager,
    ports::{CatalogProvider, FontLoader, StateStore},
};

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // The listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Connects each control on the page to one manager operation.
pub fn bind_events<P, L, S>(
    manager: &Rc<FontManager<P, L, S, DomSurface>>,
    document: &Document,
    config: &EditorConfig,
) -> Result<(), JsValue>
where
    P: CatalogProvider + 'static,
    L: FontLoader + 'static,
    S: StateStore + 'static,
{
    let surface = manager.surface();

    let m = manager.clone();
    listen(surface.family_select(), "change", move || {
        let m = m.clone();
        let family = m.surface().family_select().value();
        spawn_local(async move {
            m.select_family(&family).await;
        });
    })?;

    let m = manager.clone();
    listen(surface.weight_select(), "change", move || {
        let m = m.clone();
        let weight = m.surface().weight_select().value();
        spawn_local(async move {
            m.select_weight(&weight).await;
        });
    })?;

    let m = manager.clone();
    listen(surface.italic_toggle(), "change", move || {
        let m = m.clone();
        let italic = m.surface().italic_toggle().checked();
        spawn_local(async move {
            m.set_italic(italic).await;
        });
    })?;

    let m = manager.clone();
    listen(surface.editor(), "input", move || {
        m.edit(&m.surface().content());
    })?;

    let save_button: HtmlElement = element(document, &config.save_button_id)?;
    let m = manager.clone();
    listen(&save_button, "click", move || m.save())?;

    let reset_button: HtmlElement = element(document, &config.reset_button_id)?;
    let m = manager.clone();
    listen(&reset_button, "click", move || m.reset_state())?;

    Ok(())
}
