use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Document, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use super::describe;
use crate::{config::EditorConfig, ports::EditorSurface, state::FontStyle};

/// The editor page's form controls.
pub struct DomSurface {
    family_select: HtmlSelectElement,
    weight_select: HtmlSelectElement,
    italic_toggle: HtmlInputElement,
    editor: HtmlTextAreaElement,
}

/// Looks up `#id` and checks it is the expected kind of element.
pub(crate) fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

impl DomSurface {
    pub fn find(document: &Document, config: &EditorConfig) -> Result<Self, JsValue> {
        Ok(Self {
            family_select: element(document, &config.font_family_id)?,
            weight_select: element(document, &config.font_weight_id)?,
            italic_toggle: element(document, &config.italic_toggle_id)?,
            editor: element(document, &config.editor_id)?,
        })
    }

    pub fn family_select(&self) -> &HtmlSelectElement {
        &self.family_select
    }

    pub fn weight_select(&self) -> &HtmlSelectElement {
        &self.weight_select
    }

    pub fn italic_toggle(&self) -> &HtmlInputElement {
        &self.italic_toggle
    }

    pub fn editor(&self) -> &HtmlTextAreaElement {
        &self.editor
    }

    pub fn content(&self) -> String {
        self.editor.value()
    }

    fn fill(select: &HtmlSelectElement, values: &[String]) {
        select.set_inner_html("");
        for value in values {
            let added = HtmlOptionElement::new_with_text_and_value(value, value)
                .and_then(|option| select.append_child(&option));
            if let Err(err) = added {
                warn!("Could not add option `{value}`: {}", describe(&err));
            }
        }
    }

    fn style(&self) -> CssStyleDeclaration {
        self.editor.style()
    }
}

impl EditorSurface for DomSurface {
    fn show_families(&self, families: &[String]) {
        Self::fill(&self.family_select, families);
    }

    fn show_variants(&self, variants: &[String]) {
        Self::fill(&self.weight_select, variants);
    }

    fn select_family(&self, family: Option<&str>) {
        self.family_select.set_value(family.unwrap_or_default());
    }

    fn select_weight(&self, weight: Option<&str>) {
        self.weight_select.set_value(weight.unwrap_or_default());
    }

    fn set_italic(&self, italic: bool) {
        self.italic_toggle.set_checked(italic);
    }

    fn set_content(&self, content: &str) {
        self.editor.set_value(content);
    }

    fn apply_style(&self, style: Option<&FontStyle>) {
        let css = self.style();
        let result = match style {
            Some(style) => css
                .set_property("font-family", &style.family)
                .and_then(|_| css.set_property("font-weight", &style.weight))
                .and_then(|_| css.set_property("font-style", style.css_style())),
            None => css
                .remove_property("font-family")
                .and_then(|_| css.remove_property("font-weight"))
                .and_then(|_| css.remove_property("font-style"))
                .map(drop),
        };
        if let Err(err) = result {
            warn!("Could not style the editor: {}", describe(&err));
        }
    }
}
