use serde::{Deserialize, Serialize};

use crate::catalog::ITALIC_SUFFIX;

/// The font the user has picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub family: String,
    /// A variant key or bare weight, e.g. `"400"` or `"700italic"`.
    pub weight: String,
    pub italic: bool,
}

impl Selection {
    pub fn new(family: impl Into<String>, weight: impl Into<String>, italic: bool) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            italic,
        }
    }

    /// The CSS values to put on the text area for this selection.
    pub fn style(&self) -> FontStyle {
        FontStyle {
            family: self.family.clone(),
            weight: self.weight.replace(ITALIC_SUFFIX, ""),
            italic: self.italic,
        }
    }
}

/// Everything that survives a page reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub content: String,
    pub selection: Option<Selection>,
}

impl EditorState {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.selection.is_none()
    }

    /// Parses the stored record. Anything unreadable counts as no state.
    pub fn from_json(text: &str) -> Option<Self> {
        serde_json::from_str::<StoredState>(text).ok().map(Self::from)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&StoredState::from(self))
    }
}

/// Record layout in the durable store. An empty `fontFamily` means no font
/// was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub content: String,
    pub font_family: String,
    pub font_weight: String,
    pub is_italic: bool,
}

impl From<&EditorState> for StoredState {
    fn from(state: &EditorState) -> Self {
        match &state.selection {
            Some(selection) => Self {
                content: state.content.clone(),
                font_family: selection.family.clone(),
                font_weight: selection.weight.clone(),
                is_italic: selection.italic,
            },
            None => Self {
                content: state.content.clone(),
                ..Self::default()
            },
        }
    }
}

impl From<StoredState> for EditorState {
    fn from(stored: StoredState) -> Self {
        let selection = (!stored.font_family.is_empty()).then(|| Selection {
            family: stored.font_family,
            weight: stored.font_weight,
            italic: stored.is_italic,
        });
        Self {
            content: stored.content,
            selection,
        }
    }
}

/// CSS font properties applied to the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStyle {
    pub family: String,
    /// Numeric weight with any italic suffix removed.
    pub weight: String,
    pub italic: bool,
}

impl FontStyle {
    pub fn css_style(&self) -> &'static str {
        if self.italic {
            "italic"
        } else {
            "normal"
        }
    }
}

/// A remote face to fetch and register under `family` before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRequest {
    pub family: String,
    pub url: String,
}

impl FontFaceRequest {
    /// The `src` descriptor handed to the browser's `FontFace`.
    pub fn source(&self) -> String {
        format!("url({})", self.url)
    }
}
