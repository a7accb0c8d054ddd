use log::warn;
use serde_json::Value;

use crate::error::CatalogError;

/// Suffix that marks a variant key as the italic cut of a weight.
pub const ITALIC_SUFFIX: &str = "italic";

/// One downloadable cut of a family, e.g. `"700italic"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    name: String,
    /// Kept in source order.
    variants: Vec<Variant>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(key.into(), url.into());
        self
    }

    fn insert(&mut self, key: String, url: String) {
        match self.variants.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.url = url,
            None => self.variants.push(Variant { key, url }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant_keys(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.key.as_str())
    }

    pub fn url(&self, key: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.url.as_str())
    }

    /// Picks the URL for a weight, preferring the italic cut when asked for.
    ///
    /// Falls back to the upright cut when no `"{weight}italic"` key exists,
    /// and to nothing at all when the weight is unknown. Callers still apply
    /// the family by name in that case.
    pub fn resolve_url(&self, weight: &str, italic: bool) -> Option<&str> {
        if italic {
            if let Some(url) = self.url(&format!("{weight}{ITALIC_SUFFIX}")) {
                return Some(url);
            }
        }
        self.url(weight)
    }
}

/// Every family the editor can offer, in the order the source listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<FontFamily>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the `family -> variant key -> URL` document.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(entries) = value else {
            return Err(CatalogError::Shape("<root>".to_owned()));
        };

        let mut families = Vec::with_capacity(entries.len());
        for (name, variants) in entries {
            let Value::Object(variants) = variants else {
                return Err(CatalogError::Shape(name));
            };

            let mut family = FontFamily::new(name);
            for (key, url) in variants {
                match url {
                    Value::String(url) => family.insert(key, url),
                    _ => return Err(CatalogError::Shape(format!("{}.{key}", family.name))),
                }
            }

            if family.variants.is_empty() {
                warn!("Font `{}` has no variants, leaving it out", family.name);
                continue;
            }
            families.push(family);
        }

        Ok(Self { families })
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn families(&self) -> impl Iterator<Item = &FontFamily> {
        self.families.iter()
    }

    pub fn family_names(&self) -> Vec<String> {
        self.families.iter().map(|f| f.name.clone()).collect()
    }

    pub fn family(&self, name: &str) -> Option<&FontFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn first_family(&self) -> Option<&FontFamily> {
        self.families.first()
    }

    pub fn resolve_url(&self, family: &str, weight: &str, italic: bool) -> Option<&str> {
        self.family(family)?.resolve_url(weight, italic)
    }
}

impl FromIterator<FontFamily> for FontCatalog {
    fn from_iter<T: IntoIterator<Item = FontFamily>>(iter: T) -> Self {
        Self {
            families: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roboto() -> FontCatalog {
        FontCatalog::from_json(r#"{ "Roboto": {"400": "u1", "700italic": "u2"} }"#).unwrap()
    }

    #[test]
    fn italic_cut_is_preferred() {
        assert_eq!(roboto().resolve_url("Roboto", "700", true), Some("u2"));
    }

    #[test]
    fn upright_cut_is_used_when_no_italic_exists() {
        assert_eq!(roboto().resolve_url("Roboto", "400", true), Some("u1"));
        assert_eq!(roboto().resolve_url("Roboto", "400", false), Some("u1"));
    }

    #[test]
    fn unknown_weight_resolves_to_nothing() {
        assert_eq!(roboto().resolve_url("Roboto", "900", false), None);
        assert_eq!(roboto().resolve_url("Roboto", "700", false), None);
        assert_eq!(roboto().resolve_url("Lato", "400", false), None);
    }

    #[test]
    fn full_variant_key_resolves_to_itself() {
        assert_eq!(roboto().resolve_url("Roboto", "700italic", false), Some("u2"));
        assert_eq!(roboto().resolve_url("Roboto", "700italic", true), Some("u2"));
    }

    #[test]
    fn source_order_is_kept() {
        let catalog = FontCatalog::from_json(
            r#"{
                "Zilla Slab": {"700": "z7", "300": "z3", "300italic": "z3i"},
                "Abel": {"400": "a4"},
                "Merriweather": {"900italic": "m9i", "100": "m1"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            catalog.family_names(),
            vec!["Zilla Slab", "Abel", "Merriweather"]
        );
        let keys: Vec<_> = catalog.family("Zilla Slab").unwrap().variant_keys().collect();
        assert_eq!(keys, vec!["700", "300", "300italic"]);
        let keys: Vec<_> = catalog
            .family("Merriweather")
            .unwrap()
            .variant_keys()
            .collect();
        assert_eq!(keys, vec!["900italic", "100"]);
    }

    #[test]
    fn resolution_holds_for_every_family_and_weight() {
        let catalog = FontCatalog::from_json(
            r#"{
                "A": {"100": "a1", "100italic": "a1i", "400": "a4"},
                "B": {"300italic": "b3i", "500": "b5"}
            }"#,
        )
        .unwrap();

        for family in catalog.families() {
            for weight in ["100", "300", "400", "500", "900"] {
                let expected = family
                    .url(&format!("{weight}italic"))
                    .or_else(|| family.url(weight));
                assert_eq!(catalog.resolve_url(family.name(), weight, true), expected);
                assert_eq!(
                    catalog.resolve_url(family.name(), weight, false),
                    family.url(weight)
                );
            }
        }
    }

    #[test]
    fn families_without_variants_are_dropped() {
        let catalog = FontCatalog::from_json(r#"{"Empty": {}, "Abel": {"400": "a"}}"#).unwrap();
        assert_eq!(catalog.family_names(), vec!["Abel"]);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(matches!(
            FontCatalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
        assert_eq!(
            FontCatalog::from_json(r#"["Roboto"]"#),
            Err(CatalogError::Shape("<root>".to_owned()))
        );
        assert_eq!(
            FontCatalog::from_json(r#"{"Roboto": "u1"}"#),
            Err(CatalogError::Shape("Roboto".to_owned()))
        );
        assert_eq!(
            FontCatalog::from_json(r#"{"Roboto": {"400": 4}}"#),
            Err(CatalogError::Shape("Roboto.400".to_owned()))
        );
    }

    #[test]
    fn built_catalogs_match_parsed_ones() {
        let built: FontCatalog = [FontFamily::new("Roboto")
            .with_variant("400", "u1")
            .with_variant("700italic", "u2")]
        .into_iter()
        .collect();
        assert_eq!(built, roboto());
    }
}
