use thiserror::Error;

/// Why the font catalog could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog source unreachable: {0}")]
    Unreachable(String),

    #[error("catalog source answered with status {0}")]
    Status(u16),

    #[error("catalog is not valid JSON: {0}")]
    Json(String),

    #[error("catalog entry `{0}` is not a mapping of variant keys to URLs")]
    Shape(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load font `{family}` from {url}: {reason}")]
pub struct FontLoadError {
    pub family: String,
    pub url: String,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write rejected: {0}")]
    Write(String),
}
