/// Failure to obtain the property document.
///
/// Cloneable so a memoized failure can be handed out on every later `load()`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch property document: {0}")]
    Fetch(String),

    #[error("property document request to {url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read property document: {0}")]
    Io(String),

    #[error("property document is not valid JSON: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors raised while projecting a document onto a page.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no {kind} with id '{id}'")]
    EntityNotFound { kind: &'static str, id: String },

    /// Expected content is absent. Steps treat this as "skip my writes".
    #[error("missing field: {0}")]
    MissingField(String),
}

impl MapError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
