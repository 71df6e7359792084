use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::models::PropertyDocument;

/// Where the property document comes from.
///
/// `load` is idempotent: the first call fetches, every later call returns the
/// same outcome, failures included.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> Result<Arc<PropertyDocument>, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Shared header/footer markup spliced into every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Header,
    Footer,
}

impl Fragment {
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

#[async_trait]
pub trait FragmentLoader: Send + Sync {
    async fn load(&self, fragment: Fragment) -> Result<String, LoadError>;
}
