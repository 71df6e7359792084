use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::traits::{DataSource, Fragment, FragmentLoader};
use super::types::FragmentPaths;
use crate::error::LoadError;
use crate::models::PropertyDocument;

/// Reads the property document from a local site checkout.
pub struct FileSource {
    path: PathBuf,
    cached: OnceCell<Result<Arc<PropertyDocument>, LoadError>>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Arc<PropertyDocument>, LoadError> {
        info!("Loading property document from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        debug!("Read {} bytes", text.len());
        Ok(Arc::new(PropertyDocument::from_json(&text)?))
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn load(&self) -> Result<Arc<PropertyDocument>, LoadError> {
        self.cached.get_or_init(|| self.read()).await.clone()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Header/footer markup from a local site directory.
pub struct FileFragments {
    root: PathBuf,
    paths: FragmentPaths,
}

impl FileFragments {
    pub fn new(root: impl Into<PathBuf>, paths: FragmentPaths) -> Self {
        Self {
            root: root.into(),
            paths,
        }
    }
}

#[async_trait]
impl FragmentLoader for FileFragments {
    async fn load(&self, fragment: Fragment) -> Result<String, LoadError> {
        let path = self.root.join(self.paths.get(fragment));
        debug!("Reading {} fragment from {}", fragment.name(), path.display());
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
