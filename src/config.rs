use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::LoadError;
use crate::source::http::build_client;
use crate::source::types::{DATA_PATH, FOOTER_PATH, HEADER_PATH, USER_AGENT};
use crate::source::{
    DataSource, FileFragments, FileSource, FragmentLoader, FragmentPaths, HttpFragments,
    HttpSource,
};

/// Where a site and its shared pieces live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site root: an http(s) URL or a local directory
    pub site: String,
    /// Property document, relative to the site root
    pub data_path: String,
    /// Header fragment, relative to the site root
    pub header_path: String,
    /// Footer fragment, relative to the site root
    pub footer_path: String,
    /// User agent for HTTP fetches
    pub user_agent: Option<String>,
    /// Request timeout in seconds (HTTP only)
    pub timeout_secs: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: ".".to_string(),
            data_path: DATA_PATH.to_string(),
            header_path: HEADER_PATH.to_string(),
            footer_path: FOOTER_PATH.to_string(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

/// A parsed site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Remote(Url),
    Local(PathBuf),
}

impl SiteRoot {
    pub fn parse(site: &str) -> Result<Self, LoadError> {
        if site.starts_with("http://") || site.starts_with("https://") {
            let mut url = Url::parse(site).map_err(|e| LoadError::Fetch(e.to_string()))?;
            // Relative joins resolve against the last path segment otherwise.
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Local(PathBuf::from(site)))
        }
    }
}

impl SiteConfig {
    /// Read a JSON config file; absent keys keep their defaults.
    pub async fn from_file(path: &Path) -> Result<Self, LoadError> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn root(&self) -> Result<SiteRoot, LoadError> {
        SiteRoot::parse(&self.site)
    }

    pub fn fragment_paths(&self) -> FragmentPaths {
        FragmentPaths {
            header: self.header_path.clone(),
            footer: self.footer_path.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(USER_AGENT)
    }

    /// The document source and fragment loader for this site.
    pub fn sources(&self) -> Result<(Box<dyn DataSource>, Box<dyn FragmentLoader>), LoadError> {
        match self.root()? {
            SiteRoot::Remote(base) => {
                let client = build_client(self.user_agent(), self.timeout())?;
                let data_url = base
                    .join(&self.data_path)
                    .map_err(|e| LoadError::Fetch(e.to_string()))?;
                debug!("Remote site {}, document at {}", base, data_url);
                Ok((
                    Box::new(HttpSource::with_client(client.clone(), data_url)),
                    Box::new(HttpFragments::new(client, base, self.fragment_paths())),
                ))
            }
            SiteRoot::Local(root) => {
                debug!("Local site {}", root.display());
                Ok((
                    Box::new(FileSource::new(root.join(&self.data_path))),
                    Box::new(FileFragments::new(root, self.fragment_paths())),
                ))
            }
        }
    }
}
