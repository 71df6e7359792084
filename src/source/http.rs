use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::traits::{DataSource, Fragment, FragmentLoader};
use super::types::{FragmentPaths, USER_AGENT};
use crate::error::LoadError;
use crate::models::PropertyDocument;

/// Build the shared HTTP client. No timeout unless one is configured.
pub fn build_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, LoadError> {
    let mut builder = Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

async fn get_text(client: &Client, url: &Url) -> Result<String, LoadError> {
    debug!("Fetching URL: {}", url);

    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        warn!("{} returned status: {}", url, response.status());
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await?;
    debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Fetches the property document over HTTP, once per session.
pub struct HttpSource {
    client: Client,
    url: Url,
    cached: OnceCell<Result<Arc<PropertyDocument>, LoadError>>,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self, LoadError> {
        Ok(Self::with_client(build_client(USER_AGENT, None)?, url))
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            cached: OnceCell::new(),
        }
    }

    async fn fetch(&self) -> Result<Arc<PropertyDocument>, LoadError> {
        info!("Loading property document from {}", self.url);
        let body = get_text(&self.client, &self.url).await?;
        let document = PropertyDocument::from_json(&body)?;
        info!(
            "Loaded property document: {} rooms, {} facilities",
            document.rooms.len(),
            document.facilities().len()
        );
        Ok(Arc::new(document))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn load(&self) -> Result<Arc<PropertyDocument>, LoadError> {
        self.cached.get_or_init(|| self.fetch()).await.clone()
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Header/footer markup served next to the pages.
pub struct HttpFragments {
    client: Client,
    base: Url,
    paths: FragmentPaths,
}

impl HttpFragments {
    pub fn new(client: Client, base: Url, paths: FragmentPaths) -> Self {
        Self {
            client,
            base,
            paths,
        }
    }
}

#[async_trait]
impl FragmentLoader for HttpFragments {
    async fn load(&self, fragment: Fragment) -> Result<String, LoadError> {
        let url = self
            .base
            .join(self.paths.get(fragment))
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        get_text(&self.client, &url).await
    }
}
