use std::future::Future;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::config::Settings;
use crate::error::FetchError;

/// Anything that can hand back the raw markup of a named page.
pub trait PageSource {
    fn fetch_page(&self, page: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Reads `index.php?action=raw&title=<page>` from a MediaWiki site.
pub struct WikiClient {
    client: Client,
    base_url: String,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: settings.wiki_url.clone(),
        })
    }

    fn raw_request(&self, page: &str) -> RequestBuilder {
        self.client
            .get(&self.base_url)
            .query(&[("action", "raw"), ("title", page)])
    }
}

impl PageSource for WikiClient {
    async fn fetch_page(&self, page: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            page: page.to_string(),
            source,
        };

        let response = self.raw_request(page).send().await.map_err(transport)?;
        let status = response.status();
        debug!(page, url = %response.url(), %status, "raw markup response");
        if !status.is_success() {
            return Err(FetchError::Status {
                page: page.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(page, bytes = body.len(), "raw markup received");
        Ok(body)
    }
}
