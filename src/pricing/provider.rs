use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::error::CatalogFetchError;

use super::resolver::parse_catalog;
use super::types::ModelPrice;

/// Anything that can produce a fresh model price catalog.
pub trait CatalogSource: Send + Sync {
    /// One attempt, no retries. Entries keep the order the source reports.
    fn fetch(&self) -> Result<Vec<ModelPrice>, CatalogFetchError>;
}

/// Fetches the catalog from OpenRouter's `/models` endpoint.
pub struct OpenRouterSource {
    agent: ureq::Agent,
    url: String,
    api_key: Option<String>,
    app_name: Option<String>,
}

impl OpenRouterSource {
    pub fn new(
        base_url: Option<&str>,
        api_key: Option<String>,
        app_name: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            url: format!("{base}/models"),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            app_name: app_name.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for OpenRouterSource {
    fn fetch(&self) -> Result<Vec<ModelPrice>, CatalogFetchError> {
        let start = Instant::now();
        debug!(url = %self.url, authenticated = self.api_key.is_some(), "fetching model catalog");

        let mut request = self
            .agent
            .get(&self.url)
            .header("Accept", "application/json")
            .header("User-Agent", concat!("llmcost/", env!("CARGO_PKG_VERSION")));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        if let Some(app) = &self.app_name {
            request = request.header("X-Title", app.as_str());
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => CatalogFetchError::Status {
                url: self.url.clone(),
                status,
            },
            other => CatalogFetchError::Request {
                url: self.url.clone(),
                source: other,
            },
        })?;

        let mut body = response.into_body();
        let payload: serde_json::Value = serde_json::from_reader(body.as_reader())?;
        let models = parse_catalog(&payload)?;

        info!(
            models = models.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched model catalog"
        );
        Ok(models)
    }
}
