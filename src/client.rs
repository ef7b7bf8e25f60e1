use std::time::Duration;

use tracing::debug;

use crate::consts::DEFAULT_CACHE_TTL_SECONDS;
use crate::error::Result;
use crate::pricing::{
    CatalogCache, CatalogSource, Clock, CostBreakdown, ModelPrice, OpenRouterSource, TokenUsage,
    calculate_cost,
};
use crate::tokens::estimate_tokens;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_key: Option<String>,
    /// OpenRouter API root; `None` uses the public endpoint
    pub base_url: Option<String>,
    /// Sent as `X-Title` so requests are attributed on OpenRouter
    pub app_name: Option<String>,
    pub cache_ttl_seconds: i64,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            app_name: None,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            timeout: None,
        }
    }
}

/// Entry point for library and CLI callers. Owns one catalog cache, so
/// share a single instance to avoid repeated fetches.
pub struct CostClient {
    cache: CatalogCache,
}

impl CostClient {
    pub fn new(options: ClientOptions) -> Self {
        let source = OpenRouterSource::new(
            options.base_url.as_deref(),
            options.api_key,
            options.app_name,
            options.timeout,
        );
        Self::with_source(Box::new(source), options.cache_ttl_seconds)
    }

    pub fn with_source(source: Box<dyn CatalogSource>, cache_ttl_seconds: i64) -> Self {
        Self {
            cache: CatalogCache::new(source, cache_ttl_seconds),
        }
    }

    pub fn with_source_and_clock(
        source: Box<dyn CatalogSource>,
        cache_ttl_seconds: i64,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            cache: CatalogCache::with_clock(source, cache_ttl_seconds, clock),
        }
    }

    /// All priced models, in catalog order.
    pub fn list_models(&self, force_refresh: bool) -> Result<Vec<ModelPrice>> {
        let catalog = if force_refresh {
            self.cache.refresh()?
        } else {
            self.cache.get_catalog()?
        };
        Ok(catalog.models().to_vec())
    }

    pub fn find_model(&self, model: &str) -> Result<ModelPrice> {
        self.cache.find_model(model)
    }

    pub fn estimate_model_cost(&self, model: &str, usage: &TokenUsage) -> Result<CostBreakdown> {
        let price = self.cache.find_model(model)?;
        calculate_cost(&price, usage)
    }

    /// Estimate tokens from raw text, then price them. The text is checked
    /// before the catalog is touched, so a bad ratio never costs a fetch.
    pub fn estimate_text_cost(
        &self,
        model: &str,
        input_text: &str,
        output_text: &str,
        chars_per_token: f64,
    ) -> Result<CostBreakdown> {
        let usage = TokenUsage::new(
            estimate_tokens(input_text, chars_per_token)?,
            estimate_tokens(output_text, chars_per_token)?,
            0,
        );
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            chars_per_token,
            "estimated tokens from text"
        );
        self.estimate_model_cost(model, &usage)
    }
}
