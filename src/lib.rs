//! Estimate the USD cost of an LLM API call from live OpenRouter pricing.
//!
//! [`CostClient`] keeps a time-bounded copy of the model catalog and prices
//! [`TokenUsage`] records against it, including the discounted cached-input
//! tier when a model offers one.

pub mod client;
pub mod consts;
pub mod error;
pub mod pricing;
pub mod tokens;

pub use client::{ClientOptions, CostClient};
pub use error::{CatalogFetchError, EstimateError, Result};
pub use pricing::{
    CatalogCache, CatalogSnapshot, CatalogSource, Clock, CostBreakdown, ModelPrice,
    OpenRouterSource, SystemClock, TokenUsage, calculate_cost,
};
pub use tokens::estimate_tokens;
