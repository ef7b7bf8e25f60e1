mod cache;
mod calculator;
mod provider;
mod resolver;
mod types;

pub use cache::{CatalogCache, CatalogSnapshot, Clock, SystemClock};
pub use calculator::calculate_cost;
pub use provider::{CatalogSource, OpenRouterSource};
pub use types::{CostBreakdown, ModelPrice, TokenUsage};
