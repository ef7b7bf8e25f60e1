use rust_decimal::{Decimal, RoundingStrategy};

use crate::consts::COST_DECIMAL_PLACES;
use crate::error::{EstimateError, Result};

use super::types::{CostBreakdown, ModelPrice, TOKENS_PER_MILLION, TokenUsage};

fn round_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(COST_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn out_of_range(model: &str) -> EstimateError {
    EstimateError::InvalidConfiguration {
        reason: format!("cost for model '{model}' is out of range"),
    }
}

fn priced(tokens: u64, rate_per_million: Decimal, model: &str) -> Result<Decimal> {
    if tokens == 0 {
        return Ok(Decimal::ZERO);
    }
    Decimal::from(tokens)
        .checked_mul(rate_per_million)
        .and_then(|cost| cost.checked_div(TOKENS_PER_MILLION))
        .map(round_cost)
        .ok_or_else(|| out_of_range(model))
}

/// Price a usage record against one catalog entry.
///
/// Cached tokens are clamped to `input_tokens` and billed at
/// [`ModelPrice::cached_input_rate`]; the rest of the input is billed at the
/// standard rate. Each component is rounded before summing, so the total is
/// exactly the sum of its parts.
///
/// Fails with [`EstimateError::InvalidConfiguration`] when a component or the
/// total exceeds what a `Decimal` can hold.
pub fn calculate_cost(price: &ModelPrice, usage: &TokenUsage) -> Result<CostBreakdown> {
    let input = priced(usage.uncached_tokens(), price.input_price_per_million, &price.id)?;
    let cached_input = priced(usage.cached_tokens(), price.cached_input_rate(), &price.id)?;
    let output = priced(usage.output_tokens, price.output_price_per_million, &price.id)?;
    CostBreakdown::new(&price.id, input, cached_input, output).ok_or_else(|| out_of_range(&price.id))
}
