use rust_decimal::Decimal;
use serde::Serialize;

use crate::consts::CURRENCY;

pub(crate) const TOKENS_PER_MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// One catalog entry. Prices are USD per million tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrice {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub context_window: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub input_price_per_million: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub output_price_per_million: Decimal,
    /// `None` when the provider offers no cached-input discount
    #[serde(with = "rust_decimal::serde::float_option")]
    pub cached_input_price_per_million: Option<Decimal>,
}

impl ModelPrice {
    /// Rate applied to cached input tokens: the discounted tier when offered,
    /// the standard input rate otherwise.
    pub fn cached_input_rate(&self) -> Decimal {
        match self.cached_input_price_per_million {
            Some(rate) => rate,
            None => self.input_price_per_million,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Portion of `input_tokens` served from the provider's prompt cache
    pub cached_input_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64, cached_input_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            cached_input_tokens,
        }
    }

    /// Cached tokens clamped to the input count
    pub fn cached_tokens(&self) -> u64 {
        self.cached_input_tokens.min(self.input_tokens)
    }

    pub fn uncached_tokens(&self) -> u64 {
        self.input_tokens - self.cached_tokens()
    }

    /// Input plus output, saturating at `u64::MAX`
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub model: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub input_cost_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cached_input_cost_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub output_cost_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost_usd: Decimal,
    pub currency: &'static str,
}

impl CostBreakdown {
    /// `None` when the components do not fit in a single total.
    pub(crate) fn new(
        model: &str,
        input_cost_usd: Decimal,
        cached_input_cost_usd: Decimal,
        output_cost_usd: Decimal,
    ) -> Option<Self> {
        let total_cost_usd = input_cost_usd
            .checked_add(cached_input_cost_usd)?
            .checked_add(output_cost_usd)?;
        Some(Self {
            model: model.to_string(),
            input_cost_usd,
            cached_input_cost_usd,
            output_cost_usd,
            total_cost_usd,
            currency: CURRENCY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price(cached: Option<Decimal>) -> ModelPrice {
        ModelPrice {
            id: "openai/gpt-4o-mini".to_string(),
            name: "GPT-4o-mini".to_string(),
            provider: "OpenAI".to_string(),
            context_window: 128_000,
            input_price_per_million: dec!(0.15),
            output_price_per_million: dec!(0.60),
            cached_input_price_per_million: cached,
        }
    }

    #[test]
    fn cached_rate_prefers_discount_tier() {
        assert_eq!(price(Some(dec!(0.075))).cached_input_rate(), dec!(0.075));
    }

    #[test]
    fn cached_rate_falls_back_to_input_rate() {
        assert_eq!(price(None).cached_input_rate(), dec!(0.15));
    }

    #[test]
    fn usage_clamps_cached_tokens() {
        let usage = TokenUsage::new(100, 0, 250);
        assert_eq!(usage.cached_tokens(), 100);
        assert_eq!(usage.uncached_tokens(), 0);
    }

    #[test]
    fn usage_partitions_input() {
        let usage = TokenUsage::new(1500, 700, 300);
        assert_eq!(usage.cached_tokens(), 300);
        assert_eq!(usage.uncached_tokens(), 1200);
    }

    #[test]
    fn usage_total_saturates() {
        assert_eq!(TokenUsage::new(1500, 700, 300).total_tokens(), 2200);
        assert_eq!(TokenUsage::new(u64::MAX, u64::MAX, 0).total_tokens(), u64::MAX);
    }

    #[test]
    fn breakdown_total_is_sum() {
        let b = CostBreakdown::new("m", dec!(0.1), dec!(0.02), dec!(0.003)).unwrap();
        assert_eq!(b.total_cost_usd, dec!(0.123));
        assert_eq!(b.currency, "USD");
    }

    #[test]
    fn breakdown_total_overflow_is_none() {
        assert!(CostBreakdown::new("m", Decimal::MAX, Decimal::ZERO, Decimal::ONE).is_none());
    }
}
