use serde_json::json;

use llmcost::{CostBreakdown, ModelPrice};

pub(crate) fn output_breakdown_json(breakdown: &CostBreakdown) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(breakdown)
}

pub(crate) fn output_models_json(models: &[ModelPrice]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "count": models.len(),
        "models": models,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmcost::{TokenUsage, calculate_cost};
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn model(cached: Option<rust_decimal::Decimal>) -> ModelPrice {
        ModelPrice {
            id: "openai/gpt-4o-mini".to_string(),
            name: "OpenAI: GPT-4o-mini".to_string(),
            provider: "OpenAI".to_string(),
            context_window: 128_000,
            input_price_per_million: dec!(0.15),
            output_price_per_million: dec!(0.6),
            cached_input_price_per_million: cached,
        }
    }

    #[test]
    fn breakdown_json_uses_numbers() {
        let breakdown = calculate_cost(&model(Some(dec!(0.075))), &TokenUsage::new(1500, 700, 300)).unwrap();
        let json: Value = serde_json::from_str(&output_breakdown_json(&breakdown).unwrap()).unwrap();

        assert_eq!(json["model"], "openai/gpt-4o-mini");
        assert_eq!(json["currency"], "USD");
        assert!((json["input_cost_usd"].as_f64().unwrap() - 0.00018).abs() < 1e-12);
        assert!((json["cached_input_cost_usd"].as_f64().unwrap() - 0.0000225).abs() < 1e-12);
        assert!((json["output_cost_usd"].as_f64().unwrap() - 0.00042).abs() < 1e-12);
        assert!((json["total_cost_usd"].as_f64().unwrap() - 0.0006225).abs() < 1e-12);
    }

    #[test]
    fn models_json_marks_missing_cached_tier_as_null() {
        let json: Value =
            serde_json::from_str(&output_models_json(&[model(None)]).unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert!(json["models"][0]["cached_input_price_per_million"].is_null());
        assert_eq!(json["models"][0]["context_window"], 128_000);
    }
}
