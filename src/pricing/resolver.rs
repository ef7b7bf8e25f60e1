use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::error::CatalogFetchError;

use super::types::{ModelPrice, TOKENS_PER_MILLION};

/// Well-known vendor prefixes and their display names
const KNOWN_PROVIDERS: &[(&str, &str)] = &[
    ("openai/", "OpenAI"),
    ("google/", "Google"),
    ("anthropic/", "Anthropic"),
    ("mistral", "Mistral"),
    ("meta-llama/", "Meta"),
    ("meta/", "Meta"),
    ("cohere/", "Cohere"),
    ("deepseek/", "DeepSeek"),
    ("qwen/", "Alibaba"),
    ("microsoft/", "Microsoft"),
    ("perplexity/", "Perplexity"),
];

fn malformed(reason: impl Into<String>) -> CatalogFetchError {
    CatalogFetchError::Malformed {
        reason: reason.into(),
    }
}

pub(crate) fn guess_provider(model_id: &str) -> String {
    let lower = model_id.to_lowercase();
    if let Some((_, name)) = KNOWN_PROVIDERS
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
    {
        return (*name).to_string();
    }

    match lower.split_once('/') {
        Some((prefix, _)) if !prefix.trim().is_empty() => {
            let prefix = prefix.trim();
            let mut chars = prefix.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "Other".to_string(),
            }
        }
        _ => "Other".to_string(),
    }
}

/// Parse a per-token price given as a JSON string or number.
fn parse_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn required_price(
    pricing: &Value,
    field: &str,
    model_id: &str,
) -> Result<Decimal, CatalogFetchError> {
    let raw = pricing
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| malformed(format!("model '{model_id}' is missing pricing.{field}")))?;
    parse_price(raw).ok_or_else(|| {
        malformed(format!(
            "model '{model_id}' has an unparseable pricing.{field}: {raw}"
        ))
    })
}

fn optional_price(
    pricing: &Value,
    fields: &[&str],
    model_id: &str,
) -> Result<Option<Decimal>, CatalogFetchError> {
    let Some((field, raw)) = fields
        .iter()
        .find_map(|f| pricing.get(*f).filter(|v| !v.is_null()).map(|v| (*f, v)))
    else {
        return Ok(None);
    };
    parse_price(raw).map(Some).ok_or_else(|| {
        malformed(format!(
            "model '{model_id}' has an unparseable pricing.{field}: {raw}"
        ))
    })
}

fn per_million(price: Decimal, model_id: &str) -> Result<Decimal, CatalogFetchError> {
    price
        .checked_mul(TOKENS_PER_MILLION)
        .ok_or_else(|| malformed(format!("model '{model_id}' price out of range")))
}

fn parse_context_window(item: &Value) -> u64 {
    match item.get("context_length") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Turn an OpenRouter `/models` payload into catalog entries, keeping the
/// order the source reports them in.
///
/// Entries priced below zero (dynamic-price routers advertise `-1`) are
/// skipped. Any entry missing its id, prompt price or completion price fails
/// the whole payload.
pub(crate) fn parse_catalog(payload: &Value) -> Result<Vec<ModelPrice>, CatalogFetchError> {
    let data = payload
        .get("data")
        .ok_or_else(|| malformed("response has no 'data' field"))?
        .as_array()
        .ok_or_else(|| malformed("'data' is not an array"))?;

    let mut models = Vec::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed(format!("entry {index} has no string 'id'")))?;

        let pricing = item
            .get("pricing")
            .filter(|v| v.is_object())
            .ok_or_else(|| malformed(format!("model '{id}' has no 'pricing' object")))?;

        let input = required_price(pricing, "prompt", id)?;
        let output = required_price(pricing, "completion", id)?;
        let cached = optional_price(pricing, &["input_cache_read", "cached_prompt"], id)?;

        let has_negative = input < Decimal::ZERO
            || output < Decimal::ZERO
            || cached.is_some_and(|c| c < Decimal::ZERO);
        if has_negative {
            debug!(model = id, "skipping catalog entry with dynamic (negative) pricing");
            continue;
        }

        let name = item
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(id);

        models.push(ModelPrice {
            id: id.to_string(),
            name: name.to_string(),
            provider: guess_provider(id),
            context_window: parse_context_window(item),
            input_price_per_million: per_million(input, id)?,
            output_price_per_million: per_million(output, id)?,
            cached_input_price_per_million: cached.map(|c| per_million(c, id)).transpose()?,
        });
    }

    Ok(models)
}
