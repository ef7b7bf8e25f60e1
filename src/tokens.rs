//! Character-ratio token estimate for callers that only have raw text.
//!
//! This is a heuristic, not a tokenizer. Callers that need exact counts
//! should pass token counts directly.

use crate::error::{EstimateError, Result};

/// The ratio must be a finite number above zero.
pub fn validate_chars_per_token(chars_per_token: f64) -> Result<()> {
    if !chars_per_token.is_finite() || chars_per_token <= 0.0 {
        return Err(EstimateError::InvalidConfiguration {
            reason: format!("chars_per_token must be greater than 0 (got {chars_per_token})"),
        });
    }
    Ok(())
}

/// `ceil(chars / chars_per_token)`, counting Unicode scalar values.
pub fn estimate_tokens(text: &str, chars_per_token: f64) -> Result<u64> {
    validate_chars_per_token(chars_per_token)?;

    let chars = text.chars().count();
    if chars == 0 {
        return Ok(0);
    }
    Ok((chars as f64 / chars_per_token).ceil() as u64)
}
