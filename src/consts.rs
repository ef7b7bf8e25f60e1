/// Default OpenRouter API root; the catalog lives at `{base}/models`
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Environment variable holding the optional OpenRouter credential
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 3600;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Decimal places kept on every cost component
pub const COST_DECIMAL_PLACES: u32 = 10;

pub const CURRENCY: &str = "USD";
