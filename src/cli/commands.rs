//! CLI subcommand definitions

use clap::{ArgGroup, Args, Subcommand};

use llmcost::consts::DEFAULT_CHARS_PER_TOKEN;
use llmcost::tokens::validate_chars_per_token;
use llmcost::{TokenUsage, estimate_tokens};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Estimate the cost of one call from token counts or raw text
    Estimate(EstimateArgs),
    /// List priced models from the catalog
    Models(ModelsArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["input_tokens", "input_text"])))]
#[command(group(ArgGroup::new("output").required(true).args(["output_tokens", "output_text"])))]
pub(crate) struct EstimateArgs {
    /// Provider-qualified model id (e.g. openai/gpt-4o-mini)
    #[arg(short, long)]
    pub(crate) model: String,

    /// Prompt/input token count
    #[arg(long)]
    pub(crate) input_tokens: Option<u64>,

    /// Completion/output token count
    #[arg(long)]
    pub(crate) output_tokens: Option<u64>,

    /// Input tokens served from the prompt cache
    #[arg(long, default_value_t = 0, conflicts_with = "input_text")]
    pub(crate) cached_input_tokens: u64,

    /// Prompt text; tokens are estimated from its length
    #[arg(long)]
    pub(crate) input_text: Option<String>,

    /// Completion text; tokens are estimated from its length
    #[arg(long)]
    pub(crate) output_text: Option<String>,

    /// Characters per token for text estimates [default: 4.0]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) chars_per_token: Option<f64>,
}

impl EstimateArgs {
    pub(crate) fn chars_per_token(&self) -> f64 {
        self.chars_per_token.unwrap_or(DEFAULT_CHARS_PER_TOKEN)
    }

    /// Counts as given, with text sides replaced by a length-based estimate.
    /// An explicit `--chars-per-token` is validated even when unused.
    pub(crate) fn token_usage(&self) -> llmcost::Result<TokenUsage> {
        let chars_per_token = self.chars_per_token();
        if self.chars_per_token.is_some() {
            validate_chars_per_token(chars_per_token)?;
        }
        let side = |count: Option<u64>, text: Option<&str>| match (count, text) {
            (Some(n), _) => Ok(n),
            (None, Some(text)) => estimate_tokens(text, chars_per_token),
            (None, None) => Ok(0),
        };
        Ok(TokenUsage::new(
            side(self.input_tokens, self.input_text.as_deref())?,
            side(self.output_tokens, self.output_text.as_deref())?,
            self.cached_input_tokens,
        ))
    }
}

#[derive(Args, Debug)]
pub(crate) struct ModelsArgs {
    /// Only show models from this provider (case-insensitive, e.g. OpenAI)
    #[arg(short, long)]
    pub(crate) provider: Option<String>,

    /// Ignore the cache and fetch the catalog again
    #[arg(long)]
    pub(crate) refresh: bool,
}
