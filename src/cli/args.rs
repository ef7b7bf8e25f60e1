//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::Parser;

use llmcost::consts::{API_KEY_ENV, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_FETCH_TIMEOUT_SECS};

use crate::config::Config;

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "llmcost")]
#[command(about = "Estimate LLM API call costs from live OpenRouter pricing", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// OpenRouter API key
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub(crate) api_key: Option<String>,

    /// OpenRouter API root (catalog is fetched from <BASE_URL>/models)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) base_url: Option<String>,

    /// Application name sent as the X-Title header
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) app_name: Option<String>,

    /// Catalog cache lifetime in seconds (0 or less always refetches)
    #[arg(long, global = true, value_name = "SECS", allow_negative_numbers = true)]
    pub(crate) cache_ttl: Option<i64>,

    /// HTTP timeout for the catalog request in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if self.base_url.is_none() {
            self.base_url = config.base_url.clone();
        }
        if self.app_name.is_none() {
            self.app_name = config.app_name.clone();
        }
        if self.cache_ttl.is_none() {
            self.cache_ttl = config.cache_ttl_seconds;
        }
        if self.timeout.is_none() {
            self.timeout = config.timeout_secs;
        }
        if let Commands::Estimate(ref mut args) = self.command
            && args.chars_per_token.is_none()
        {
            args.chars_per_token = config.chars_per_token;
        }
        self
    }

    pub(crate) fn cache_ttl_seconds(&self) -> i64 {
        self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL_SECONDS)
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    pub(crate) fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llmcost").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn config_fills_unset_options() {
        let cli = parse(&["estimate", "--model", "a/b", "--input-text", "hi", "--output-tokens", "1"]);
        let config = Config {
            base_url: Some("http://localhost/api".to_string()),
            cache_ttl_seconds: Some(10),
            chars_per_token: Some(3.0),
            debug: true,
            ..Config::default()
        };
        let cli = cli.with_config(&config);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost/api"));
        assert_eq!(cli.cache_ttl_seconds(), 10);
        assert!(cli.debug);
        let Commands::Estimate(args) = &cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.chars_per_token, Some(3.0));
    }

    #[test]
    fn cli_values_beat_config() {
        let cli = parse(&[
            "models",
            "--cache-ttl",
            "-1",
            "--base-url",
            "http://cli/api",
        ]);
        let config = Config {
            base_url: Some("http://config/api".to_string()),
            cache_ttl_seconds: Some(10),
            ..Config::default()
        };
        let cli = cli.with_config(&config);
        assert_eq!(cli.base_url.as_deref(), Some("http://cli/api"));
        assert_eq!(cli.cache_ttl_seconds(), -1);
    }

    #[test]
    fn defaults_apply_without_config() {
        let cli = parse(&["models"]).with_config(&Config::default());
        assert_eq!(cli.cache_ttl_seconds(), 3600);
        assert_eq!(cli.timeout_secs(), 20);
    }
}
