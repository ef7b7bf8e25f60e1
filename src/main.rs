mod app;
mod cli;
mod config;
mod output;

use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use llmcost::{ClientOptions, CostClient};

use app::{CommandContext, handle_estimate, handle_models};
use cli::{Cli, Commands};
use config::Config;

fn init_logging(debug: bool, ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("llmcost=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let loaded = Config::load();
    let cli = Cli::parse().with_config(&loaded.config);
    init_logging(cli.debug, !cli.no_color && std::io::stderr().is_terminal());
    loaded.report();

    let client = CostClient::new(ClientOptions {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
        app_name: cli.app_name.clone(),
        cache_ttl_seconds: cli.cache_ttl_seconds(),
        timeout: Some(Duration::from_secs(cli.timeout_secs())),
    });
    let ctx = CommandContext {
        cli: &cli,
        client: &client,
    };

    let result = match &cli.command {
        Commands::Estimate(args) => handle_estimate(args, &ctx),
        Commands::Models(args) => handle_models(args, &ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
