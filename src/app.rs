use llmcost::{CostClient, Result, calculate_cost};

use crate::cli::{Cli, EstimateArgs, ModelsArgs};
use crate::output::{
    output_breakdown_json, output_models_json, print_breakdown_table, print_models_table,
};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) client: &'a CostClient,
}

fn print_json(json: std::result::Result<String, serde_json::Error>) {
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn handle_estimate(args: &EstimateArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let usage = args.token_usage()?;
    // One lookup, so the rates shown match the costs beside them
    let price = ctx.client.find_model(&args.model)?;
    let breakdown = calculate_cost(&price, &usage)?;

    if ctx.cli.json {
        print_json(output_breakdown_json(&breakdown));
    } else {
        print_breakdown_table(&breakdown, &usage, &price, ctx.cli.use_color());
    }
    Ok(())
}

pub(crate) fn handle_models(args: &ModelsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let mut models = ctx.client.list_models(args.refresh)?;
    if let Some(provider) = &args.provider {
        models.retain(|m| m.provider.eq_ignore_ascii_case(provider));
    }

    if ctx.cli.json {
        print_json(output_models_json(&models));
    } else if models.is_empty() {
        println!("No models found.");
    } else {
        print_models_table(&models, ctx.cli.use_color());
    }
    Ok(())
}
