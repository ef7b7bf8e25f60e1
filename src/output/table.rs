use comfy_table::{Cell, Color};

use llmcost::{CostBreakdown, ModelPrice, TokenUsage};

use super::format::{
    create_styled_table, format_number, format_rate, format_usd, header_cell, right_cell,
};

pub(crate) fn print_breakdown_table(
    breakdown: &CostBreakdown,
    usage: &TokenUsage,
    price: &ModelPrice,
    use_color: bool,
) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Component", use_color),
        header_cell("Tokens", use_color),
        header_cell("$/M", use_color),
        header_cell("Cost", use_color),
    ]);

    table.add_row(vec![
        Cell::new("Input"),
        right_cell(&format_number(usage.uncached_tokens()), None, false),
        right_cell(&format_usd(price.input_price_per_million), None, false),
        right_cell(&format_usd(breakdown.input_cost_usd), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Cached input"),
        right_cell(&format_number(usage.cached_tokens()), None, false),
        right_cell(&format_usd(price.cached_input_rate()), None, false),
        right_cell(&format_usd(breakdown.cached_input_cost_usd), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Output"),
        right_cell(&format_number(usage.output_tokens), None, false),
        right_cell(&format_usd(price.output_price_per_million), None, false),
        right_cell(&format_usd(breakdown.output_cost_usd), None, false),
    ]);

    let total_color = use_color.then_some(Color::Green);
    table.add_row(vec![
        Cell::new("Total"),
        right_cell(&format_number(usage.total_tokens()), None, true),
        Cell::new(""),
        right_cell(&format_usd(breakdown.total_cost_usd), total_color, true),
    ]);

    println!("\n  {} ({})\n", breakdown.model, breakdown.currency);
    println!("{table}");
    if price.cached_input_price_per_million.is_none() && usage.cached_tokens() > 0 {
        println!("\n  No cached-input tier for this model; cached tokens billed at the input rate.");
    }
}

pub(crate) fn print_models_table(models: &[ModelPrice], use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Model", use_color),
        header_cell("Provider", use_color),
        header_cell("Context", use_color),
        header_cell("$/M in", use_color),
        header_cell("$/M cached", use_color),
        header_cell("$/M out", use_color),
    ]);

    for model in models {
        table.add_row(vec![
            Cell::new(&model.id),
            Cell::new(&model.provider),
            right_cell(&format_number(model.context_window), None, false),
            right_cell(&format_usd(model.input_price_per_million), None, false),
            right_cell(&format_rate(model.cached_input_price_per_million), None, false),
            right_cell(&format_usd(model.output_price_per_million), None, false),
        ]);
    }

    println!("{table}");
    println!("\n  {} models\n", format_number(models.len() as u64));
}
