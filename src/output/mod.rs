mod format;
mod json;
mod table;

pub(crate) use json::{output_breakdown_json, output_models_json};
pub(crate) use table::{print_breakdown_table, print_models_table};
