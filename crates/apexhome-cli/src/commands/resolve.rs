use anyhow::{Context, Result};
use apexhome_core::{ActionRequest, ResolvedCall, resolve};
use comfy_table::{Cell, Table};

use super::read_items;
use crate::cli::InputArgs;
use crate::output::table::{print_table, truncate};
use crate::output::{OutputFormat, json::print_json};

pub fn run(args: InputArgs, format: OutputFormat) -> Result<()> {
    let items = read_items(&args.input)?;
    let calls = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            ActionRequest::from_item(item)
                .and_then(|request| resolve(&request))
                .with_context(|| format!("Item {index}"))
        })
        .collect::<Result<Vec<ResolvedCall>>>()?;

    if format.is_json() {
        return print_json(&calls);
    }

    let mut table = Table::new();
    table.set_header(vec!["Item", "Method", "Path", "Body"]);
    for (index, call) in calls.iter().enumerate() {
        let body = call
            .body
            .as_ref()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(index),
            Cell::new(call.method),
            Cell::new(&call.path),
            Cell::new(truncate(&body, 60)),
        ]);
    }
    print_table(table)
}
