use anyhow::Result;
use apexhome_core::{
    ActionExecutor, ApexHomeClient, ApexHomeCredentials, CredentialProvider, ExecutionOptions,
    ExecutionResult, StaticCredentials,
};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

use super::read_items;
use crate::cli::RunArgs;
use crate::output::table::{print_table, truncate};
use crate::output::{OutputFormat, json::print_json};

pub async fn run(
    args: RunArgs,
    credentials: ApexHomeCredentials,
    format: OutputFormat,
) -> Result<()> {
    let items = read_items(&args.input.input)?;
    let credentials = StaticCredentials::new(credentials).credentials().await?;

    let executor = ActionExecutor::new(
        ApexHomeClient::new(credentials),
        ExecutionOptions {
            continue_on_fail: args.continue_on_fail,
            echo_request: args.echo_request,
        },
    );

    tracing::debug!(items = items.len(), "Running batch");
    let results = executor.execute_batch(&items).await?;

    if format.is_json() {
        return print_json(&results);
    }

    print_results(&results)
}

fn print_results(results: &[ExecutionResult]) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Status", "Response"]);

    for result in results {
        let (status, detail) = if result.success {
            let detail = if result.binary.is_some() {
                format!("binary {}", result.response)
            } else {
                result.response.to_string()
            };
            (Cell::new("ok").fg(Color::Green), detail)
        } else {
            (
                Cell::new("failed").fg(Color::Red),
                result.error.clone().unwrap_or_default(),
            )
        };
        table.add_row(vec![
            Cell::new(result.paired_item),
            status,
            Cell::new(truncate(&detail, 80)),
        ]);
    }

    print_table(table)?;

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        println!("{}", format!("{failed} of {} items failed", results.len()).yellow());
    }
    Ok(())
}
