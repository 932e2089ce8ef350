use anyhow::{Context, Result};
use apexhome_core::description::{NodeDescription, action_description, trigger_description};
use apexhome_core::{EventCatalog, Resource, supported_operations};
use comfy_table::{Cell, Table};

use crate::cli::{DescribeArgs, NodeKind};
use crate::output::table::print_table;
use crate::output::{OutputFormat, json::print_json};

pub fn run(args: DescribeArgs, format: OutputFormat) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => EventCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => EventCatalog::default(),
    };

    let description = match args.node {
        NodeKind::Action => action_description(),
        NodeKind::Trigger => trigger_description(&catalog),
    };

    if format.is_json() {
        return print_json(&description);
    }

    println!("{} (v{})", description.display_name, description.version);
    match args.node {
        NodeKind::Action => print_operations(),
        NodeKind::Trigger => print_channels(&description, &catalog),
    }
}

fn print_operations() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Resource", "Operations"]);
    for resource in Resource::ALL {
        let operations: Vec<&str> = supported_operations(resource)
            .iter()
            .map(|op| op.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(resource.as_str()),
            Cell::new(operations.join(", ")),
        ]);
    }
    print_table(table)
}

fn print_channels(description: &NodeDescription, catalog: &EventCatalog) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Channel", "Event", "Output"]);
    for (index, (event, output)) in catalog
        .events()
        .iter()
        .zip(&description.output_names)
        .enumerate()
    {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&event.id),
            Cell::new(output),
        ]);
    }
    print_table(table)
}
