use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "apexhome")]
#[command(version, about = "Apex Home - actions and webhook trigger for an Apex Home instance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the Apex Home instance
    #[arg(long, global = true, env = "APEXHOME_URL")]
    pub url: Option<String>,

    /// API key sent as X-API-Key
    #[arg(long, global = true, env = "APEXHOME_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a batch of action items against the API
    Run(RunArgs),

    /// Show the REST calls a batch would make without sending them
    Resolve(InputArgs),

    /// Check that the configured credentials are accepted
    Test,

    /// Print a node description
    Describe(DescribeArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON file holding one item or an array of items; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Record failing items and keep going
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Include each request body in its result
    #[arg(long)]
    pub echo_request: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Action,
    Trigger,
}

#[derive(Args)]
pub struct DescribeArgs {
    #[arg(value_enum)]
    pub node: NodeKind,

    /// Event catalog file for the trigger description
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}
