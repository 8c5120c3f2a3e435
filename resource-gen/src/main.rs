//! resource-gen - Laravel resource scaffolding
//!
//! # Usage
//!
//! ```bash
//! resource-gen make:resource Animal "name:string,100,fillable|age:integer,unsigned"
//! resource-gen make:resource Tiger --no-factory --guard-routes
//! ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "resource-gen")]
#[command(version)]
#[command(about = "Scaffold Laravel CRUD resources", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: resource_gen::commands::Command,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    resource_gen::observability::init(cli.verbose)?;

    resource_gen::commands::run(cli.command)
}
