//! Console commands
//!
//! - `make:resource` - Generate a CRUD resource (model, migration, controller,
//!   routes, factory)

pub mod resource;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use std::process::ExitCode;

pub use resource::ResourceCommand;

/// Top-level subcommand
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a model, migration, controller and route block for a resource
    #[command(name = "make:resource", visible_alias = "resource")]
    MakeResource {
        /// Resource name (e.g., `Animal`)
        name: String,
        /// Attributes, e.g. `name:string,100,fillable|password:string,hidden`
        attributes: Option<String>,
        /// Project root (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Configuration file (defaults to `resource-gen.toml` in the project root)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Do not append a model factory definition
        #[arg(long)]
        no_factory: bool,
        /// Skip the route block when the routes file already contains it
        #[arg(long)]
        guard_routes: bool,
    },
}

/// Run a command
///
/// # Errors
///
/// Returns an error if the command cannot be set up (project root, configuration).
pub fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::MakeResource {
            name,
            attributes,
            root,
            config,
            no_factory,
            guard_routes,
        } => ResourceCommand::new(name, attributes)
            .with_root(root)
            .with_config(config)
            .without_factory(no_factory)
            .guard_routes(guard_routes)
            .execute(),
    }
}
