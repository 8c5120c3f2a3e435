//! `make:resource` command
//!
//! Generates a Laravel CRUD resource in the project root:
//!
//! ```bash
//! resource-gen make:resource Animal "name:string,100,fillable|password:string,hidden"
//! ```

use crate::config::GeneratorConfig;
use crate::scaffold::generator::{Artifact, Outcome, ResourceGenerator, RunReport, Step};
use crate::scaffold::hooks::{AutoloadHook, CommandAutoload, NoopAutoload, SystemClock};
use crate::scaffold::store::LocalFileStore;
use crate::scaffold::ParsedRequest;
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Resource scaffolding command
#[derive(Debug, Clone, Default)]
pub struct ResourceCommand {
    /// Resource name (`Animal`)
    name: String,
    /// Attribute string (`name:string,100|age:integer`)
    attributes: Option<String>,
    /// Project root; the working directory when absent
    root: Option<PathBuf>,
    /// Explicit config file
    config: Option<PathBuf>,
    /// Already-resolved configuration; skips loading
    settings: Option<GeneratorConfig>,
    /// Skip the factory definition
    no_factory: bool,
    /// Do not append a route block that is already present
    guard_routes: bool,
}

impl ResourceCommand {
    /// Create a command for `name` with an optional attribute string
    #[must_use]
    pub const fn new(name: String, attributes: Option<String>) -> Self {
        Self {
            name,
            attributes,
            root: None,
            config: None,
            settings: None,
            no_factory: false,
            guard_routes: false,
        }
    }

    /// Generate into `root` instead of the working directory
    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    /// Read configuration from `config` instead of the default locations
    #[must_use]
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Use `settings` instead of loading configuration files and the environment
    #[must_use]
    pub fn with_settings(mut self, settings: GeneratorConfig) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Skip the factory step
    #[must_use]
    pub const fn without_factory(mut self, no_factory: bool) -> Self {
        self.no_factory = no_factory;
        self
    }

    /// Guard the route block against duplication
    #[must_use]
    pub const fn guard_routes(mut self, guard_routes: bool) -> Self {
        self.guard_routes = guard_routes;
        self
    }

    /// Execute the command and map the outcome to an exit code
    ///
    /// # Errors
    ///
    /// Returns an error if the project root or configuration cannot be resolved.
    /// A failed generation step is reported on the console and yields
    /// [`ExitCode::FAILURE`] instead.
    pub fn execute(&self) -> Result<ExitCode> {
        let report = self.run()?;
        Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    /// Execute the command and return the run report
    ///
    /// # Errors
    ///
    /// Returns an error if the project root or configuration cannot be resolved.
    pub fn run(&self) -> Result<RunReport> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let config = self.resolve_config(&root)?;
        let generator = build_generator(&root, &config);
        let request = ParsedRequest::new(self.name.as_str(), self.attributes.as_deref());

        println!(
            "\n{} {} {}",
            style("Generating resource").cyan().bold(),
            style(&request.resource_name).green().bold(),
            style("...").cyan().bold()
        );

        let report = generator.run(&request);
        print_report(&report);
        Ok(report)
    }

    /// Load configuration and apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be loaded.
    pub fn resolve_config(&self, root: &Path) -> Result<GeneratorConfig> {
        let mut config = match (&self.settings, &self.config) {
            (Some(settings), _) => settings.clone(),
            (None, Some(path)) => GeneratorConfig::load_from(path)?,
            (None, None) => GeneratorConfig::load(root)?,
        };

        if self.no_factory {
            config.generate.factory = false;
        }
        if self.guard_routes {
            config.generate.guard_duplicate_routes = true;
        }

        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

fn build_generator(root: &Path, config: &GeneratorConfig) -> ResourceGenerator {
    let autoload: Box<dyn AutoloadHook> = match &config.autoload.command {
        Some(argv) => Box::new(CommandAutoload::new(argv.clone(), root)),
        None => Box::new(NoopAutoload),
    };

    ResourceGenerator::new(Arc::new(LocalFileStore::new(root)))
        .with_clock(SystemClock)
        .with_autoload(autoload)
        .with_layout(config.layout.clone())
        .with_options(config.generate)
}

/// Operator message for a completed step
#[must_use]
pub fn artifact_message(artifact: &Artifact) -> String {
    match (artifact.step, artifact.outcome) {
        (Step::CreateMigration, _) => format!("Created migration {}", artifact.file_name()),
        (_, Outcome::Created) => format!(
            "Created {}: {}",
            artifact.description(),
            artifact.path.display()
        ),
        (_, Outcome::Appended) => format!(
            "Appended {} to {}",
            artifact.description(),
            artifact.path.display()
        ),
        (_, Outcome::Skipped) => format!(
            "Skipped {}: already present in {}",
            artifact.description(),
            artifact.path.display()
        ),
    }
}

fn print_report(report: &RunReport) {
    for artifact in &report.artifacts {
        let marker = if artifact.outcome == Outcome::Skipped {
            style("•").yellow()
        } else {
            style("✓").green()
        };
        println!("  {marker} {}", artifact_message(artifact));
    }

    for warning in &report.warnings {
        println!("  {} {}", style("!").yellow(), style(warning).yellow());
    }

    if let Some(error) = &report.halted {
        println!("\n{} {}", style("✗").red().bold(), style(error).red().bold());
        return;
    }

    println!(
        "\n{} Resource {} is ready!",
        style("✨").green().bold(),
        style(&report.names.class).green().bold()
    );

    println!("\n{}", style("Next steps:").cyan().bold());
    println!("  1. Run the migration: {}", style("php artisan migrate").yellow());
    println!(
        "  2. Review the generated routes: {}",
        style(format!("php artisan route:list --name={}", report.names.route)).yellow()
    );
    if report.artifact(Step::AppendFactory).is_some() {
        println!(
            "  3. Seed test data: {}",
            style(format!("factory({}::class, 10)->create()", report.names.class)).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_artifact_messages() {
        let migration = Artifact {
            step: Step::CreateMigration,
            path: PathBuf::from("database/migrations/date_create_chimps_table.php"),
            outcome: Outcome::Created,
        };
        assert_eq!(
            artifact_message(&migration),
            "Created migration date_create_chimps_table.php"
        );

        let model = Artifact {
            step: Step::CreateModel,
            path: PathBuf::from("app/Chimp.php"),
            outcome: Outcome::Created,
        };
        assert_eq!(artifact_message(&model), "Created model: app/Chimp.php");

        let routes = Artifact {
            step: Step::AppendRoutes,
            path: PathBuf::from("app/Http/routes.php"),
            outcome: Outcome::Skipped,
        };
        assert_eq!(
            artifact_message(&routes),
            "Skipped route block: already present in app/Http/routes.php"
        );
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempdir().unwrap();
        let command = ResourceCommand::new("Tiger".to_string(), None)
            .with_settings(GeneratorConfig::default())
            .without_factory(true)
            .guard_routes(true);
        let config = command.resolve_config(dir.path()).unwrap();

        assert!(!config.generate.factory);
        assert!(config.generate.guard_duplicate_routes);
    }

    #[test]
    fn test_settings_are_used_as_given() {
        let dir = tempdir().unwrap();
        let mut settings = GeneratorConfig::default();
        settings.layout.namespace = "Zoo".to_string();

        let config = ResourceCommand::new("Tiger".to_string(), None)
            .with_settings(settings.clone())
            .resolve_config(dir.path())
            .unwrap();
        assert_eq!(config, settings);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let command = ResourceCommand::new("Tiger".to_string(), None)
            .with_config(Some(dir.path().join("missing.toml")));
        assert!(command.resolve_config(dir.path()).is_err());
    }
}
