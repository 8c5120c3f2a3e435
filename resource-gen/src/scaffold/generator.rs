//! Resource generator orchestrator
//!
//! Runs the steps of one `make:resource` invocation in a fixed order:
//!
//! 1. Model (`app/<Class>.php`)
//! 2. Migration (`database/migrations/<prefix>_create_<table>_table.php`), then the
//!    autoload hook
//! 3. Controller (`app/Http/Controllers/<Class>Controller.php`)
//! 4. Route block appended to the routes file
//! 5. Factory block appended to the model factory file (when enabled)
//!
//! The create steps refuse to overwrite an existing file. The first failing step
//! halts the run; files written by earlier steps stay in place.

use super::attributes::{php_string_list, Attributes, ParsedRequest, Tag};
use super::columns::{build_columns, build_factory_fields};
use super::helpers::{InflectorNamer, Namer, ResourceNames};
use super::hooks::{AutoloadHook, Clock, NoopAutoload, SystemClock};
use super::stubs::{StubKind, StubSet};
use super::store::FileStore;
use super::templates::{Slot, Substitutions, Template};
use crate::config::{GenerateSettings, LayoutSettings};
use crate::error::GeneratorError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One step of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Write the model class
    CreateModel,
    /// Write the migration class
    CreateMigration,
    /// Write the controller class
    CreateController,
    /// Append the route block
    AppendRoutes,
    /// Append the factory block
    AppendFactory,
}

impl Step {
    /// Label used in operator messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateModel => "Model",
            Self::CreateMigration => "Migration",
            Self::CreateController => "Controller",
            Self::AppendRoutes => "Routes",
            Self::AppendFactory => "Factory",
        }
    }

    /// Stub rendered by this step
    #[must_use]
    pub const fn stub(self) -> StubKind {
        match self {
            Self::CreateModel => StubKind::Model,
            Self::CreateMigration => StubKind::Migration,
            Self::CreateController => StubKind::Controller,
            Self::AppendRoutes => StubKind::Routes,
            Self::AppendFactory => StubKind::Factory,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a step did to its file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new file was written
    Created,
    /// A block was appended
    Appended,
    /// Nothing was written because the block was already present
    Skipped,
}

/// A file touched by a completed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The step that produced it
    pub step: Step,
    /// Project-relative path
    pub path: PathBuf,
    /// What happened
    pub outcome: Outcome,
}

impl Artifact {
    /// Short description for console output (`model`, `route block`)
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self.step {
            Step::CreateModel => "model",
            Step::CreateMigration => "migration",
            Step::CreateController => "controller",
            Step::AppendRoutes => "route block",
            Step::AppendFactory => "factory definition",
        }
    }

    /// File name of the artifact
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }
}

/// Result of one run
///
/// Runs never return an error; a failed step is recorded in `halted`.
#[derive(Debug)]
pub struct RunReport {
    /// Names derived from the request
    pub names: ResourceNames,
    /// Completed steps in order
    pub artifacts: Vec<Artifact>,
    /// Non-fatal problems (autoload hook failures)
    pub warnings: Vec<String>,
    /// The error that stopped the run, if any
    pub halted: Option<GeneratorError>,
}

impl RunReport {
    fn new(names: ResourceNames) -> Self {
        Self {
            names,
            artifacts: Vec::new(),
            warnings: Vec::new(),
            halted: None,
        }
    }

    /// Whether every step completed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.halted.is_none()
    }

    /// Artifact produced by `step`, if it ran
    #[must_use]
    pub fn artifact(&self, step: Step) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.step == step)
    }

    fn record(&mut self, step: Step, path: PathBuf, outcome: Outcome) {
        tracing::info!(%step, path = %path.display(), ?outcome, "step complete");
        self.artifacts.push(Artifact { step, path, outcome });
    }
}

/// Generates the files of a CRUD resource into a project
pub struct ResourceGenerator {
    store: Arc<dyn FileStore>,
    namer: Box<dyn Namer>,
    clock: Box<dyn Clock>,
    autoload: Box<dyn AutoloadHook>,
    layout: LayoutSettings,
    options: GenerateSettings,
}

impl fmt::Debug for ResourceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceGenerator")
            .field("layout", &self.layout)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ResourceGenerator {
    /// Create a generator writing through `store`
    ///
    /// Uses the default layout, the Inflector naming rules, the system clock and
    /// no autoload hook.
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            namer: Box::new(InflectorNamer),
            clock: Box::new(SystemClock),
            autoload: Box::new(NoopAutoload),
            layout: LayoutSettings::default(),
            options: GenerateSettings::default(),
        }
    }

    /// Replace the naming rules
    #[must_use]
    pub fn with_namer(mut self, namer: impl Namer + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    /// Replace the migration clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the autoload hook
    #[must_use]
    pub fn with_autoload(mut self, autoload: Box<dyn AutoloadHook>) -> Self {
        self.autoload = autoload;
        self
    }

    /// Replace the project layout
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the optional step settings
    #[must_use]
    pub const fn with_options(mut self, options: GenerateSettings) -> Self {
        self.options = options;
        self
    }

    /// Run every step for `request`
    pub fn run(&self, request: &ParsedRequest) -> RunReport {
        let names = ResourceNames::derive(&request.resource_name, self.namer.as_ref());
        tracing::info!(
            resource = %names.class,
            table = %names.table,
            attributes = request.attributes.len(),
            "generating resource"
        );

        let mut report = RunReport::new(names);
        if let Err(error) = self.run_steps(request, &mut report) {
            tracing::warn!(%error, "generation halted");
            report.halted = Some(error);
        }
        report
    }

    fn run_steps(
        &self,
        request: &ParsedRequest,
        report: &mut RunReport,
    ) -> Result<(), GeneratorError> {
        ResourceNames::validate(&request.resource_name)?;

        let stubs = StubSet::load(self.store.as_ref(), &self.layout.stubs_dir)?;
        let substitutions = self.substitutions(request, &report.names);
        let names = report.names.clone();

        let model_path = self.layout.model_dir.join(names.model_file());
        self.create(Step::CreateModel, &model_path, &stubs, &substitutions)?;
        report.record(Step::CreateModel, model_path, Outcome::Created);

        let migration_path = self
            .layout
            .migrations_dir
            .join(names.migration_file(&self.clock.migration_prefix()));
        self.create(Step::CreateMigration, &migration_path, &stubs, &substitutions)?;
        report.record(Step::CreateMigration, migration_path, Outcome::Created);

        if let Err(error) = self.autoload.regenerate() {
            tracing::warn!(%error, "autoload regeneration failed");
            report
                .warnings
                .push(format!("Autoload regeneration failed: {error}"));
        }

        let controller_path = self.layout.controllers_dir.join(names.controller_file());
        self.create(Step::CreateController, &controller_path, &stubs, &substitutions)?;
        report.record(Step::CreateController, controller_path, Outcome::Created);

        let routes_path = self.layout.routes_file.clone();
        let outcome = self.append(
            Step::AppendRoutes,
            &routes_path,
            &stubs,
            &substitutions,
            self.options.guard_duplicate_routes,
        )?;
        report.record(Step::AppendRoutes, routes_path, outcome);

        if self.options.factory {
            let factory_path = self.layout.factory_file.clone();
            let outcome =
                self.append(Step::AppendFactory, &factory_path, &stubs, &substitutions, false)?;
            report.record(Step::AppendFactory, factory_path, outcome);
        }

        Ok(())
    }

    /// Values for every slot of every stub
    fn substitutions(&self, request: &ParsedRequest, names: &ResourceNames) -> Substitutions {
        let attributes = &request.attributes;
        Substitutions::new()
            .with(Slot::Namespace, self.layout.namespace.as_str())
            .with(Slot::Class, names.class.as_str())
            .with(Slot::Table, names.table.as_str())
            .with(Slot::MigrationClass, names.migration_class.as_str())
            .with(Slot::Columns, build_columns(attributes))
            .with(
                Slot::Fillable,
                php_string_list(&request.select_by_tag(Tag::Fillable)),
            )
            .with(
                Slot::Hidden,
                php_string_list(&request.select_by_tag(Tag::Hidden)),
            )
            .with(
                Slot::MigrationAttributes,
                Attributes::from(attributes.as_slice()).to_php_array(),
            )
            .with(Slot::Controller, names.controller.as_str())
            .with(Slot::Instance, names.instance.as_str())
            .with(Slot::Route, names.route.as_str())
            .with(Slot::FactoryFields, build_factory_fields(attributes))
    }

    fn create(
        &self,
        step: Step,
        path: &Path,
        stubs: &StubSet,
        substitutions: &Substitutions,
    ) -> Result<(), GeneratorError> {
        if self.store.exists(path) {
            return Err(GeneratorError::AlreadyExists {
                step,
                path: path.to_path_buf(),
            });
        }

        let contents = render(stubs.get(step.stub()), substitutions)?;
        tracing::debug!(%step, path = %path.display(), bytes = contents.len(), "writing file");
        self.store.write(path, &contents)?;
        Ok(())
    }

    fn append(
        &self,
        step: Step,
        path: &Path,
        stubs: &StubSet,
        substitutions: &Substitutions,
        guard: bool,
    ) -> Result<Outcome, GeneratorError> {
        let block = render(stubs.get(step.stub()), substitutions)?;

        if guard && self.store.exists(path) {
            let existing = self.store.read(path)?;
            if existing.contains(block.trim()) {
                tracing::info!(%step, path = %path.display(), "block already present, skipping");
                return Ok(Outcome::Skipped);
            }
        }

        tracing::debug!(%step, path = %path.display(), bytes = block.len(), "appending block");
        self.store.append(path, &block)?;
        Ok(Outcome::Appended)
    }
}

fn render(template: &Template, substitutions: &Substitutions) -> Result<String, GeneratorError> {
    Ok(template.render(substitutions)?)
}
