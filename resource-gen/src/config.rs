//! Configuration management for resource-gen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `RESOURCE_GEN_` prefix, `__` for nesting)
//! 2. `./resource-gen.toml` in the project root (or an explicit `--config` file)
//! 3. `~/.config/resource-gen/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # resource-gen.toml
//! [layout]
//! namespace = "App"
//! model_dir = "app"
//! migrations_dir = "database/migrations"
//! controllers_dir = "app/Http/Controllers"
//! routes_file = "app/Http/routes.php"
//! factory_file = "database/factories/ModelFactory.php"
//! stubs_dir = "app/Stubs"
//!
//! [generate]
//! factory = true
//! guard_duplicate_routes = false
//!
//! [autoload]
//! command = ["composer", "dump-autoload"]
//! ```

use anyhow::Context;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "resource-gen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RESOURCE_GEN_";

/// Where generated files go inside the host project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Root namespace of application classes
    pub namespace: String,

    /// Directory for model classes
    pub model_dir: PathBuf,

    /// Directory for migrations
    pub migrations_dir: PathBuf,

    /// Directory for controllers
    pub controllers_dir: PathBuf,

    /// Routes file that receives the route block
    pub routes_file: PathBuf,

    /// Model factory file that receives the factory block
    pub factory_file: PathBuf,

    /// Directory searched for `<kind>.stub` overrides
    pub stubs_dir: PathBuf,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            namespace: "App".to_string(),
            model_dir: PathBuf::from("app"),
            migrations_dir: PathBuf::from("database/migrations"),
            controllers_dir: PathBuf::from("app/Http/Controllers"),
            routes_file: PathBuf::from("app/Http/routes.php"),
            factory_file: PathBuf::from("database/factories/ModelFactory.php"),
            stubs_dir: PathBuf::from("app/Stubs"),
        }
    }
}

/// Optional generation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    /// Append a model factory definition after the routes
    pub factory: bool,

    /// Skip the route block when the routes file already contains it
    pub guard_duplicate_routes: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            factory: true,
            guard_duplicate_routes: false,
        }
    }
}

/// Autoloader regeneration after a migration is written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoloadSettings {
    /// Command line to run in the project root; no command disables the hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

/// Complete resource-gen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project layout
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Optional steps
    #[serde(default)]
    pub generate: GenerateSettings,

    /// Autoload hook
    #[serde(default)]
    pub autoload: AutoloadSettings,
}

impl GeneratorConfig {
    /// Load configuration for a project
    ///
    /// Searches, lowest precedence first: defaults, the user config file,
    /// `<project_root>/resource-gen.toml`, then `RESOURCE_GEN_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let files = Self::config_files(Some(Self::recommended_path()), project_root);
        Self::extract(Self::figment(&files)?)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, contains invalid TOML, or
    /// holds values of the wrong type.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }
        Self::extract(Self::figment(&[path.to_path_buf()])?)
    }

    /// Load configuration from defaults and `files` only, ignoring the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a file contains invalid TOML or values of the wrong type.
    pub fn from_files(files: &[PathBuf]) -> anyhow::Result<Self> {
        Self::extract(Self::file_layers(files)?)
    }

    /// Build the layered figment for the given files, in increasing precedence,
    /// with `RESOURCE_GEN_*` environment variables on top
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration cannot be serialized.
    pub fn figment(files: &[PathBuf]) -> anyhow::Result<Figment> {
        Ok(Self::file_layers(files)?.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true)))
    }

    /// Existing configuration files for a project, lowest precedence first
    #[must_use]
    pub fn config_files(user_config: Option<PathBuf>, project_root: &Path) -> Vec<PathBuf> {
        user_config
            .into_iter()
            .chain(std::iter::once(project_root.join(PROJECT_CONFIG_FILE)))
            .filter(|path| path.is_file())
            .collect()
    }

    fn file_layers(files: &[PathBuf]) -> anyhow::Result<Figment> {
        let defaults =
            toml::to_string(&Self::default()).context("Failed to serialize default configuration")?;

        let mut figment = Figment::new().merge(Toml::string(&defaults));
        for file in files {
            tracing::debug!(path = %file.display(), "loading configuration file");
            figment = figment.merge(Toml::file(file));
        }
        Ok(figment)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/resource-gen/config.toml` on Linux.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join("resource-gen").join("config.toml"),
        )
    }

    fn extract(figment: Figment) -> anyhow::Result<Self> {
        figment
            .extract()
            .context("Invalid resource-gen configuration")
    }
}
