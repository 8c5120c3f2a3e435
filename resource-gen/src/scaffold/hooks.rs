//! External collaborators invoked by the generator
//!
//! - [`AutoloadHook`] runs after a migration is written so the host project can
//!   pick up the new class (for Laravel, `composer dump-autoload`).
//! - [`Clock`] supplies the timestamp prefix of migration file names.

use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

/// Autoload hook errors
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook has an empty command line
    #[error("Autoload command is empty")]
    EmptyCommand,

    /// The process could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully
    #[error("'{program}' exited with {status}")]
    Failed {
        /// Program name
        program: String,
        /// Exit status description
        status: String,
    },
}

/// Regenerates the host project's class autoloader
#[cfg_attr(test, mockall::automock)]
pub trait AutoloadHook: Send + Sync {
    /// Run the regeneration
    ///
    /// # Errors
    ///
    /// Returns an error if the regeneration could not be performed.
    fn regenerate(&self) -> Result<(), HookError>;
}

/// Hook that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAutoload;

impl AutoloadHook for NoopAutoload {
    fn regenerate(&self) -> Result<(), HookError> {
        tracing::debug!("autoload regeneration disabled");
        Ok(())
    }
}

/// Hook that runs an external command in the project root
#[derive(Debug, Clone)]
pub struct CommandAutoload {
    argv: Vec<String>,
    cwd: PathBuf,
}

impl CommandAutoload {
    /// Create a hook running `argv` (program first) inside `cwd`
    pub fn new(argv: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            argv,
            cwd: cwd.into(),
        }
    }
}

impl AutoloadHook for CommandAutoload {
    fn regenerate(&self) -> Result<(), HookError> {
        let (program, args) = self.argv.split_first().ok_or(HookError::EmptyCommand)?;

        tracing::info!(program, ?args, cwd = %self.cwd.display(), "regenerating autoloader");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|source| HookError::Spawn {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "autoload command failed"
            );
            Err(HookError::Failed {
                program: program.clone(),
                status: output.status.to_string(),
            })
        }
    }
}

/// Source of migration timestamp prefixes
pub trait Clock: Send + Sync {
    /// Prefix for the next migration file name
    fn migration_prefix(&self) -> String;
}

/// Local wall clock, formatted `YYYY_MM_DD_HHMMSS`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn migration_prefix(&self) -> String {
        chrono::Local::now().format("%Y_%m_%d_%H%M%S").to_string()
    }
}

/// Clock that always returns the same prefix
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    /// Create a clock returning `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl Clock for FixedClock {
    fn migration_prefix(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_format() {
        let prefix = SystemClock.migration_prefix();
        let parts: Vec<&str> = prefix.split('_').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
        assert_eq!(parts[3].len(), 6);
        assert!(prefix.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock::new("date").migration_prefix(), "date");
    }

    #[test]
    fn test_noop_hook() {
        assert!(NoopAutoload.regenerate().is_ok());
    }

    #[test]
    fn test_empty_command() {
        let hook = CommandAutoload::new(vec![], ".");
        assert!(matches!(hook.regenerate(), Err(HookError::EmptyCommand)));
    }

    #[test]
    fn test_missing_program() {
        let hook = CommandAutoload::new(
            vec!["resource-gen-definitely-not-a-program".to_string()],
            std::env::temp_dir(),
        );
        assert!(matches!(hook.regenerate(), Err(HookError::Spawn { .. })));
    }
}
