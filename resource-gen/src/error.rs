//! Error types and error handling

use crate::scaffold::generator::Step;
use crate::scaffold::store::StoreError;
use crate::scaffold::templates::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one generator step
///
/// Any of these halts the run. Steps completed before the failure are kept.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The artifact a create step would write is already present
    #[error("{step} already exists!")]
    AlreadyExists {
        /// The step that refused to overwrite
        step: Step,
        /// Project-relative path of the existing file
        path: PathBuf,
    },

    /// The resource name cannot be used as a class or file name
    #[error("Invalid resource name '{name}': {reason}")]
    InvalidName {
        /// Name as given
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Reading or writing a project file failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stub could not be rendered
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl GeneratorError {
    /// Whether this is a name collision rather than an I/O or template failure
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
