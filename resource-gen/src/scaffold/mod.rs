//! CRUD resource scaffolding for Laravel projects
//!
//! Turns a resource name and an attribute string such as
//! `name:string,100,fillable|password:string,hidden` into a model, a migration,
//! a controller, a route block and a factory definition.

pub mod attributes;
pub mod columns;
pub mod generator;
pub mod helpers;
pub mod hooks;
pub mod store;
pub mod stubs;
pub mod templates;

pub use attributes::{AttributeSpec, Attributes, ParsedRequest, Tag};
pub use columns::{ColumnSpec, ColumnTrait, FieldType};
pub use generator::{Artifact, Outcome, ResourceGenerator, RunReport, Step};
pub use helpers::{InflectorNamer, Namer, ResourceNames};
pub use hooks::{AutoloadHook, Clock, CommandAutoload, NoopAutoload, SystemClock};
pub use store::{FileStore, LocalFileStore, MemoryFileStore};
pub use templates::{Slot, Substitutions, Template};
