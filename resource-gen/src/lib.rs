//! resource-gen: CRUD resource scaffolding for Laravel projects
//!
//! One command produces the files a new resource needs:
//! - **Model** with mass-assignment (`fillable`) and serialization (`hidden`) lists
//! - **Migration** with one column per attribute
//! - **Resource controller**
//! - **Route block** appended to the routes file
//! - **Factory definition** appended to the model factory file
//!
//! # Attribute Syntax
//!
//! Attributes are separated by `|`; each is `name:prop,prop,...`. Properties pick
//! the column type (`string`, `integer`, ...), a length for `string`/`char`, column
//! traits (`unsigned`, `index`, `nullable`) and model tags (`fillable`, `hidden`).
//!
//! ```
//! use resource_gen::scaffold::{
//!     generator::ResourceGenerator, hooks::FixedClock, store::MemoryFileStore, ParsedRequest,
//! };
//! use resource_gen::scaffold::store::FileStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryFileStore::new());
//! let generator = ResourceGenerator::new(store.clone()).with_clock(FixedClock::new("date"));
//!
//! let request = ParsedRequest::new("Animal", Some("name:string,100,fillable|age:integer"));
//! let report = generator.run(&request);
//!
//! assert!(report.is_success());
//! assert!(store.exists(Path::new("database/migrations/date_create_animals_table.php")));
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
