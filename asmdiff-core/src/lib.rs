//! asmdiff core - structural diff engine for compiled modules.
//!
//! Compares two versions of a module's symbol model (its types and their
//! methods, fields, properties and events) and reports what was added, removed
//! or modified. Used to check that a rebuild introduced only the intended
//! API/ABI changes.
//!
//! # Features
//!
//! - **Type and member diffing**: exact signature identity, declaring type included
//! - **Uniquely keyed change sets**: member changes nested under their type
//! - **Batch mode**: diff matched module files across two directory trees in parallel
//! - **Pluggable readers**: symbol models come from any [`reader::ModuleReader`]
//!
//! # Usage
//!
//! ```no_run
//! use asmdiff_core::batch::{diff_directories, BatchOptions};
//! use asmdiff_core::reader::JsonModuleReader;
//! use std::path::Path;
//!
//! let report = diff_directories(
//!     &JsonModuleReader::new(),
//!     Path::new("build/v1"),
//!     Path::new("build/v2"),
//!     &BatchOptions::default(),
//! )?;
//! println!("{}", report.summary.text());
//! # Ok::<(), asmdiff_core::error::DiffError>(())
//! ```

pub mod batch;
pub mod differ;
pub mod error;
pub mod identity;
pub mod reader;
pub mod types;

pub use batch::{diff_directories, discover_modules, BatchOptions, BatchReport, DiscoveryOptions};
pub use differ::{diff_modules, diff_types, BatchSummary, ChangeKind, ChangeRecord, ChangeSet};
pub use error::{DiffError, LoadError};
pub use reader::{JsonModuleReader, ModuleReader};
