//! # zod-doc-cli
//!
//! CLI tool for converting exported Zod schema documents into documentation
//! models.
//!
//! This crate provides the command-line interface and the building blocks
//! behind it:
//!
//! - [`config`]: Configuration file loading and CLI overrides
//! - [`pipeline`]: Loading, converting and rendering schema documents
//! - [`writer`]: Output file writing with dry-run support
//! - [`error`]: Error types and exit codes

pub mod config;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use config::{CliArgs, Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use writer::{FileWriter, WriteResult};
