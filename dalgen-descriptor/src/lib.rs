// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Descriptor schema, manifest parsing, and metadata resolution for the
//! dalgen data-access generator.
//!
//! # Architecture
//!
//! ```text
//! dalgen.toml / builder API → raw schema → resolve → CommandDescriptor → codegen
//! ```
//!
//! The raw schema mirrors the external annotation format, including its
//! inability to enforce command-source exclusivity; the resolved descriptor
//! is the unified representation the generation pipeline consumes. Both are
//! produced fresh on every discovery pass and never mutated in place.

mod config;
mod descriptor;
mod error;
mod manifest;
mod resolve;
mod schema;

pub use config::ProjectConfig;
pub use descriptor::{
    CommandDescriptor, CommandSource, CommandSources, NamingConvention, ParameterDescriptor,
    ResultContract, ResultType,
};
pub use error::{Error, Result};
pub use manifest::DescriptorManifest;
pub use resolve::resolve;
pub use schema::{RawCommandDescriptor, RawParameter, RawResultContract, ResultKind};
