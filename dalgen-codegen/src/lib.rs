//! Generation pipeline for the dalgen data-access generator.
//!
//! Given resolved command descriptors, this crate validates them, builds
//! command text, selects an execution strategy from the declared result
//! shape, and emits the parameter-projection and handler artifacts, with
//! incremental re-computation across passes.
//!
//! # Module Organization
//!
//! - [`diagnostic`] - Typed diagnostics (stable code catalog, severities)
//! - [`analyze`] - Validation rules over resolved descriptors
//! - [`synthesize`] - Command-text synthesis per source kind
//! - [`classify`] - Execution-strategy selection from result shape
//! - [`emit`] - Nesting-preserving artifact emission
//! - [`cache`] - Content-hash incremental cache
//! - [`generator`] - The per-descriptor pipeline and pass runner
//!
//! # Example
//!
//! ```
//! use dalgen_codegen::Generator;
//! use dalgen_descriptor::{ProjectConfig, RawCommandDescriptor, RawParameter};
//!
//! let generator = Generator::new(ProjectConfig::new());
//! let report = generator.run_pass(&[
//!     RawCommandDescriptor::new("CreateUser")
//!         .procedure("create_user")
//!         .non_query()
//!         .command_returning("i32")
//!         .parameter(RawParameter::new("user_id")),
//! ]);
//! assert!(!report.has_errors());
//! assert_eq!(report.outputs[0].artifacts.len(), 2);
//! ```

pub mod analyze;
pub mod cache;
pub mod classify;
pub mod diagnostic;
pub mod emit;
pub mod generator;
pub mod synthesize;

pub use analyze::{Analyzer, Check};
pub use cache::{CacheStatus, GenerationCache, cache_key};
pub use classify::{ExecutionStrategy, classify};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use emit::{ArtifactKind, GeneratedArtifact};
pub use generator::{DescriptorOutput, Generator, PassReport};
pub use synthesize::{CommandText, ExecutionMode, synthesize};
