//! Nesting-preserving artifact emission.
//!
//! Artifacts are text only: no I/O happens here and inputs are never
//! mutated. Bodies target a small host runtime facade (`DataSource`,
//! `SqlCommand`, `CommandParameters`, `CancellationToken`,
//! `DataAccessError`) that the embedding project brings into scope;
//! correctness of the emitted call against a live database is an external
//! concern. Each body is wrapped in the descriptor's enclosing scope chain
//! so the generated code nests exactly like the source declaration.

mod handler;
mod projection;
mod writer;

use dalgen_descriptor::CommandDescriptor;
use serde::Serialize;

pub use writer::{SourceBuilder, wrap_in_scopes};

use crate::{classify::ExecutionStrategy, synthesize::CommandText};

/// The kind of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    /// The parameter-projection construct.
    ParameterProjection,
    /// The asynchronous command handler.
    Handler,
}

/// One generated code artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    /// What the artifact is.
    pub kind: ArtifactKind,
    /// Enclosing scope chain, copied verbatim from the descriptor.
    pub scopes: Vec<String>,
    /// The emitted text, already wrapped in the scope chain.
    pub body: String,
    /// Hash of every descriptor field that influences the emitted text.
    /// Equality is both necessary and sufficient for body equality.
    pub cache_key: u64,
}

/// Emit the parameter-projection artifact.
pub fn projection_artifact(descriptor: &CommandDescriptor, cache_key: u64) -> GeneratedArtifact {
    let body = projection::projection_body(descriptor);
    GeneratedArtifact {
        kind: ArtifactKind::ParameterProjection,
        scopes: descriptor.scopes.clone(),
        body: wrap_in_scopes(&descriptor.scopes, &body),
        cache_key,
    }
}

/// Emit the command-handler artifact.
pub fn handler_artifact(
    descriptor: &CommandDescriptor,
    command: &CommandText,
    strategy: &ExecutionStrategy,
    cache_key: u64,
) -> GeneratedArtifact {
    let body = handler::handler_body(descriptor, command, strategy);
    GeneratedArtifact {
        kind: ArtifactKind::Handler,
        scopes: descriptor.scopes.clone(),
        body: wrap_in_scopes(&descriptor.scopes, &body),
        cache_key,
    }
}

#[cfg(test)]
mod tests {
    use dalgen_descriptor::{ProjectConfig, RawCommandDescriptor, RawParameter, resolve};

    use super::*;

    #[test]
    fn test_projection_artifact_nests_in_scopes() {
        let raw = RawCommandDescriptor::new("CreateUser")
            .scope("app")
            .scope("users")
            .parameter(RawParameter::new("UserId").override_name("uid"));
        let descriptor = resolve(&raw, &ProjectConfig::new());

        let artifact = projection_artifact(&descriptor, 7);
        assert_eq!(artifact.kind, ArtifactKind::ParameterProjection);
        assert_eq!(artifact.scopes, vec!["app", "users"]);
        assert_eq!(artifact.cache_key, 7);
        assert!(artifact.body.starts_with("pub mod app {\n    pub mod users {\n"));
        assert!(artifact.body.contains("        impl CreateUser {"));
        assert!(artifact.body.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_unscoped_artifact_has_no_wrapper() {
        let raw = RawCommandDescriptor::new("CreateUser");
        let descriptor = resolve(&raw, &ProjectConfig::new());

        let artifact = projection_artifact(&descriptor, 0);
        assert!(artifact.body.starts_with("impl CreateUser {"));
    }
}
