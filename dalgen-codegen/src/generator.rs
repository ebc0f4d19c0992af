//! The per-descriptor pipeline and pass runner.
//!
//! Each descriptor flows resolution → analysis → synthesis + classification
//! → emission, reading only its own data and the shared read-only project
//! configuration. A catch-all boundary wraps the whole sequence so one
//! malformed descriptor degrades to a diagnostic instead of aborting the
//! pass. Identical resolved input always produces byte-identical artifact
//! text; the incremental cache depends on that.

use std::{
    collections::HashSet,
    panic::{AssertUnwindSafe, catch_unwind},
};

use dalgen_descriptor::{CommandDescriptor, ProjectConfig, RawCommandDescriptor, resolve};
use serde::Serialize;

use crate::{
    analyze::Analyzer,
    cache::{CacheStatus, GenerationCache, cache_key},
    classify::classify,
    diagnostic::{Diagnostic, DiagnosticCode},
    emit::{GeneratedArtifact, handler_artifact, projection_artifact},
    synthesize::synthesize,
};

/// The outcome for one descriptor in a pass.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorOutput {
    /// Fully scoped descriptor name.
    pub name: String,
    /// Relation to the previous pass.
    pub status: CacheStatus,
    /// Diagnostics attached to this descriptor.
    pub diagnostics: Vec<Diagnostic>,
    /// Generated artifacts; empty when an error suppressed emission.
    pub artifacts: Vec<GeneratedArtifact>,
}

/// The outcome of one generation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
    /// Per-descriptor outcomes, in submission order.
    pub outputs: Vec<DescriptorOutput>,
    /// Identities seen in the prior pass but absent from this one.
    pub removed: Vec<String>,
}

impl PassReport {
    /// Returns true if any descriptor reported an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(|d| d.severity.is_error())
    }

    /// All diagnostics across the pass.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outputs.iter().flat_map(|o| o.diagnostics.iter())
    }

    /// All artifacts across the pass.
    pub fn artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.outputs.iter().flat_map(|o| o.artifacts.iter())
    }
}

/// Drives generation passes and owns the incremental cache.
pub struct Generator {
    config: ProjectConfig,
    analyzer: Analyzer,
    cache: GenerationCache,
}

impl Generator {
    /// Create a generator with the given project configuration.
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            analyzer: Analyzer::new(),
            cache: GenerationCache::new(),
        }
    }

    /// The project configuration in effect.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Run one generation pass over the descriptors of a discovery sweep.
    pub fn run_pass(&self, descriptors: &[RawCommandDescriptor]) -> PassReport {
        tracing::debug!(descriptors = descriptors.len(), "starting generation pass");

        let mut outputs = Vec::with_capacity(descriptors.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(descriptors.len());

        for raw in descriptors {
            let output = self.process(raw);
            tracing::debug!(
                descriptor = %output.name,
                status = ?output.status,
                diagnostics = output.diagnostics.len(),
                "descriptor processed"
            );
            if output.diagnostics.iter().any(|d| d.severity.is_error()) {
                tracing::warn!(
                    descriptor = %output.name,
                    "errors reported; artifact production suppressed"
                );
            }
            seen.insert(output.name.clone());
            outputs.push(output);
        }

        let removed = self.cache.evict_absent(&seen);
        for identity in &removed {
            tracing::debug!(descriptor = %identity, "removed from cache");
        }

        PassReport { outputs, removed }
    }

    /// Process a single descriptor through the full pipeline.
    fn process(&self, raw: &RawCommandDescriptor) -> DescriptorOutput {
        let descriptor = resolve(raw, &self.config);
        let identity = descriptor.scoped_name();
        let key = cache_key(&descriptor);

        if let Some((artifacts, diagnostics)) = self.cache.lookup(&identity, key) {
            return DescriptorOutput {
                name: identity,
                status: CacheStatus::Unchanged,
                diagnostics,
                artifacts,
            };
        }

        let (diagnostics, artifacts) =
            match catch_unwind(AssertUnwindSafe(|| self.build(&descriptor, key))) {
                Ok(result) => result,
                Err(payload) => {
                    let diagnostic = Diagnostic::new(
                        DiagnosticCode::UnexpectedFailure,
                        format!("internal failure: {}", panic_message(payload.as_ref())),
                        identity.clone(),
                    );
                    (vec![diagnostic], Vec::new())
                }
            };

        self.cache.store(
            identity.clone(),
            key,
            artifacts.clone(),
            diagnostics.clone(),
        );

        DescriptorOutput {
            name: identity,
            status: CacheStatus::Modified,
            diagnostics,
            artifacts,
        }
    }

    /// Analysis, synthesis, classification, and emission for one resolved
    /// descriptor.
    fn build(
        &self,
        descriptor: &CommandDescriptor,
        key: u64,
    ) -> (Vec<Diagnostic>, Vec<GeneratedArtifact>) {
        let diagnostics = self.analyzer.analyze(descriptor);
        if diagnostics.iter().any(|d| d.severity.is_error()) {
            return (diagnostics, Vec::new());
        }

        let mut artifacts = vec![projection_artifact(descriptor, key)];

        // Synthesis and classification run only when a command source is
        // present; the analyzer has already guaranteed exclusivity and a
        // declared capability by this point.
        if let Some(source) = descriptor.sources.single() {
            let names: Vec<&str> = descriptor
                .projected_parameters()
                .map(|p| p.resolved_name.as_str())
                .collect();
            let command = synthesize(source, &names);
            if let Some(strategy) = classify(descriptor.non_query, descriptor.result.as_ref()) {
                artifacts.push(handler_artifact(descriptor, &command, &strategy, key));
            }
        }

        (diagnostics, artifacts)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
