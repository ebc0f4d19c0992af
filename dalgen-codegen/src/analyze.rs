//! Semantic validation of resolved descriptors.
//!
//! The analyzer runs independent rule objects against one descriptor at a
//! time. Rules are additive: every rule runs regardless of what earlier
//! rules found, so a descriptor reports all of its problems in one pass.
//! Only error-severity findings suppress synthesis and emission, and only
//! for the descriptor that produced them.

use dalgen_core::{is_valid_callable_name, strip_call_marker};
use dalgen_descriptor::CommandDescriptor;

use crate::diagnostic::{Diagnostic, DiagnosticCode};

/// A validation rule over a resolved descriptor.
pub trait Check: Send + Sync {
    /// The name of this check.
    fn name(&self) -> &'static str;

    /// Inspect the descriptor and add any diagnostics.
    fn check(&self, descriptor: &CommandDescriptor, diagnostics: &mut Vec<Diagnostic>);
}

/// Runs validation checks against resolved descriptors.
pub struct Analyzer {
    checks: Vec<Box<dyn Check>>,
}

impl Analyzer {
    /// Create an analyzer with the built-in checks.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(NonQueryResultCheck),
                Box::new(ResultCapabilityCheck),
                Box::new(ExclusiveSourcesCheck),
                Box::new(FunctionIdentifierCheck),
            ],
        }
    }

    /// Create an analyzer with no checks.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a custom check.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Run every check; diagnostics accumulate across rules.
    pub fn analyze(&self, descriptor: &CommandDescriptor) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for check in &self.checks {
            check.check(descriptor, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Warns when a non-query descriptor declares a result type that is not an
/// integral numeric: non-query execution returns an affected-row count, so
/// anything else is likely a mistake, not fatal.
pub struct NonQueryResultCheck;

impl Check for NonQueryResultCheck {
    fn name(&self) -> &'static str {
        "non-query-result"
    }

    fn check(&self, descriptor: &CommandDescriptor, diagnostics: &mut Vec<Diagnostic>) {
        if !descriptor.non_query {
            return;
        }
        if let Some(contract) = &descriptor.result {
            let ty = contract.result_type();
            if !ty.is_integral() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::NonQueryResultMismatch,
                    format!(
                        "non-query command declares result type '{}'; non-query execution returns an affected-row count",
                        ty.declared()
                    ),
                    descriptor.scoped_name(),
                ));
            }
        }
    }
}

/// Errors when a command source is set without any declared capability:
/// there is no invocable shape to generate a handler against.
pub struct ResultCapabilityCheck;

impl Check for ResultCapabilityCheck {
    fn name(&self) -> &'static str {
        "result-capability"
    }

    fn check(&self, descriptor: &CommandDescriptor, diagnostics: &mut Vec<Diagnostic>) {
        if !descriptor.sources.is_empty() && descriptor.result.is_none() {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::MissingResultCapability,
                "a command source is declared but the descriptor has no command or query capability",
                descriptor.scoped_name(),
            ));
        }
    }
}

/// Errors when more than one command source is populated.
pub struct ExclusiveSourcesCheck;

impl Check for ExclusiveSourcesCheck {
    fn name(&self) -> &'static str {
        "exclusive-sources"
    }

    fn check(&self, descriptor: &CommandDescriptor, diagnostics: &mut Vec<Diagnostic>) {
        if descriptor.sources.count() > 1 {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::ExclusiveCommandSources,
                "more than one command source is declared; exactly one of procedure, raw_sql, or function must be set",
                descriptor.scoped_name(),
            ));
        }
    }
}

/// Errors when a function source fails the callable-name grammar after the
/// optional leading marker is stripped. The grammar rejects free-form SQL
/// fragments, guarding the synthesized call against injection.
pub struct FunctionIdentifierCheck;

impl Check for FunctionIdentifierCheck {
    fn name(&self) -> &'static str {
        "function-identifier"
    }

    fn check(&self, descriptor: &CommandDescriptor, diagnostics: &mut Vec<Diagnostic>) {
        if let Some(text) = &descriptor.sources.function {
            let (name, _) = strip_call_marker(text);
            if !is_valid_callable_name(name) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::InvalidFunctionIdentifier,
                    format!("'{text}' is not a valid callable name"),
                    descriptor.scoped_name(),
                ));
            }
        }
    }
}
