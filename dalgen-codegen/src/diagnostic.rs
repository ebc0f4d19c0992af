//! Typed diagnostics for the generation pipeline.
//!
//! Diagnostics are the sole error-reporting channel of the pipeline: they
//! are values attached to their originating descriptor, never exceptions.
//! The code catalog is stable; build tooling matches on codes, not
//! messages.

use serde::Serialize;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Artifacts are still produced.
    Warning,
    /// Artifact production is suppressed for the subject descriptor.
    Error,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The stable diagnostic catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// A non-query descriptor declares a non-integral result type.
    NonQueryResultMismatch,
    /// A command source is set but no result capability is declared.
    MissingResultCapability,
    /// More than one command source is populated.
    ExclusiveCommandSources,
    /// An internal failure escaped the per-descriptor pipeline.
    UnexpectedFailure,
    /// A function source fails the callable-name grammar.
    InvalidFunctionIdentifier,
}

impl DiagnosticCode {
    /// The stable code identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::NonQueryResultMismatch => "DAL0001",
            DiagnosticCode::MissingResultCapability => "DAL0002",
            DiagnosticCode::ExclusiveCommandSources => "DAL0003",
            DiagnosticCode::UnexpectedFailure => "DAL0004",
            DiagnosticCode::InvalidFunctionIdentifier => "DAL0005",
        }
    }

    /// The fixed severity of this code.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::NonQueryResultMismatch => Severity::Warning,
            DiagnosticCode::MissingResultCapability
            | DiagnosticCode::ExclusiveCommandSources
            | DiagnosticCode::UnexpectedFailure
            | DiagnosticCode::InvalidFunctionIdentifier => Severity::Error,
        }
    }
}

/// A diagnostic attached to one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Catalog code.
    pub code: DiagnosticCode,
    /// Severity, fixed per code.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Fully scoped name of the descriptor this diagnostic concerns.
    pub subject: String,
}

impl Diagnostic {
    /// Create a diagnostic; severity is derived from the code.
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            subject: subject.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.severity,
            self.code.as_str(),
            self.message,
            self.subject
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_fixed_per_code() {
        assert_eq!(
            DiagnosticCode::NonQueryResultMismatch.severity(),
            Severity::Warning
        );
        assert!(DiagnosticCode::MissingResultCapability.severity().is_error());
        assert!(DiagnosticCode::ExclusiveCommandSources.severity().is_error());
        assert!(DiagnosticCode::UnexpectedFailure.severity().is_error());
        assert!(
            DiagnosticCode::InvalidFunctionIdentifier
                .severity()
                .is_error()
        );
    }

    #[test]
    fn test_display_format() {
        let diag = Diagnostic::new(
            DiagnosticCode::MissingResultCapability,
            "no result capability",
            "app::CreateUser",
        );
        assert_eq!(
            diag.to_string(),
            "error[DAL0002]: no result capability (app::CreateUser)"
        );
    }

    #[test]
    fn test_serializes_for_build_tooling() {
        let diag = Diagnostic::new(
            DiagnosticCode::NonQueryResultMismatch,
            "result type is not integral",
            "CreateUser",
        );
        let json = serde_json::to_string(&diag).expect("diagnostic should serialize");
        assert!(json.contains("NonQueryResultMismatch"));
        assert!(json.contains("Warning"));
    }
}
