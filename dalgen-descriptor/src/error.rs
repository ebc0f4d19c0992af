use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for descriptor-manifest operations (boxed to reduce size on
/// the stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Errors raised while reading or validating the input document. These are
/// failures of the manifest itself; per-descriptor generation problems are
/// reported through the pipeline's diagnostic catalog instead.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor manifest")]
    #[diagnostic(code(dalgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(dalgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("duplicate descriptor '{name}'")]
    #[diagnostic(
        code(dalgen::duplicate_descriptor),
        help("descriptor identities (scopes plus name) must be unique within a manifest")
    )]
    DuplicateDescriptor {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        name: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context.
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with source context.
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// Create a duplicate-descriptor error with source context.
    pub fn duplicate(
        name: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::DuplicateDescriptor {
            src: NamedSource::new(filename, src.to_string()),
            span,
            name: name.into(),
        })
    }
}
