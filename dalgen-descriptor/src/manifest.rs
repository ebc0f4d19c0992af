//! The `dalgen.toml` descriptor manifest.
//!
//! A manifest is the declarative form of the discovery step's output: a
//! `[project]` table with generation defaults followed by `[[descriptor]]`
//! entries. Hosts that discover annotated types programmatically can skip
//! this module entirely and hand [`RawCommandDescriptor`] values straight to
//! the generator.

use std::{collections::HashSet, path::Path, str::FromStr};

use miette::SourceSpan;
use serde::Deserialize;

use crate::{
    config::ProjectConfig,
    error::{Error, Result},
    schema::RawCommandDescriptor,
};

/// Root of a `dalgen.toml` manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptorManifest {
    /// Project-level generation defaults.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Descriptors in declaration order.
    #[serde(default, rename = "descriptor")]
    pub descriptors: Vec<RawCommandDescriptor>,
}

impl FromStr for DescriptorManifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "dalgen.toml")
    }
}

impl DescriptorManifest {
    /// Parse a manifest from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a manifest from a string with a custom filename for error
    /// reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate(content, filename)?;
        Ok(manifest)
    }

    /// Validate the manifest after parsing.
    ///
    /// This covers document-level problems only (empty names, duplicate
    /// identities, empty result types); per-descriptor semantics belong to
    /// the pipeline analyzer.
    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let mut seen: HashSet<String> = HashSet::new();

        for raw in &self.descriptors {
            if raw.name.trim().is_empty() {
                return Err(Error::validation(
                    "descriptor name must not be empty",
                    src,
                    filename,
                    None,
                ));
            }

            let identity = scoped_identity(raw);
            if !seen.insert(identity.clone()) {
                let span = find_name_span(src, &raw.name);
                return Err(Error::duplicate(identity, src, filename, span));
            }

            if let Some(result) = &raw.result
                && result.type_name.trim().is_empty()
            {
                let span = find_name_span(src, &raw.name);
                return Err(Error::validation(
                    format!("descriptor '{}' declares an empty result type", raw.name),
                    src,
                    filename,
                    span,
                ));
            }

            for parameter in &raw.parameters {
                if parameter.name.trim().is_empty() {
                    let span = find_name_span(src, &raw.name);
                    return Err(Error::validation(
                        format!("descriptor '{}' has a parameter with no name", raw.name),
                        src,
                        filename,
                        span,
                    ));
                }
            }
        }

        Ok(())
    }
}

fn scoped_identity(raw: &RawCommandDescriptor) -> String {
    if raw.scopes.is_empty() {
        return raw.name.clone();
    }
    format!("{}::{}", raw.scopes.join("::"), raw.name)
}

/// Locate the last quoted occurrence of a name for error labeling. Best
/// effort: returns `None` when the name is not found verbatim.
fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let needle = format!("\"{name}\"");
    src.rfind(&needle)
        .map(|start| SourceSpan::from((start + 1, name.len())))
}
