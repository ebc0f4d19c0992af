//! Project-level configuration.

use serde::Deserialize;

use crate::descriptor::NamingConvention;

/// Build-system sourced defaults, consulted only when a descriptor leaves
/// the corresponding field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    /// Naming convention applied when a descriptor declares none.
    #[serde(default)]
    pub default_naming_convention: Option<NamingConvention>,
    /// Parameter prefix applied when a descriptor declares none.
    #[serde(default)]
    pub default_parameter_prefix: Option<String>,
}

impl ProjectConfig {
    /// Configuration with no defaults set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default naming convention.
    pub fn naming_convention(mut self, convention: NamingConvention) -> Self {
        self.default_naming_convention = Some(convention);
        self
    }

    /// Set the default parameter prefix.
    pub fn parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_parameter_prefix = Some(prefix.into());
        self
    }
}
