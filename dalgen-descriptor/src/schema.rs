//! Raw annotation schema.
//!
//! These records mirror what the external discovery step produces for each
//! annotated type. The schema deliberately keeps the three command sources
//! as independent optional fields: the input format cannot enforce the
//! sum-type, so exclusivity is a validation concern, not a structural one.
//!
//! Descriptors can be deserialized from a manifest (see
//! [`DescriptorManifest`](crate::DescriptorManifest)) or constructed
//! programmatically through the builder methods.

use serde::Deserialize;

use crate::descriptor::NamingConvention;

/// The capability kind a descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// A mutating command.
    Command,
    /// A reading query.
    Query,
}

/// Declared result contract of a raw descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawResultContract {
    /// Whether the capability is a command or a query.
    pub kind: ResultKind,
    /// The declared result type text, e.g. `i32` or `Vec<User>`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One parameter as declared on the source type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawParameter {
    /// The member name on the source type.
    pub name: String,
    /// Explicit database-side name; bypasses convention and prefix.
    #[serde(default)]
    pub override_name: Option<String>,
    /// Exclude this parameter from the projection entirely.
    #[serde(default)]
    pub ignore: bool,
}

impl RawParameter {
    /// Create a parameter from its source member name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set an explicit database-side name.
    pub fn override_name(mut self, name: impl Into<String>) -> Self {
        self.override_name = Some(name.into());
        self
    }

    /// Exclude this parameter from the projection.
    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// A raw command descriptor as produced by discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCommandDescriptor {
    /// The annotated type's name.
    pub name: String,
    /// Enclosing scope names, outermost first.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Stored procedure to call.
    #[serde(default)]
    pub procedure: Option<String>,
    /// Raw SQL text to execute verbatim.
    #[serde(default)]
    pub raw_sql: Option<String>,
    /// Callable function text, optionally marker-prefixed.
    #[serde(default)]
    pub function: Option<String>,
    /// Execute without materializing rows.
    #[serde(default)]
    pub non_query: bool,
    /// Naming convention override; unset inherits the project default.
    #[serde(default)]
    pub naming_convention: Option<NamingConvention>,
    /// Parameter prefix override; unset inherits the project default.
    #[serde(default)]
    pub parameter_prefix: Option<String>,
    /// Key selecting a specific data source at execution time.
    #[serde(default)]
    pub data_source_key: Option<String>,
    /// Parameters in declaration order.
    #[serde(default, rename = "parameter")]
    pub parameters: Vec<RawParameter>,
    /// Declared capability, if any.
    #[serde(default)]
    pub result: Option<RawResultContract>,
}

impl RawCommandDescriptor {
    /// Create a descriptor for the named type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an enclosing scope (call outermost first).
    pub fn scope(mut self, name: impl Into<String>) -> Self {
        self.scopes.push(name.into());
        self
    }

    /// Target a stored procedure.
    pub fn procedure(mut self, name: impl Into<String>) -> Self {
        self.procedure = Some(name.into());
        self
    }

    /// Target raw SQL text.
    pub fn raw_sql(mut self, text: impl Into<String>) -> Self {
        self.raw_sql = Some(text.into());
        self
    }

    /// Target a callable function.
    pub fn function(mut self, text: impl Into<String>) -> Self {
        self.function = Some(text.into());
        self
    }

    /// Execute without materializing rows.
    pub fn non_query(mut self) -> Self {
        self.non_query = true;
        self
    }

    /// Override the naming convention for this descriptor.
    pub fn naming_convention(mut self, convention: NamingConvention) -> Self {
        self.naming_convention = Some(convention);
        self
    }

    /// Override the parameter prefix for this descriptor.
    pub fn parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = Some(prefix.into());
        self
    }

    /// Select a specific data source at execution time.
    pub fn data_source_key(mut self, key: impl Into<String>) -> Self {
        self.data_source_key = Some(key.into());
        self
    }

    /// Append a parameter (call in declaration order).
    pub fn parameter(mut self, parameter: RawParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Declare a command capability with the given result type.
    pub fn command_returning(mut self, type_name: impl Into<String>) -> Self {
        self.result = Some(RawResultContract {
            kind: ResultKind::Command,
            type_name: type_name.into(),
        });
        self
    }

    /// Declare a query capability with the given result type.
    pub fn query_returning(mut self, type_name: impl Into<String>) -> Self {
        self.result = Some(RawResultContract {
            kind: ResultKind::Query,
            type_name: type_name.into(),
        });
        self
    }
}
