//! Resolved descriptor types.
//!
//! These types are the unified representation consumed by the generation
//! pipeline. They are produced by [`resolve`](crate::resolve) from the raw
//! annotation schema and are never mutated afterwards: every discovery pass
//! produces fresh descriptors.

use serde::{Deserialize, Serialize};

/// Case-conversion policy applied when deriving parameter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Keep source member names as-is.
    #[default]
    None,
    /// Convert source member names to snake_case.
    SnakeCase,
}

/// The command sources a descriptor declares.
///
/// The raw annotation schema cannot prevent more than one source from being
/// set, so the resolved descriptor keeps all three slots and validation
/// rejects the ambiguous case. [`single`](Self::single) yields the genuine
/// sum type once exclusivity has been established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CommandSources {
    /// Name of a stored procedure to call.
    pub procedure: Option<String>,
    /// Raw SQL text to execute verbatim.
    pub raw_sql: Option<String>,
    /// A callable function name, optionally marker-prefixed.
    pub function: Option<String>,
}

impl CommandSources {
    /// Number of populated source slots.
    pub fn count(&self) -> usize {
        [
            self.procedure.is_some(),
            self.raw_sql.is_some(),
            self.function.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Returns true if no source is set.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The single declared source, or `None` when zero or several are set.
    pub fn single(&self) -> Option<CommandSource<'_>> {
        if self.count() != 1 {
            return None;
        }
        if let Some(name) = &self.procedure {
            return Some(CommandSource::Procedure(name));
        }
        if let Some(text) = &self.raw_sql {
            return Some(CommandSource::RawSql(text));
        }
        self.function.as_deref().map(CommandSource::Function)
    }
}

/// A single authoritative command source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource<'a> {
    /// Stored procedure name, passed through verbatim.
    Procedure(&'a str),
    /// Raw SQL text, passed through verbatim.
    RawSql(&'a str),
    /// Callable function text; a leading marker requests wrapping.
    Function(&'a str),
}

/// One parameter of a descriptor, with its database-side name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterDescriptor {
    /// The member name on the source type.
    pub source_name: String,
    /// The resolved parameter name (override, convention, or prefix applied).
    pub resolved_name: String,
    /// Excluded from the parameter projection entirely.
    pub ignored: bool,
}

/// The declared result type of a command or query capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResultType {
    declared: String,
    element: String,
    many: bool,
}

const INTEGRAL_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

impl ResultType {
    /// Parse a declared result type. `Vec<T>` declares a homogeneous
    /// sequence of `T`; any other text declares a single value.
    pub fn parse(text: &str) -> Self {
        let declared = text.trim().to_string();
        let element = declared
            .strip_prefix("Vec<")
            .and_then(|rest| rest.strip_suffix('>'))
            .map(|inner| inner.trim().to_string());
        match element {
            Some(element) => Self {
                declared,
                element,
                many: true,
            },
            None => Self {
                element: declared.clone(),
                declared,
                many: false,
            },
        }
    }

    /// The type text exactly as declared.
    pub fn declared(&self) -> &str {
        &self.declared
    }

    /// The element type: `T` for `Vec<T>`, otherwise the declared type.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Whether the declared type is a homogeneous sequence.
    pub fn is_sequence(&self) -> bool {
        self.many
    }

    /// Whether the declared type is a single integral numeric primitive.
    pub fn is_integral(&self) -> bool {
        !self.many && INTEGRAL_TYPES.contains(&self.element.as_str())
    }
}

/// The capability a descriptor declares: command (mutating) or query
/// (reading), each with a declared result type. Absence of a contract marks
/// a plain metadata holder with no invocable shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ResultContract {
    /// A mutating command with a declared result type.
    Command(ResultType),
    /// A reading query with a declared result type.
    Query(ResultType),
}

impl ResultContract {
    /// The declared result type, regardless of capability kind.
    pub fn result_type(&self) -> &ResultType {
        match self {
            ResultContract::Command(ty) | ResultContract::Query(ty) => ty,
        }
    }
}

/// A fully resolved command descriptor, one per annotated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// The descriptor type's name.
    pub name: String,
    /// Enclosing scope names, outermost first. Emitted code nests inside
    /// these exactly as the source declaration does.
    pub scopes: Vec<String>,
    /// Declared command sources (validation enforces exclusivity).
    pub sources: CommandSources,
    /// Execute without materializing rows; the handler returns the
    /// affected-row count.
    pub non_query: bool,
    /// The naming convention after merging with project defaults.
    pub naming_convention: NamingConvention,
    /// The parameter prefix after merging with project defaults.
    pub parameter_prefix: Option<String>,
    /// Key selecting a specific data source at execution time.
    pub data_source_key: Option<String>,
    /// Parameters in declaration order, names resolved.
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared capability, if any.
    pub result: Option<ResultContract>,
    /// No parameter is renamed or ignored, so the projection can pass the
    /// original value through unchanged.
    pub passthrough: bool,
}

impl CommandDescriptor {
    /// The fully scoped name identifying this descriptor across passes.
    pub fn scoped_name(&self) -> String {
        if self.scopes.is_empty() {
            return self.name.clone();
        }
        let mut path = self.scopes.join("::");
        path.push_str("::");
        path.push_str(&self.name);
        path
    }

    /// Resolved names of the parameters that participate in the projection.
    pub fn projected_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| !p.ignored)
    }
}
