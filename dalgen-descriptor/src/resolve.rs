//! Metadata resolution.
//!
//! Merges per-descriptor overrides with project-level defaults into a fully
//! resolved [`CommandDescriptor`]. Resolution is a pure function of the raw
//! descriptor and the configuration; it performs no validation beyond name
//! derivation (the analyzer owns semantic checks).

use dalgen_core::to_snake_case;

use crate::{
    config::ProjectConfig,
    descriptor::{
        CommandDescriptor, CommandSources, NamingConvention, ParameterDescriptor, ResultContract,
        ResultType,
    },
    schema::{RawCommandDescriptor, ResultKind},
};

/// Resolve a raw descriptor against the project configuration.
pub fn resolve(raw: &RawCommandDescriptor, config: &ProjectConfig) -> CommandDescriptor {
    // An explicit `none` on the descriptor suppresses the project default;
    // only an absent field inherits.
    let convention = raw
        .naming_convention
        .or(config.default_naming_convention)
        .unwrap_or_default();
    let prefix = raw
        .parameter_prefix
        .clone()
        .or_else(|| config.default_parameter_prefix.clone());

    let parameters: Vec<ParameterDescriptor> = raw
        .parameters
        .iter()
        .map(|p| ParameterDescriptor {
            source_name: p.name.clone(),
            resolved_name: resolve_name(&p.name, p.override_name.as_deref(), convention, &prefix),
            ignored: p.ignore,
        })
        .collect();

    // The projection degenerates to pass-through only when the original
    // shape survives intact: nothing renamed, nothing ignored.
    let passthrough = parameters
        .iter()
        .all(|p| !p.ignored && p.resolved_name == p.source_name);

    let result = raw.result.as_ref().map(|contract| {
        let ty = ResultType::parse(&contract.type_name);
        match contract.kind {
            ResultKind::Command => ResultContract::Command(ty),
            ResultKind::Query => ResultContract::Query(ty),
        }
    });

    CommandDescriptor {
        name: raw.name.clone(),
        scopes: raw.scopes.clone(),
        sources: CommandSources {
            procedure: raw.procedure.clone(),
            raw_sql: raw.raw_sql.clone(),
            function: raw.function.clone(),
        },
        non_query: raw.non_query,
        naming_convention: convention,
        parameter_prefix: prefix,
        data_source_key: raw.data_source_key.clone(),
        parameters,
        result,
        passthrough,
    }
}

/// Resolve one parameter name. An explicit override wins outright; otherwise
/// the prefix is concatenated literally and the convention's case conversion
/// runs over the combined text.
fn resolve_name(
    source: &str,
    override_name: Option<&str>,
    convention: NamingConvention,
    prefix: &Option<String>,
) -> String {
    if let Some(explicit) = override_name {
        return explicit.to_string();
    }
    let base = match prefix {
        Some(prefix) => format!("{prefix}{source}"),
        None => source.to_string(),
    };
    match convention {
        NamingConvention::SnakeCase => to_snake_case(&base),
        NamingConvention::None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawParameter;

    fn raw_with_params(parameters: Vec<RawParameter>) -> RawCommandDescriptor {
        RawCommandDescriptor {
            name: "CreateUser".to_string(),
            parameters,
            ..Default::default()
        }
    }

    #[test]
    fn test_override_bypasses_convention_and_prefix() {
        let raw = raw_with_params(vec![RawParameter::new("UserId").override_name("uid")]);
        let config = ProjectConfig::new()
            .naming_convention(NamingConvention::SnakeCase)
            .parameter_prefix("p");

        let resolved = resolve(&raw, &config);
        assert_eq!(resolved.parameters[0].resolved_name, "uid");
    }

    #[test]
    fn test_descriptor_convention_beats_project_default() {
        let mut raw = raw_with_params(vec![RawParameter::new("UserId")]);
        raw.naming_convention = Some(NamingConvention::None);
        let config = ProjectConfig::new().naming_convention(NamingConvention::SnakeCase);

        let resolved = resolve(&raw, &config);
        // Explicit `none` suppresses the project-wide snake_case default.
        assert_eq!(resolved.parameters[0].resolved_name, "UserId");
    }

    #[test]
    fn test_project_default_applies_when_unset() {
        let raw = raw_with_params(vec![RawParameter::new("UserId")]);
        let config = ProjectConfig::new().naming_convention(NamingConvention::SnakeCase);

        let resolved = resolve(&raw, &config);
        assert_eq!(resolved.parameters[0].resolved_name, "user_id");
    }

    #[test]
    fn test_prefix_concatenates_before_conversion() {
        let raw = raw_with_params(vec![RawParameter::new("UserId")]);
        let config = ProjectConfig::new()
            .naming_convention(NamingConvention::SnakeCase)
            .parameter_prefix("p");

        let resolved = resolve(&raw, &config);
        assert_eq!(resolved.parameters[0].resolved_name, "p_user_id");
    }

    #[test]
    fn test_prefix_only_without_convention() {
        let raw = raw_with_params(vec![RawParameter::new("UserId")]);
        let config = ProjectConfig::new().parameter_prefix("p_");

        let resolved = resolve(&raw, &config);
        assert_eq!(resolved.parameters[0].resolved_name, "p_UserId");
    }

    #[test]
    fn test_passthrough_when_nothing_renamed() {
        let raw = raw_with_params(vec![
            RawParameter::new("user_id"),
            RawParameter::new("name"),
        ]);
        let resolved = resolve(&raw, &ProjectConfig::new());
        assert!(resolved.passthrough);

        // snake_case over already-snake names changes nothing either.
        let config = ProjectConfig::new().naming_convention(NamingConvention::SnakeCase);
        let resolved = resolve(&raw, &config);
        assert!(resolved.passthrough);
    }

    #[test]
    fn test_ignored_parameter_defeats_passthrough() {
        let raw = raw_with_params(vec![
            RawParameter::new("user_id"),
            RawParameter::new("trace_id").ignore(),
        ]);
        let resolved = resolve(&raw, &ProjectConfig::new());
        assert!(!resolved.passthrough);
    }

    #[test]
    fn test_resolution_is_pure() {
        let raw = raw_with_params(vec![RawParameter::new("UserId")]);
        let config = ProjectConfig::new().naming_convention(NamingConvention::SnakeCase);
        assert_eq!(resolve(&raw, &config), resolve(&raw, &config));
    }
}
