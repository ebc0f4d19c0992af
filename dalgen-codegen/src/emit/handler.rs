//! Command-handler emission.

use dalgen_core::to_snake_case;
use dalgen_descriptor::CommandDescriptor;

use super::writer::SourceBuilder;
use crate::{
    classify::ExecutionStrategy,
    synthesize::{CommandText, ExecutionMode},
};

/// Render the handler body: an exported async function that acquires a
/// connection (keyed when the descriptor selects a data source), builds the
/// parameter projection, and invokes the selected execution strategy with
/// the synthesized command.
pub fn handler_body(
    descriptor: &CommandDescriptor,
    command: &CommandText,
    strategy: &ExecutionStrategy,
) -> String {
    let mut builder = SourceBuilder::new();
    builder.line(&format!("/// Generated handler for `{}`.", descriptor.name));
    builder.line(&format!("pub async fn {}(", to_snake_case(&descriptor.name)));
    builder.indent();
    builder.line(&format!("input: &{},", descriptor.name));
    builder.line("data_source: &DataSource,");
    builder.line("cancel: CancellationToken,");
    builder.dedent();
    builder.line(&format!(
        ") -> Result<{}, DataAccessError> {{",
        strategy.return_type()
    ));
    builder.indent();
    builder.line(&acquire_line(descriptor.data_source_key.as_deref()));
    builder.line(&format!("let command = {}", command_constructor(command)));
    builder.indent();
    builder.line(".parameters(input.command_parameters());");
    builder.dedent();
    builder.line(&strategy_call(strategy));
    builder.dedent();
    builder.line("}");
    builder.build()
}

fn acquire_line(data_source_key: Option<&str>) -> String {
    match data_source_key {
        Some(key) => format!(
            "let connection = data_source.acquire_keyed(\"{}\", cancel.clone()).await?;",
            escape_str(key)
        ),
        None => "let connection = data_source.acquire(cancel.clone()).await?;".to_string(),
    }
}

fn command_constructor(command: &CommandText) -> String {
    let text = escape_str(&command.text);
    match command.mode {
        ExecutionMode::ProcedureCall => format!("SqlCommand::procedure(\"{text}\")"),
        ExecutionMode::Text => format!("SqlCommand::text(\"{text}\")"),
    }
}

fn strategy_call(strategy: &ExecutionStrategy) -> String {
    match strategy {
        ExecutionStrategy::Execute => "connection.execute(command, cancel).await".to_string(),
        ExecutionStrategy::ExecuteScalar(ty) => format!(
            "connection.execute_scalar::<{}>(command, cancel).await",
            ty.element()
        ),
        ExecutionStrategy::QueryMany(ty) => format!(
            "connection.query_many::<{}>(command, cancel).await",
            ty.element()
        ),
        ExecutionStrategy::QuerySingleOrDefault(ty) => format!(
            "connection.query_single_or_default::<{}>(command, cancel).await",
            ty.element()
        ),
    }
}

/// Escape text for embedding in a double-quoted Rust string literal.
fn escape_str(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use dalgen_descriptor::{ProjectConfig, RawCommandDescriptor, resolve};

    use super::*;
    use crate::{classify::classify, synthesize::synthesize};

    fn render(raw: RawCommandDescriptor) -> String {
        let descriptor = resolve(&raw, &ProjectConfig::new());
        let names: Vec<&str> = descriptor
            .projected_parameters()
            .map(|p| p.resolved_name.as_str())
            .collect();
        let command = synthesize(descriptor.sources.single().unwrap(), &names);
        let strategy = classify(descriptor.non_query, descriptor.result.as_ref()).unwrap();
        handler_body(&descriptor, &command, &strategy)
    }

    #[test]
    fn test_execute_handler() {
        let body = render(
            RawCommandDescriptor::new("CreateUser")
                .procedure("create_user")
                .non_query()
                .command_returning("i32"),
        );
        assert_eq!(
            body,
            "/// Generated handler for `CreateUser`.\n\
             pub async fn create_user(\n    \
             input: &CreateUser,\n    \
             data_source: &DataSource,\n    \
             cancel: CancellationToken,\n\
             ) -> Result<u64, DataAccessError> {\n    \
             let connection = data_source.acquire(cancel.clone()).await?;\n    \
             let command = SqlCommand::procedure(\"create_user\")\n        \
             .parameters(input.command_parameters());\n    \
             connection.execute(command, cancel).await\n\
             }\n"
        );
    }

    #[test]
    fn test_query_many_handler_quotes_sql_text() {
        let body = render(
            RawCommandDescriptor::new("GetUsers")
                .raw_sql("SELECT * FROM users WHERE active = @Active")
                .query_returning("Vec<User>"),
        );
        assert!(body.contains(
            "let command = SqlCommand::text(\"SELECT * FROM users WHERE active = @Active\")"
        ));
        assert!(body.contains("connection.query_many::<User>(command, cancel).await"));
        assert!(body.contains(") -> Result<Vec<User>, DataAccessError> {"));
    }

    #[test]
    fn test_keyed_data_source_acquisition() {
        let body = render(
            RawCommandDescriptor::new("GetUsers")
                .raw_sql("SELECT * FROM users")
                .data_source_key("analytics")
                .query_returning("Vec<User>"),
        );
        assert!(body.contains(
            "let connection = data_source.acquire_keyed(\"analytics\", cancel.clone()).await?;"
        ));
    }

    #[test]
    fn test_scalar_and_single_handlers() {
        let scalar = render(
            RawCommandDescriptor::new("CountUsers")
                .raw_sql("SELECT count(*) FROM users")
                .query_returning("i64"),
        );
        assert!(scalar.contains("connection.execute_scalar::<i64>(command, cancel).await"));
        assert!(scalar.contains(") -> Result<i64, DataAccessError> {"));

        let single = render(
            RawCommandDescriptor::new("GetUser")
                .raw_sql("SELECT * FROM users WHERE id = @id")
                .query_returning("User"),
        );
        assert!(single.contains("connection.query_single_or_default::<User>(command, cancel).await"));
        assert!(single.contains(") -> Result<Option<User>, DataAccessError> {"));
    }

    #[test]
    fn test_sql_text_with_quotes_is_escaped() {
        let body = render(
            RawCommandDescriptor::new("GetAdmins")
                .raw_sql(r#"SELECT * FROM users WHERE role = "admin""#)
                .query_returning("Vec<User>"),
        );
        assert!(body.contains(r#"SqlCommand::text("SELECT * FROM users WHERE role = \"admin\"")"#));
    }

    #[test]
    fn test_marked_function_handler_uses_synthesized_select() {
        let body = render(
            RawCommandDescriptor::new("GetAll")
                .function("$app.get_all")
                .parameter(dalgen_descriptor::RawParameter::new("Limit"))
                .parameter(dalgen_descriptor::RawParameter::new("Offset"))
                .query_returning("Vec<User>"),
        );
        assert!(
            body.contains("SqlCommand::text(\"SELECT * FROM app.get_all(@Limit, @Offset)\")")
        );
        assert!(body.contains("pub async fn get_all("));
    }
}
