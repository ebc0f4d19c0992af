//! Command-text synthesis.
//!
//! Turns the authoritative command source and the resolved parameter names
//! into the final command string and its execution mode. Procedure and raw
//! SQL sources pass through verbatim; function sources synthesize a call.

use dalgen_core::strip_call_marker;
use dalgen_descriptor::CommandSource;

/// How the emitted handler executes the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// The text names a stored procedure.
    ProcedureCall,
    /// The text is a SQL statement.
    Text,
}

/// The synthesized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandText {
    /// Final command string.
    pub text: String,
    /// Execution mode tag.
    pub mode: ExecutionMode,
}

/// Synthesize the command text for a source and its parameter names, in
/// declaration order, ignored parameters already excluded.
pub fn synthesize(source: CommandSource<'_>, parameter_names: &[&str]) -> CommandText {
    match source {
        CommandSource::Procedure(name) => CommandText {
            text: name.to_string(),
            mode: ExecutionMode::ProcedureCall,
        },
        CommandSource::RawSql(text) => CommandText {
            text: text.to_string(),
            mode: ExecutionMode::Text,
        },
        CommandSource::Function(text) => {
            let (name, marked) = strip_call_marker(text);
            let arguments = argument_list(parameter_names);
            let text = if marked {
                // Marker present: wrap the callable name in a select.
                format!("SELECT * FROM {name}({arguments})")
            } else {
                // No marker: the text already carries its own select
                // prefix; append the argument list as-is.
                format!("{name}({arguments})")
            };
            CommandText {
                text,
                mode: ExecutionMode::Text,
            }
        }
    }
}

fn argument_list(parameter_names: &[&str]) -> String {
    parameter_names
        .iter()
        .map(|name| format!("@{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_passes_through() {
        let command = synthesize(CommandSource::Procedure("create_user"), &["user_id"]);
        assert_eq!(command.text, "create_user");
        assert_eq!(command.mode, ExecutionMode::ProcedureCall);
    }

    #[test]
    fn test_raw_sql_passes_through() {
        let sql = "SELECT * FROM users WHERE active = @Active";
        let command = synthesize(CommandSource::RawSql(sql), &["Active"]);
        assert_eq!(command.text, sql);
        assert_eq!(command.mode, ExecutionMode::Text);
    }

    #[test]
    fn test_marked_function_is_wrapped() {
        let command = synthesize(CommandSource::Function("$app.get_all"), &["Limit", "Offset"]);
        assert_eq!(command.text, "SELECT * FROM app.get_all(@Limit, @Offset)");
        assert_eq!(command.mode, ExecutionMode::Text);
    }

    #[test]
    fn test_unmarked_function_appends_arguments() {
        let command = synthesize(CommandSource::Function("app.get_all"), &["Limit"]);
        assert_eq!(command.text, "app.get_all(@Limit)");
        assert_eq!(command.mode, ExecutionMode::Text);
    }

    #[test]
    fn test_zero_parameters_synthesize_empty_parentheses() {
        let command = synthesize(CommandSource::Function("$app.get_all"), &[]);
        assert_eq!(command.text, "SELECT * FROM app.get_all()");

        let command = synthesize(CommandSource::Function("app.get_all"), &[]);
        assert_eq!(command.text, "app.get_all()");
    }
}
