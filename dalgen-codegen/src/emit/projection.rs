//! Parameter-projection emission.

use dalgen_descriptor::CommandDescriptor;

use super::writer::SourceBuilder;

/// Render the parameter-projection body: an inherent impl exposing a
/// zero-argument accessor that binds each non-ignored parameter's resolved
/// name to its source member, or passes the original value through when the
/// resolver marked the projection degenerate.
pub fn projection_body(descriptor: &CommandDescriptor) -> String {
    let mut builder = SourceBuilder::new();
    builder.line(&format!("impl {} {{", descriptor.name));
    builder.indent();
    if descriptor.passthrough {
        builder.line("/// Parameter projection; the source shape passes through unchanged.");
    } else {
        builder.line(
            "/// Parameter projection binding source members to resolved parameter names.",
        );
    }
    builder.line("pub fn command_parameters(&self) -> CommandParameters<'_> {");
    builder.indent();
    if descriptor.passthrough {
        builder.line("CommandParameters::from_source(self)");
    } else {
        builder.line("CommandParameters::new()");
        builder.indent();
        for parameter in descriptor.projected_parameters() {
            builder.line(&format!(
                ".bind(\"{}\", &self.{})",
                parameter.resolved_name, parameter.source_name
            ));
        }
        builder.dedent();
    }
    builder.dedent();
    builder.line("}");
    builder.dedent();
    builder.line("}");
    builder.build()
}
