//! Variable lines: `= expression`.

use hamlet_common::{ErrorKind, ParseOptions};
use hamlet_dom::NodeKind;

/// Parse a line starting with `=` into a variable node.
///
/// # Errors
///
/// Returns [`ErrorKind::EngineNotConfigured`] without an engine, and
/// [`ErrorKind::EmptyVariable`] if there is no expression.
pub fn parse_variable(content: &str, options: ParseOptions) -> Result<NodeKind, ErrorKind> {
    if options.engine.is_none() {
        return Err(ErrorKind::EngineNotConfigured("variable"));
    }
    let expression = content.strip_prefix('=').unwrap_or(content).trim();
    if expression.is_empty() {
        return Err(ErrorKind::EmptyVariable);
    }
    Ok(NodeKind::Variable(expression.to_string()))
}
