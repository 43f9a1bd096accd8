//! Doctype lines: `!!!` with an optional keyword.

use hamlet_common::ErrorKind;
use hamlet_common::tables::doctype;
use hamlet_dom::NodeKind;

/// Expand a `!!!` line into the literal declaration text.
///
/// # Errors
///
/// Returns [`ErrorKind::UnknownDoctype`] for a keyword not in the table.
pub fn parse_doctype(content: &str) -> Result<NodeKind, ErrorKind> {
    let keyword = content.strip_prefix("!!!").unwrap_or(content);
    doctype(keyword)
        .map(|declaration| NodeKind::Text(declaration.to_string()))
        .ok_or_else(|| ErrorKind::UnknownDoctype(keyword.trim().to_string()))
}
