//! Filter lines: `:plain`, `:javascript`, `:css`.

use std::str::FromStr;

use hamlet_dom::{FilterKind, NodeKind};
use tracing::debug;

/// Parse a line starting with `:`. An unknown filter name leaves the line
/// as literal text.
#[must_use]
pub fn parse_filter(content: &str) -> NodeKind {
    let name = content.strip_prefix(':').unwrap_or(content).trim_end();
    FilterKind::from_str(name).map_or_else(
        |_| {
            debug!(filter = name, "unknown filter, keeping line as text");
            NodeKind::Text(content.to_string())
        },
        NodeKind::Filter,
    )
}
