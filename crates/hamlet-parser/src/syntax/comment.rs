//! Comment lines.
//!
//! - `-# text` is an HTML comment; the rest of the line is its first child.
//! - `-#[cond]` is a conditional comment whose body is parsed normally.
//! - `/ text` is a silent comment and renders nothing.

use hamlet_dom::{CommentKind, NodeKind};

/// Parse a comment line into the comment node and its inline child.
#[must_use]
pub fn parse_comment(content: &str) -> (NodeKind, Option<NodeKind>) {
    if let Some(rest) = content.strip_prefix("-#") {
        if let Some(condition) = condition(rest) {
            return (
                NodeKind::Comment(CommentKind::Conditional(condition.to_string())),
                None,
            );
        }
        return (
            NodeKind::Comment(CommentKind::Html),
            Some(NodeKind::Text(rest.to_string())),
        );
    }

    let rest = content.strip_prefix('/').unwrap_or(content);
    (
        NodeKind::Comment(CommentKind::Silent),
        Some(NodeKind::Text(rest.to_string())),
    )
}

/// The text between `[` and the last `]`, if the rest of the line is a
/// bracketed condition.
fn condition(rest: &str) -> Option<&str> {
    let inner = rest.trim_end().strip_prefix('[')?;
    let end = inner.rfind(']')?;
    Some(&inner[..end])
}
