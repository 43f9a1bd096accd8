//! Line-level sub-parsers, one per kind of line.

/// Parenthesised attribute lists.
pub mod attributes;
/// Template block lines and continuation linking.
pub mod block;
/// HTML, conditional and silent comments.
pub mod comment;
/// `!!!` doctype lines.
pub mod doctype;
/// `:name` filter lines.
pub mod filter;
/// `%tag.class#id` lines.
pub mod selector;
/// `=` variable lines.
pub mod variable;

pub use attributes::{AttributeState, ParsedAttributes, parse_attributes};
pub use block::{BlockLine, LinkedBlock, link_block, parse_block};
pub use comment::parse_comment;
pub use doctype::parse_doctype;
pub use filter::parse_filter;
pub use selector::parse_tag;
pub use variable::parse_variable;
