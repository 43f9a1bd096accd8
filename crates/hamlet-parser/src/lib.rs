//! Parser and renderer for hamlet, an indentation-based HTML shorthand.
//!
//! # Scope
//!
//! This crate implements:
//! - **Indentation tracking** - unit inference and per-line levels
//! - **Tree construction** - a stack of open containers driven by
//!   indentation, producing a [`Document`]
//! - **Line parsers** - tags, attributes, comments, filters, doctypes,
//!   template blocks and variables
//! - **Rendering** - the finished tree to an HTML string
//!
//! ```text
//! %ul#nav
//!   - for item in items
//!     %li= item
//! ```
//!
//! renders (with the jinja engine) as
//!
//! ```text
//! <ul id="nav">{% for item in items %}<li>{{ item }}</li>{% endfor %}</ul>
//! ```

/// Tree construction and the public [`Parser`].
pub mod builder;
/// Line classification.
pub mod dispatch;
/// Indentation unit inference and measurement.
pub mod indentation;
/// Tree to HTML rendering.
pub mod render;
/// Per-line sub-parsers.
pub mod syntax;

pub use builder::Parser;
pub use hamlet_common::{Engine, ErrorKind, ParseError, ParseOptions};
pub use hamlet_dom::Document;
pub use render::render;

/// Parse `text` with `options` and render it in one step.
///
/// # Errors
///
/// Returns the first parse or render error.
pub fn to_html(text: &str, options: ParseOptions) -> Result<String, ParseError> {
    Parser::new(options).render(text)
}
