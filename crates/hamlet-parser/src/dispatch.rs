//! Line classification.
//!
//! Picks the sub-parser for a dedented, non-blank line by its leading
//! token. Earlier checks win: `-#` is a comment even though it also starts
//! with the block token.

use hamlet_common::{Engine, ErrorKind, ParseOptions};
use hamlet_dom::NodeKind;

use crate::syntax::{
    BlockLine, parse_block, parse_comment, parse_doctype, parse_filter, parse_tag,
    parse_variable,
};

/// What a single line turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A node, with at most one child taken from the same line.
    Node {
        /// The node for the line.
        kind: NodeKind,
        /// Inline text or variable to attach under it.
        child: Option<NodeKind>,
    },
    /// A template block; linking it needs the surrounding tree.
    Block {
        /// Keyword and arguments.
        line: BlockLine,
        /// Engine whose block table applies.
        engine: Engine,
    },
}

impl Line {
    const fn leaf(kind: NodeKind) -> Self {
        Self::Node { kind, child: None }
    }
}

/// Classify `content` and run the matching sub-parser.
///
/// # Errors
///
/// Returns the sub-parser's error, or [`ErrorKind::EngineNotConfigured`]
/// for block syntax without an engine.
pub fn dispatch(content: &str, options: ParseOptions) -> Result<Line, ErrorKind> {
    if content.starts_with("-#") || content.starts_with('/') {
        let (kind, child) = parse_comment(content);
        return Ok(Line::Node { kind, child });
    }

    match content.chars().next() {
        Some('%' | '.' | '#') => {
            let (tag, child) = parse_tag(content, options)?;
            Ok(Line::Node {
                kind: NodeKind::Tag(tag),
                child,
            })
        }
        Some('-') => {
            let engine = options
                .engine
                .ok_or(ErrorKind::EngineNotConfigured("block"))?;
            Ok(Line::Block {
                line: parse_block(content)?,
                engine,
            })
        }
        Some('!') if content.starts_with("!!!") => parse_doctype(content).map(Line::leaf),
        Some(':') => Ok(Line::leaf(parse_filter(content))),
        Some('=') => parse_variable(content, options).map(Line::leaf),
        _ => Ok(Line::leaf(NodeKind::Text(content.to_string()))),
    }
}
