//! Tree construction.
//!
//! [`Parser`] holds only the options. Each call to [`Parser::parse`] runs a
//! fresh [`TreeBuilder`] that walks the buffer line by line, keeping a
//! stack of open containers whose size tracks the current indentation
//! level.

use hamlet_common::{ErrorKind, ParseError, ParseOptions};
use hamlet_dom::{Document, NodeId, NodeKind};
use tracing::{debug, trace};

use crate::dispatch::{Line, dispatch};
use crate::indentation::{IndentTracker, is_blank, leading_whitespace};
use crate::render::render;
use crate::syntax::link_block;

/// Converts source text into a [`Document`].
///
/// The parser carries no per-buffer state, so one instance can be shared
/// across threads and reused for any number of buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// A parser using `options` for every buffer.
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a complete buffer.
    ///
    /// # Errors
    ///
    /// Returns the first error found, located at the offending line. No
    /// partial tree is returned.
    pub fn parse(&self, text: &str) -> Result<Document, ParseError> {
        TreeBuilder::new(self.options).run(text)
    }

    /// Parse a buffer and render it to a string.
    ///
    /// # Errors
    ///
    /// Returns any parse error, or a render-time [`ErrorKind::DuplicateId`].
    pub fn render(&self, text: &str) -> Result<String, ParseError> {
        render(&self.parse(text)?)
    }
}

/// State for a single parse.
#[derive(Debug)]
struct TreeBuilder {
    options: ParseOptions,
    document: Document,
    /// Open containers; the root is always at the bottom.
    stack: Vec<NodeId>,
    indent: IndentTracker,
    /// Level of the last non-blank line, `None` before the first one.
    previous_level: Option<usize>,
}

impl TreeBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            document: Document::new(),
            stack: vec![NodeId::ROOT],
            indent: IndentTracker::new(),
            previous_level: None,
        }
    }

    fn run(mut self, text: &str) -> Result<Document, ParseError> {
        debug!(bytes = text.len(), engine = ?self.options.engine, "parse started");

        let mut lines = 0;
        for (index, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_number = index + 1;
            self.process_line(line, line_number)
                .map_err(|kind| ParseError::new(kind).at_line(line_number, line))?;
            lines = line_number;
        }

        while self.stack.len() > 1 {
            self.pop();
        }

        debug!(lines, nodes = self.document.node_count(), "parse finished");
        Ok(self.document)
    }

    fn process_line(&mut self, line: &str, line_number: usize) -> Result<(), ErrorKind> {
        if is_blank(line) {
            let _ = self.append_node(NodeKind::Text(String::new()), line_number);
            return Ok(());
        }

        let current = self.current_level();
        if self.in_raw_region()
            && let Some(content) = self.indent.strip_raw(line, current)?
        {
            let _ = self.append_node(NodeKind::Text(content.to_string()), line_number);
            self.previous_level = Some(current);
            return Ok(());
        }

        let Some(level) = self.indent.measure(line)? else {
            let _ = self.append_node(NodeKind::Text(String::new()), line_number);
            return Ok(());
        };
        self.check_level(level)?;

        for _ in level..current {
            self.pop();
        }
        self.previous_level = Some(level);

        let content = &line[leading_whitespace(line).len()..];
        trace!(line_number, level, content, "dispatching line");

        let id = match dispatch(content, self.options)? {
            Line::Node { mut kind, child } => {
                if let NodeKind::Tag(tag) = &mut kind {
                    tag.source_line = line.to_string();
                }
                let id = self.append_node(kind, line_number);
                if let Some(child) = child {
                    let child = self.document.alloc(child, line_number);
                    self.document.append_child(id, child);
                }
                id
            }
            Line::Block { line, engine } => {
                let parent = self.top();
                let linked = link_block(&self.document, parent, line, engine)?;
                if let Some(previous) = linked.continues
                    && let Some(block) = self.document.as_block_mut(previous)
                {
                    block.renders_close = false;
                }
                self.append_node(linked.kind, line_number)
            }
        };

        if self.document.kind(id).is_some_and(NodeKind::is_container) {
            self.stack.push(id);
        }
        Ok(())
    }

    /// Indentation may grow by at most one level per line, and never past
    /// one level below the innermost open container.
    fn check_level(&self, level: usize) -> Result<(), ErrorKind> {
        let allowed = self
            .previous_level
            .map_or(0, |previous| (self.current_level() + 1).min(previous + 1));
        if level > allowed {
            return Err(ErrorKind::ExcessIndentation {
                allowed,
                found: level,
            });
        }
        Ok(())
    }

    fn append_node(&mut self, kind: NodeKind, line_number: usize) -> NodeId {
        let parent = self.top();
        let id = self.document.alloc(kind, line_number);
        self.document.append_child(parent, id);
        id
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Level at which children of the top of the stack sit.
    fn current_level(&self) -> usize {
        self.stack.len() - 1
    }

    fn in_raw_region(&self) -> bool {
        self.document
            .kind(self.top())
            .is_some_and(NodeKind::is_raw_region)
    }

    fn pop(&mut self) {
        assert!(
            self.stack.len() > 1,
            "cannot pop the root off the open container stack"
        );
        let _ = self.stack.pop();
    }
}
