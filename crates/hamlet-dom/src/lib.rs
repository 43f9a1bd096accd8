//! Output tree for the hamlet compiler.
//!
//! The parser builds one [`Document`] per call. Every line of source becomes
//! at most one [`Node`], attached under the innermost open container; the
//! renderer then walks the tree depth-first and concatenates output.
//!
//! # Design
//!
//! Nodes live in an arena and refer to each other through [`NodeId`]
//! indices. Continuation blocks (`else`, `elif`, `empty`) point back at the
//! block they continue with a plain id instead of a shared reference.

use std::fmt;

use hamlet_common::BlockSpec;
use hamlet_common::tables::is_self_closing;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use strum_macros::{Display, EnumString};

/// A type-safe index into a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// What this node renders as.
    pub kind: NodeKind,
    /// Enclosing node. Only the root has none.
    pub parent: Option<NodeId>,
    /// Children in source order.
    pub children: Vec<NodeId>,
    /// Previous child of the same parent.
    pub prev_sibling: Option<NodeId>,
    /// Distance from the root; the root is 0.
    pub depth: usize,
    /// 1-based source line the node came from (0 for the root).
    pub line_number: usize,
}

/// The closed set of things a source line can turn into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The document root.
    Root,
    /// Literal text, emitted as-is. An empty string marks a blank line.
    Text(String),
    /// An HTML element.
    Tag(TagData),
    /// An HTML, silent or conditional comment.
    Comment(CommentKind),
    /// A filtered region whose body is kept verbatim.
    Filter(FilterKind),
    /// A template block with a closing marker.
    Block(BlockData),
    /// A single template tag with no closing marker.
    InlineBlock(InlineBlockData),
    /// A template variable; holds the expression.
    Variable(String),
}

impl NodeKind {
    /// Whether lines indented under this node become its children.
    ///
    /// Self-closing tags never hold children.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        match self {
            Self::Root | Self::Comment(_) | Self::Filter(_) | Self::Block(_) => true,
            Self::Tag(tag) => !tag.self_closing,
            Self::Text(_) | Self::InlineBlock(_) | Self::Variable(_) => false,
        }
    }

    /// Whether indented lines under this node are kept as verbatim text
    /// instead of being parsed.
    ///
    /// Conditional comments parse their body like any other container.
    #[must_use]
    pub const fn is_raw_region(&self) -> bool {
        matches!(
            self,
            Self::Filter(_) | Self::Comment(CommentKind::Html | CommentKind::Silent)
        )
    }
}

/// Element data for a `%tag`, `.class` or `#id` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagData {
    /// Tag name, `div` when only a selector was given.
    pub name: String,
    /// Classes from the selector, in source order.
    pub classes: Vec<String>,
    /// Id from the selector.
    pub id: Option<String>,
    /// Attributes from the parenthesised list, in source order.
    pub attributes: Vec<Attribute>,
    /// Rendered as `<name ... />` and never holds children.
    pub self_closing: bool,
    /// The source line the tag was written on, kept for errors raised
    /// while rendering.
    #[serde(skip)]
    pub source_line: String,
}

impl TagData {
    /// A tag with no selector parts or attributes.
    ///
    /// Self-closing status comes from the tag name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let self_closing = is_self_closing(&name);
        Self {
            name,
            classes: Vec::new(),
            id: None,
            attributes: Vec::new(),
            self_closing,
            source_line: String::new(),
        }
    }

    /// The attribute named `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// One `name` or `name=value` entry from an attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value; `None` for a bare boolean attribute.
    pub value: Option<AttributeValue>,
}

impl Attribute {
    /// A bare attribute such as `required`.
    #[must_use]
    pub fn valueless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// A quoted string attribute, remembering the quote character used.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>, quote: char) -> Self {
        Self {
            name: name.into(),
            value: Some(AttributeValue::Str {
                value: value.into(),
                quote,
            }),
        }
    }

    /// An unquoted integer attribute.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value: Some(AttributeValue::Integer(value)),
        }
    }

    /// The value as plain text: the string contents, the integer's digits,
    /// or empty for a bare attribute.
    #[must_use]
    pub fn value_text(&self) -> String {
        self.value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Renders the attribute as it appears inside a start tag: `name`,
/// `name=1234` or `name='value'` with the original quote character.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => write!(f, "{}", self.name),
            Some(AttributeValue::Integer(n)) => write!(f, "{}={n}", self.name),
            Some(AttributeValue::Str { value, quote }) => {
                write!(f, "{}={quote}{value}{quote}", self.name)
            }
        }
    }
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// A quoted string.
    Str {
        /// Text between the quotes.
        value: String,
        /// The quote character that delimited it (`'` or `"`).
        quote: char,
    },
    /// A plain decimal integer.
    Integer(u64),
}

/// Displays the bare value, without quotes.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str { value, .. } => f.write_str(value),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// The three comment forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// `-#`: emitted as an HTML comment.
    Html,
    /// `/`: dropped from the output with everything under it.
    Silent,
    /// `-#[cond]`: an IE conditional comment; holds `cond`.
    Conditional(String),
}

/// The filters a `:name` line can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterKind {
    /// Body emitted with no wrapper.
    Plain,
    /// Body wrapped in a script element.
    Javascript,
    /// Body wrapped in a style element.
    Css,
}

impl FilterKind {
    /// Text emitted before the body.
    #[must_use]
    pub const fn open(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Javascript => "<script>",
            Self::Css => "<style>",
        }
    }

    /// Text emitted after the body.
    #[must_use]
    pub const fn close(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Javascript => "</script>",
            Self::Css => "</style>",
        }
    }
}

/// A template block from the engine's block table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockData {
    /// The keyword.
    pub name: String,
    /// Everything after the keyword, trimmed.
    pub args: String,
    /// Table entry of the block this one opens or continues.
    pub spec: &'static BlockSpec,
    /// For a continuation, the block it continues.
    pub linked_to: Option<NodeId>,
    /// Whether the closing marker is emitted after this block's children.
    /// Cleared when a continuation links onto this block.
    pub renders_close: bool,
}

/// A template tag that is not in the engine's block table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineBlockData {
    /// The keyword.
    pub name: String,
    /// Everything after the keyword, trimmed.
    pub args: String,
}

/// Arena-backed output tree.
///
/// The root node is always at [`NodeId::ROOT`]; everything else is
/// allocated with [`Document::alloc`] and attached with
/// [`Document::append_child`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Root,
            parent: None,
            children: Vec::new(),
            prev_sibling: None,
            depth: 0,
            line_number: 0,
        };
        Self { nodes: vec![root] }
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a detached node and return its id.
    pub fn alloc(&mut self, kind: NodeKind, line_number: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            prev_sibling: None,
            depth: 0,
            line_number,
        });
        id
    }

    /// Append `child` as the last child of `parent` and set its depth.
    ///
    /// # Panics
    ///
    /// Panics if `child` is the root.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(child, NodeId::ROOT, "the root node cannot be re-parented");

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        let depth = self.nodes[parent.0].depth + 1;

        self.nodes[parent.0].children.push(child);

        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev_last_child;
        node.depth = depth;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings, nearest first.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Get the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.kind(id).and_then(|kind| match kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get block data if this node is a block.
    #[must_use]
    pub fn as_block(&self, id: NodeId) -> Option<&BlockData> {
        self.kind(id).and_then(|kind| match kind {
            NodeKind::Block(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable block data if this node is a block.
    pub fn as_block_mut(&mut self, id: NodeId) -> Option<&mut BlockData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Block(data) => Some(data),
            _ => None,
        })
    }

    /// Whether this node is a text node holding a blank line.
    #[must_use]
    pub fn is_blank_text(&self, id: NodeId) -> bool {
        self.as_text(id).is_some_and(str::is_empty)
    }

    /// A nested, serializable view of the subtree rooted at `id`.
    #[must_use]
    pub const fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes as the nested tree under the root.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view(NodeId::ROOT).serialize(serializer)
    }
}

/// A node together with the tree it lives in, serialized with its children
/// nested inline.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Document,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };
        let children: Vec<NodeView<'_>> = node
            .children
            .iter()
            .map(|&child| self.tree.view(child))
            .collect();

        let mut state = serializer.serialize_struct("Node", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("line", &node.line_number)?;
        state.serialize_field("depth", &node.depth)?;
        state.serialize_field("kind", &node.kind)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
