//! Tests for the output tree: attachment, depth tracking, node predicates
//! and serialization.

use std::str::FromStr;

use hamlet_common::Engine;
use hamlet_dom::{
    Attribute, BlockData, CommentKind, Document, FilterKind, NodeId, NodeKind, TagData,
};

/// Helper to allocate a tag node and attach it under `parent`.
fn append_tag(tree: &mut Document, parent: NodeId, name: &str) -> NodeId {
    let id = tree.alloc(NodeKind::Tag(TagData::new(name)), 1);
    tree.append_child(parent, id);
    id
}

// ========== structure ==========

#[test]
fn test_new_document_has_only_root() {
    let tree = Document::new();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.kind(NodeId::ROOT), Some(&NodeKind::Root));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_append_child_sets_depth_and_parent() {
    let mut tree = Document::new();
    let html = append_tag(&mut tree, NodeId::ROOT, "html");
    let body = append_tag(&mut tree, html, "body");
    let p = append_tag(&mut tree, body, "p");

    assert_eq!(tree.get(html).unwrap().depth, 1);
    assert_eq!(tree.get(body).unwrap().depth, 2);
    assert_eq!(tree.get(p).unwrap().depth, 3);
    assert_eq!(tree.parent(p), Some(body));

    let ancestors: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_siblings_are_linked_in_order() {
    let mut tree = Document::new();
    let a = append_tag(&mut tree, NodeId::ROOT, "a");
    let b = append_tag(&mut tree, NodeId::ROOT, "b");
    let c = append_tag(&mut tree, NodeId::ROOT, "c");

    assert_eq!(tree.children(NodeId::ROOT), &[a, b, c]);
    assert_eq!(tree.last_child(NodeId::ROOT), Some(c));
    assert_eq!(tree.prev_sibling(a), None);
    let preceding: Vec<NodeId> = tree.preceding_siblings(c).collect();
    assert_eq!(preceding, vec![b, a]);
}

#[test]
#[should_panic(expected = "root node cannot be re-parented")]
fn test_root_cannot_be_appended() {
    let mut tree = Document::new();
    let div = append_tag(&mut tree, NodeId::ROOT, "div");
    tree.append_child(div, NodeId::ROOT);
}

#[test]
fn test_blank_text_detection() {
    let mut tree = Document::new();
    let blank = tree.alloc(NodeKind::Text(String::new()), 1);
    let text = tree.alloc(NodeKind::Text("hi".to_string()), 2);
    assert!(tree.is_blank_text(blank));
    assert!(!tree.is_blank_text(text));
    assert_eq!(tree.as_text(text), Some("hi"));
}

// ========== node kinds ==========

#[test]
fn test_self_closing_tags_are_not_containers() {
    let br = NodeKind::Tag(TagData::new("BR"));
    let div = NodeKind::Tag(TagData::new("div"));
    assert!(!br.is_container());
    assert!(div.is_container());
    assert!(!NodeKind::Variable("x".to_string()).is_container());
    assert!(!NodeKind::Text("x".to_string()).is_container());
}

#[test]
fn test_raw_regions() {
    assert!(NodeKind::Filter(FilterKind::Plain).is_raw_region());
    assert!(NodeKind::Comment(CommentKind::Html).is_raw_region());
    assert!(NodeKind::Comment(CommentKind::Silent).is_raw_region());
    assert!(!NodeKind::Comment(CommentKind::Conditional("if IE".to_string())).is_raw_region());
    assert!(!NodeKind::Tag(TagData::new("div")).is_raw_region());
}

#[test]
fn test_filter_kind_names() {
    assert_eq!(FilterKind::from_str("javascript").unwrap(), FilterKind::Javascript);
    assert_eq!(FilterKind::from_str("css").unwrap(), FilterKind::Css);
    assert!(FilterKind::from_str("markdown").is_err());
    assert_eq!(FilterKind::Plain.to_string(), "plain");
    assert_eq!(FilterKind::Css.open(), "<style>");
    assert_eq!(FilterKind::Javascript.close(), "</script>");
    assert_eq!(FilterKind::Plain.open(), "");
}

#[test]
fn test_attribute_display() {
    assert_eq!(Attribute::valueless("required").to_string(), "required");
    assert_eq!(Attribute::integer("data-blah", 1234).to_string(), "data-blah=1234");
    assert_eq!(Attribute::string("href", "#", '\'').to_string(), "href='#'");
    assert_eq!(Attribute::string("target", "blank", '"').to_string(), "target=\"blank\"");
}

#[test]
fn test_attribute_value_text() {
    assert_eq!(Attribute::valueless("class").value_text(), "");
    assert_eq!(Attribute::integer("class", 7).value_text(), "7");
    assert_eq!(Attribute::string("class", "a b", '"').value_text(), "a b");

    let mut tag = TagData::new("a");
    tag.attributes.push(Attribute::string("href", "#", '\''));
    assert!(tag.attribute("href").is_some());
    assert!(tag.attribute("id").is_none());
}

#[test]
fn test_block_mut_access() {
    let mut tree = Document::new();
    let spec = Engine::Jinja.opening_block("if").unwrap();
    let block = tree.alloc(
        NodeKind::Block(BlockData {
            name: "if".to_string(),
            args: "x".to_string(),
            spec,
            linked_to: None,
            renders_close: true,
        }),
        1,
    );
    tree.append_child(NodeId::ROOT, block);

    tree.as_block_mut(block).unwrap().renders_close = false;
    assert!(!tree.as_block(block).unwrap().renders_close);
    assert!(tree.as_block(NodeId::ROOT).is_none());
    assert!(tree.as_text(block).is_none());
}

// ========== serialization ==========

#[test]
fn test_serialize_nests_children() {
    let mut tree = Document::new();
    let div = append_tag(&mut tree, NodeId::ROOT, "div");
    let text = tree.alloc(NodeKind::Text("hello".to_string()), 2);
    tree.append_child(div, text);

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["kind"], "root");
    assert_eq!(json["children"][0]["kind"]["tag"]["name"], "div");
    assert_eq!(json["children"][0]["depth"], 1);
    assert_eq!(json["children"][0]["children"][0]["kind"]["text"], "hello");
    assert_eq!(json["children"][0]["children"][0]["line"], 2);
}
