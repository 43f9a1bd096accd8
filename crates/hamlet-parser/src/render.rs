//! HTML rendering.
//!
//! A depth-first walk over the finished tree. Siblings are concatenated
//! with nothing between them; only the bodies of raw regions keep their
//! line breaks.

use hamlet_common::{ErrorKind, ParseError};
use hamlet_dom::{
    Attribute, AttributeValue, CommentKind, Document, Node, NodeId, NodeKind, TagData,
};

/// Render a parsed document to a string.
///
/// # Errors
///
/// Returns [`ErrorKind::DuplicateId`] for a tag that has both a `#id`
/// shorthand and an explicit `id` attribute, located at the tag's line.
pub fn render(document: &Document) -> Result<String, ParseError> {
    let mut out = String::new();
    render_node(document, NodeId::ROOT, &mut out)?;
    Ok(out)
}

fn render_node(document: &Document, id: NodeId, out: &mut String) -> Result<(), ParseError> {
    let Some(node) = document.get(id) else {
        return Ok(());
    };

    match &node.kind {
        NodeKind::Root => render_children(document, node, out)?,
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Variable(expression) => {
            out.push_str("{{ ");
            out.push_str(expression);
            out.push_str(" }}");
        }
        NodeKind::InlineBlock(block) => push_block_marker(out, &block.name, &block.args),
        NodeKind::Tag(tag) => render_tag(document, node, tag, out)?,
        NodeKind::Comment(CommentKind::Html) => {
            out.push_str("<!--");
            out.push_str(&render_raw_body(document, node)?);
            out.push_str(" -->");
        }
        NodeKind::Comment(CommentKind::Silent) => {}
        NodeKind::Comment(CommentKind::Conditional(condition)) => {
            out.push_str("<!--[");
            out.push_str(condition);
            out.push_str("]>");
            render_children(document, node, out)?;
            out.push_str("<![endif]-->");
        }
        NodeKind::Filter(filter) => {
            out.push_str(filter.open());
            out.push_str(&render_raw_body(document, node)?);
            out.push_str(filter.close());
        }
        NodeKind::Block(block) => {
            push_block_marker(out, &block.name, &block.args);
            render_children(document, node, out)?;
            if block.renders_close {
                push_block_marker(out, block.spec.close, "");
            }
        }
    }
    Ok(())
}

fn render_children(document: &Document, node: &Node, out: &mut String) -> Result<(), ParseError> {
    for &child in &node.children {
        render_node(document, child, out)?;
    }
    Ok(())
}

/// Children joined by newlines, without trailing blank lines.
fn render_raw_body(document: &Document, node: &Node) -> Result<String, ParseError> {
    let lines = node
        .children
        .iter()
        .map(|&child| {
            let mut line = String::new();
            render_node(document, child, &mut line)?;
            Ok(line)
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    Ok(lines.join("\n").trim_end_matches('\n').to_string())
}

fn push_block_marker(out: &mut String, name: &str, args: &str) {
    out.push_str("{% ");
    out.push_str(name);
    if !args.is_empty() {
        out.push(' ');
        out.push_str(args);
    }
    out.push_str(" %}");
}

fn render_tag(
    document: &Document,
    node: &Node,
    tag: &TagData,
    out: &mut String,
) -> Result<(), ParseError> {
    out.push('<');
    out.push_str(&tag.name);

    if let Some(id) = &tag.id {
        if tag.attribute("id").is_some() {
            return Err(
                ParseError::new(ErrorKind::DuplicateId).at_line(node.line_number, &tag.source_line)
            );
        }
        out.push_str(" id=\"");
        out.push_str(id);
        out.push('"');
    }

    let explicit_class = tag.attribute("class");
    let explicit_value = explicit_class
        .map(Attribute::value_text)
        .filter(|value| !value.is_empty());
    let classes: Vec<&str> = explicit_value
        .as_deref()
        .into_iter()
        .chain(tag.classes.iter().map(String::as_str))
        .collect();
    if !classes.is_empty() {
        let quote = match explicit_class.and_then(|attr| attr.value.as_ref()) {
            Some(AttributeValue::Str { quote, .. }) => *quote,
            _ => '"',
        };
        out.push_str(" class=");
        out.push(quote);
        out.push_str(&classes.join(" "));
        out.push(quote);
    } else if let Some(attr) = explicit_class {
        // Nothing to merge; keep the attribute as written.
        out.push(' ');
        out.push_str(&attr.to_string());
    }

    for attr in tag.attributes.iter().filter(|attr| attr.name != "class") {
        out.push(' ');
        out.push_str(&attr.to_string());
    }

    if tag.self_closing {
        out.push_str(" />");
        return Ok(());
    }

    out.push('>');
    render_children(document, node, out)?;
    out.push_str("</");
    out.push_str(&tag.name);
    out.push('>');
    Ok(())
}
