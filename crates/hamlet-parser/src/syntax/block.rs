//! Template block lines: `- keyword args`.
//!
//! A keyword that opens a block in the engine's table starts a new chain.
//! A continuation keyword (`else`, `elif`, `empty`) joins the chain of the
//! nearest preceding sibling, which then stops rendering its closing
//! marker. Anything else is a one-line tag with no closing marker.

use std::iter;

use hamlet_common::{Engine, ErrorKind};
use hamlet_dom::{BlockData, Document, InlineBlockData, NodeId, NodeKind};

/// The keyword and arguments of a block line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLine {
    /// Leading run of word characters after the `-`.
    pub keyword: String,
    /// Everything after the keyword, trimmed.
    pub args: String,
}

/// A resolved block line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedBlock {
    /// The node to attach.
    pub kind: NodeKind,
    /// The block this one continues, whose closing marker must be dropped.
    pub continues: Option<NodeId>,
}

/// Split a line starting with `-` into keyword and arguments.
///
/// # Errors
///
/// Returns [`ErrorKind::EmptyBlock`] if no keyword follows the `-`.
pub fn parse_block(content: &str) -> Result<BlockLine, ErrorKind> {
    let rest = content.strip_prefix('-').unwrap_or(content);
    let rest = rest.trim_start_matches(' ');
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(ErrorKind::EmptyBlock);
    }
    let (keyword, args) = rest.split_at(end);
    Ok(BlockLine {
        keyword: keyword.to_string(),
        args: args.trim().to_string(),
    })
}

/// Decide what a block line becomes when appended under `parent`.
///
/// # Errors
///
/// Returns [`ErrorKind::UnlinkedContinuation`] for a continuation keyword
/// whose nearest non-blank sibling is not a block it can continue.
pub fn link_block(
    document: &Document,
    parent: NodeId,
    line: BlockLine,
    engine: Engine,
) -> Result<LinkedBlock, ErrorKind> {
    let BlockLine { keyword, args } = line;

    if let Some(spec) = engine.opening_block(&keyword) {
        return Ok(LinkedBlock {
            kind: NodeKind::Block(BlockData {
                name: keyword,
                args,
                spec,
                linked_to: None,
                renders_close: true,
            }),
            continues: None,
        });
    }

    if engine.is_continuation(&keyword) {
        let previous = document
            .last_child(parent)
            .into_iter()
            .flat_map(|last| iter::once(last).chain(document.preceding_siblings(last)))
            .find(|&id| !document.is_blank_text(id));

        return match previous.and_then(|id| document.as_block(id).map(|block| (id, block))) {
            Some((id, block)) if block.spec.continues_with(&keyword) => Ok(LinkedBlock {
                kind: NodeKind::Block(BlockData {
                    name: keyword,
                    args,
                    spec: block.spec,
                    linked_to: Some(id),
                    renders_close: true,
                }),
                continues: Some(id),
            }),
            _ => Err(ErrorKind::UnlinkedContinuation(keyword)),
        };
    }

    Ok(LinkedBlock {
        kind: NodeKind::InlineBlock(InlineBlockData {
            name: keyword,
            args,
        }),
        continues: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_and_args() {
        assert_eq!(
            parse_block("- for x in  items  "),
            Ok(BlockLine {
                keyword: "for".to_string(),
                args: "x in  items".to_string(),
            })
        );
        assert_eq!(
            parse_block("-include 'a.html'"),
            Ok(BlockLine {
                keyword: "include".to_string(),
                args: "'a.html'".to_string(),
            })
        );
        assert_eq!(
            parse_block("- custom_tag"),
            Ok(BlockLine {
                keyword: "custom_tag".to_string(),
                args: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_empty_block() {
        assert_eq!(parse_block("-"), Err(ErrorKind::EmptyBlock));
        assert_eq!(parse_block("-   "), Err(ErrorKind::EmptyBlock));
        assert_eq!(parse_block("- (x)"), Err(ErrorKind::EmptyBlock));
    }

    #[test]
    fn test_unknown_keyword_is_inline() {
        let document = Document::new();
        let linked = link_block(
            &document,
            NodeId::ROOT,
            parse_block("- include 'x'").unwrap(),
            Engine::Jinja,
        )
        .unwrap();
        assert_eq!(
            linked.kind,
            NodeKind::InlineBlock(InlineBlockData {
                name: "include".to_string(),
                args: "'x'".to_string(),
            })
        );
        assert_eq!(linked.continues, None);
    }

    #[test]
    fn test_continuation_skips_blank_siblings() {
        let mut document = Document::new();
        let opened = link_block(
            &document,
            NodeId::ROOT,
            parse_block("- if x").unwrap(),
            Engine::Jinja,
        )
        .unwrap();
        let if_id = document.alloc(opened.kind, 1);
        document.append_child(NodeId::ROOT, if_id);
        let blank = document.alloc(NodeKind::Text(String::new()), 2);
        document.append_child(NodeId::ROOT, blank);

        let linked = link_block(
            &document,
            NodeId::ROOT,
            parse_block("- else").unwrap(),
            Engine::Jinja,
        )
        .unwrap();
        assert_eq!(linked.continues, Some(if_id));
        let NodeKind::Block(data) = linked.kind else {
            panic!("expected a block");
        };
        assert_eq!(data.linked_to, Some(if_id));
        assert_eq!(data.spec.close, "endif");
    }

    #[test]
    fn test_orphan_continuation() {
        let document = Document::new();
        assert_eq!(
            link_block(
                &document,
                NodeId::ROOT,
                parse_block("- else").unwrap(),
                Engine::Jinja,
            ),
            Err(ErrorKind::UnlinkedContinuation("else".to_string()))
        );
    }

    #[test]
    fn test_continuation_must_match_spec() {
        let mut document = Document::new();
        let opened = link_block(
            &document,
            NodeId::ROOT,
            parse_block("- with a=b").unwrap(),
            Engine::Django,
        )
        .unwrap();
        let with_id = document.alloc(opened.kind, 1);
        document.append_child(NodeId::ROOT, with_id);

        assert_eq!(
            link_block(
                &document,
                NodeId::ROOT,
                parse_block("- empty").unwrap(),
                Engine::Django,
            ),
            Err(ErrorKind::UnlinkedContinuation("empty".to_string()))
        );
    }
}
