//! Static lookup tables consumed by the parser.
//!
//! These are plain data: which tags never take children, which keywords
//! each template engine treats as blocks, and what each `!!!` doctype
//! expands to.

use serde::Serialize;

/// Tags that are rendered as `<tag />` and never hold children.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Returns true if `tag` is in [`SELF_CLOSING_TAGS`], ignoring ASCII case.
#[must_use]
pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(tag))
}

/// A multi-line template block: the keyword that opens it, the keyword
/// that closes it, and the keywords that may continue it before it closes.
///
/// `("if", "endif", ["elif", "else"])` renders as
///
/// ```text
/// {% if a %}...{% elif b %}...{% else %}...{% endif %}
/// ```
///
/// The order of the continuations is not enforced; that is left to the
/// template engine.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BlockSpec {
    /// Keyword that starts the block.
    pub open: &'static str,
    /// Keyword of the closing marker.
    pub close: &'static str,
    /// Keywords that may chain onto an open block of this kind.
    pub continuations: &'static [&'static str],
}

impl BlockSpec {
    const fn new(
        open: &'static str,
        close: &'static str,
        continuations: &'static [&'static str],
    ) -> Self {
        Self {
            open,
            close,
            continuations,
        }
    }

    /// Whether `keyword` may continue a block of this kind.
    #[must_use]
    pub fn continues_with(&self, keyword: &str) -> bool {
        self.continuations.contains(&keyword)
    }
}

/// Blocks understood by Jinja2 templates.
pub static JINJA_BLOCKS: &[BlockSpec] = &[
    BlockSpec::new("block", "endblock", &[]),
    BlockSpec::new("call", "endcall", &[]),
    BlockSpec::new("for", "endfor", &["else"]),
    BlockSpec::new("filter", "endfilter", &[]),
    BlockSpec::new("if", "endif", &["elif", "else"]),
    BlockSpec::new("macro", "endmacro", &[]),
    BlockSpec::new("set", "endset", &[]),
];

/// Blocks understood by Django templates.
pub static DJANGO_BLOCKS: &[BlockSpec] = &[
    BlockSpec::new("autoescape", "endautoescape", &[]),
    BlockSpec::new("block", "endblock", &[]),
    BlockSpec::new("comment", "endcomment", &[]),
    BlockSpec::new("for", "endfor", &["empty"]),
    BlockSpec::new("filter", "endfilter", &[]),
    BlockSpec::new("if", "endif", &["elif", "else"]),
    BlockSpec::new("ifchanged", "endifchanged", &[]),
    BlockSpec::new("ifequal", "endifequal", &[]),
    BlockSpec::new("spaceless", "endspaceless", &[]),
    BlockSpec::new("verbatim", "endverbatim", &[]),
    BlockSpec::new("with", "endwith", &[]),
];

/// Doctype keywords (the text after `!!!`, lowercased and trimmed) and the
/// declaration each one expands to.
pub const DOCTYPES: &[(&str, &str)] = &[
    ("", "<!DOCTYPE html>"),
    ("5", "<!DOCTYPE html>"),
    (
        "1.0",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
    ),
    (
        "strict",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
    ),
    (
        "frameset",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Frameset//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd">"#,
    ),
    (
        "1.1",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#,
    ),
    (
        "basic",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML Basic 1.1//EN" "http://www.w3.org/TR/xhtml-basic/xhtml-basic11.dtd">"#,
    ),
    (
        "mobile",
        r#"<!DOCTYPE html PUBLIC "-//WAPFORUM//DTD XHTML Mobile 1.2//EN" "http://www.openmobilealliance.org/tech/DTD/xhtml-mobile12.dtd">"#,
    ),
    (
        "rdfa",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML+RDFa 1.0//EN" "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd">"#,
    ),
];

/// Look up the declaration for a doctype keyword, ignoring ASCII case and
/// surrounding whitespace.
#[must_use]
pub fn doctype(keyword: &str) -> Option<&'static str> {
    let keyword = keyword.trim();
    DOCTYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(keyword))
        .map(|(_, declaration)| *declaration)
}
