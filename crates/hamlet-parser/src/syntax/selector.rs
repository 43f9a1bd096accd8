//! Tag lines: `%name.class#id(attrs) text`.
//!
//! A line starting with `.` or `#` is a `div` with the name left out.

use hamlet_common::{ErrorKind, ParseOptions};
use hamlet_dom::{NodeKind, TagData};

use super::attributes::parse_attributes;
use super::variable;

/// Parse a tag line into the tag and its optional inline child (literal
/// text or a variable).
///
/// # Errors
///
/// Returns the selector, attribute or variable error for a malformed line.
pub fn parse_tag(
    content: &str,
    options: ParseOptions,
) -> Result<(TagData, Option<NodeKind>), ErrorKind> {
    let (mut tag, mut rest) = match content.strip_prefix('%') {
        Some(after) => {
            let name_len = tag_name_len(after)?;
            (TagData::new(&after[..name_len]), &after[name_len..])
        }
        None => (TagData::new("div"), content),
    };

    while let Some(after) = rest.strip_prefix('.') {
        let (class, after) = split_name(after);
        if class.is_empty() {
            return Err(ErrorKind::EmptySelectorPart("class"));
        }
        tag.classes.push(class.to_string());
        rest = after;
    }

    while let Some(after) = rest.strip_prefix('#') {
        if tag.id.is_some() {
            return Err(ErrorKind::DuplicateId);
        }
        let (id, after) = split_name(after);
        if id.is_empty() {
            return Err(ErrorKind::EmptySelectorPart("id"));
        }
        tag.id = Some(id.to_string());
        rest = after;
    }

    if rest.starts_with('.') {
        return Err(ErrorKind::ClassAfterId);
    }

    let child = match rest.chars().next() {
        None => None,
        Some('(') => {
            let parsed = parse_attributes(rest)?;
            tag.attributes = parsed.attributes;
            inline_content(parsed.remainder, options)?
        }
        Some(' ') => {
            let text = &rest[1..];
            (!text.is_empty()).then(|| NodeKind::Text(text.to_string()))
        }
        Some('=') => Some(variable::parse_variable(rest, options)?),
        Some(c) => return Err(ErrorKind::ExpectedSpaceOrAttributes(c)),
    };

    Ok((tag, child))
}

/// Length of the tag name at the start of `text`.
fn tag_name_len(text: &str) -> Result<usize, ErrorKind> {
    match text.chars().next() {
        None => Err(ErrorKind::BlankTag),
        Some(c) if !c.is_ascii_alphabetic() => Err(ErrorKind::InvalidTagName(c)),
        Some(_) => Ok(text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(text.len())),
    }
}

/// Split a class or id name off the front of `text`.
fn split_name(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(text.len());
    text.split_at(end)
}

/// What follows an attribute list: nothing, a variable, or text.
fn inline_content(remainder: &str, options: ParseOptions) -> Result<Option<NodeKind>, ErrorKind> {
    if remainder.is_empty() {
        Ok(None)
    } else if remainder.starts_with('=') {
        variable::parse_variable(remainder, options).map(Some)
    } else {
        Ok(Some(NodeKind::Text(remainder.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use hamlet_common::Engine;
    use hamlet_dom::Attribute;

    use super::*;

    fn tag(content: &str) -> (TagData, Option<NodeKind>) {
        parse_tag(content, ParseOptions::with_engine(Engine::Jinja)).unwrap()
    }

    fn tag_err(content: &str) -> ErrorKind {
        parse_tag(content, ParseOptions::new()).unwrap_err()
    }

    #[test]
    fn test_plain_tag() {
        let (data, child) = tag("%p");
        assert_eq!(data.name, "p");
        assert!(data.classes.is_empty());
        assert_eq!(data.id, None);
        assert!(!data.self_closing);
        assert_eq!(child, None);
    }

    #[test]
    fn test_implied_div() {
        let (data, _) = tag(".class#id");
        assert_eq!(data.name, "div");
        assert_eq!(data.classes, vec!["class".to_string()]);
        assert_eq!(data.id.as_deref(), Some("id"));

        let (data, _) = tag("#main");
        assert_eq!(data.name, "div");
        assert_eq!(data.id.as_deref(), Some("main"));
    }

    #[test]
    fn test_classes_in_order() {
        let (data, _) = tag("%span.a.b_c.d-e#x");
        assert_eq!(data.classes, vec!["a", "b_c", "d-e"]);
        assert_eq!(data.id.as_deref(), Some("x"));
    }

    #[test]
    fn test_hyphenated_tag_name() {
        let (data, _) = tag("%my-tag.x");
        assert_eq!(data.name, "my-tag");
        assert_eq!(data.classes, vec!["x"]);
    }

    #[test]
    fn test_inline_text_keeps_everything_after_one_space() {
        let (_, child) = tag("%p  two spaces ");
        assert_eq!(child, Some(NodeKind::Text(" two spaces ".to_string())));

        let (_, child) = tag("%p ");
        assert_eq!(child, None);
    }

    #[test]
    fn test_self_closing() {
        let (data, _) = tag("%BR");
        assert!(data.self_closing);
        let (data, child) = tag("%img(src='a.png') ignored");
        assert!(data.self_closing);
        assert_eq!(child, Some(NodeKind::Text("ignored".to_string())));
    }

    #[test]
    fn test_attributes_and_remainder() {
        let (data, child) = tag("%a(href='#' target=\"_blank\") link");
        assert_eq!(
            data.attributes,
            vec![
                Attribute::string("href", "#", '\''),
                Attribute::string("target", "_blank", '"'),
            ]
        );
        assert_eq!(child, Some(NodeKind::Text("link".to_string())));
    }

    #[test]
    fn test_inline_variable() {
        let (_, child) = tag("%p= user.name");
        assert_eq!(child, Some(NodeKind::Variable("user.name".to_string())));

        let (_, child) = tag("%a(href='#')= title");
        assert_eq!(child, Some(NodeKind::Variable("title".to_string())));

        let (_, child) = tag("%p = not a variable");
        assert_eq!(child, Some(NodeKind::Text("= not a variable".to_string())));
    }

    #[test]
    fn test_inline_variable_needs_engine() {
        assert_eq!(tag_err("%p= x"), ErrorKind::EngineNotConfigured("variable"));
    }

    #[test]
    fn test_selector_errors() {
        assert_eq!(tag_err("%"), ErrorKind::BlankTag);
        assert_eq!(tag_err("%1"), ErrorKind::InvalidTagName('1'));
        assert_eq!(tag_err("%.x"), ErrorKind::InvalidTagName('.'));
        assert_eq!(tag_err("%p."), ErrorKind::EmptySelectorPart("class"));
        assert_eq!(tag_err("#"), ErrorKind::EmptySelectorPart("id"));
        assert_eq!(tag_err("#a#b"), ErrorKind::DuplicateId);
        assert_eq!(tag_err("#id.class"), ErrorKind::ClassAfterId);
        assert_eq!(tag_err("%input#id/"), ErrorKind::ExpectedSpaceOrAttributes('/'));
        assert_eq!(tag_err("%p(a"), ErrorKind::UnterminatedAttributes);
    }
}
