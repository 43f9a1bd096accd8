//! Attribute list state machine.
//!
//! Parses a parenthesised list such as `(href="#" data-id=12 required)`
//! one character at a time. Each state has a `handle_*_state` method that
//! consumes the current character and decides the next state.

use std::mem;

use hamlet_common::ErrorKind;
use hamlet_dom::{Attribute, AttributeValue};
use strum_macros::Display;
use tracing::trace;

/// States of the attribute parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttributeState {
    /// Skipping spaces before an attribute name.
    PreNameWhitespace,
    /// Accumulating an attribute name.
    AttrName,
    /// Skipping spaces after a name, before `=` or the next name.
    PostNameWhitespace,
    /// Skipping spaces after `=`, before the value.
    PreValueWhitespace,
    /// Accumulating a quoted or integer value.
    Value,
    /// The closing parenthesis has been consumed.
    Done,
}

/// How the value currently being read is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Quoted(char),
    Integer,
}

/// Result of parsing an attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttributes<'a> {
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Text after the closing parenthesis, with leading whitespace removed.
    pub remainder: &'a str,
}

/// Parse an attribute list. `text` must start at the opening `(`.
///
/// # Errors
///
/// Fails on any character the current state has no transition for, on a
/// duplicate name, on a malformed integer, and if the line ends before the
/// closing `)`.
pub fn parse_attributes(text: &str) -> Result<ParsedAttributes<'_>, ErrorKind> {
    AttributeParser::new(text).run()
}

/// Scratch state for one attribute list.
#[derive(Debug)]
struct AttributeParser<'a> {
    input: &'a str,
    state: AttributeState,
    attributes: Vec<Attribute>,
    name: String,
    value: String,
    value_kind: ValueKind,
}

impl<'a> AttributeParser<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            state: AttributeState::PreNameWhitespace,
            attributes: Vec::new(),
            name: String::new(),
            value: String::new(),
            value_kind: ValueKind::Integer,
        }
    }

    fn run(mut self) -> Result<ParsedAttributes<'a>, ErrorKind> {
        let mut chars = self.input.char_indices();
        match chars.next() {
            Some((_, '(')) => {}
            Some((_, c)) => return Err(ErrorKind::ExpectedSpaceOrAttributes(c)),
            None => return Err(ErrorKind::UnterminatedAttributes),
        }

        let mut end = None;
        for (pos, c) in chars {
            match self.state {
                AttributeState::PreNameWhitespace => self.handle_pre_name_whitespace_state(c)?,
                AttributeState::AttrName => self.handle_attr_name_state(c)?,
                AttributeState::PostNameWhitespace => {
                    self.handle_post_name_whitespace_state(c)?;
                }
                AttributeState::PreValueWhitespace => {
                    self.handle_pre_value_whitespace_state(c)?;
                }
                AttributeState::Value => self.handle_value_state(c)?,
                AttributeState::Done => {}
            }
            if self.state == AttributeState::Done {
                end = Some(pos + c.len_utf8());
                break;
            }
        }

        let Some(end) = end else {
            trace!(state = %self.state, "attribute list ended before ')'");
            return Err(ErrorKind::UnterminatedAttributes);
        };

        Ok(ParsedAttributes {
            attributes: self.attributes,
            remainder: self.input[end..].trim_start(),
        })
    }

    const fn switch_to(&mut self, new_state: AttributeState) {
        self.state = new_state;
    }

    fn handle_pre_name_whitespace_state(&mut self, c: char) -> Result<(), ErrorKind> {
        match c {
            ' ' => {}
            ')' => self.switch_to(AttributeState::Done),
            c if is_name_char(c) => {
                self.name.push(c);
                self.switch_to(AttributeState::AttrName);
            }
            c => return Err(ErrorKind::UnexpectedCharacter(c)),
        }
        Ok(())
    }

    fn handle_attr_name_state(&mut self, c: char) -> Result<(), ErrorKind> {
        match c {
            c if is_name_char(c) => self.name.push(c),
            ' ' => self.switch_to(AttributeState::PostNameWhitespace),
            '=' => self.switch_to(AttributeState::PreValueWhitespace),
            ')' => {
                self.commit(None)?;
                self.switch_to(AttributeState::Done);
            }
            c => return Err(ErrorKind::UnexpectedCharacter(c)),
        }
        Ok(())
    }

    fn handle_post_name_whitespace_state(&mut self, c: char) -> Result<(), ErrorKind> {
        match c {
            ' ' => {}
            '=' => self.switch_to(AttributeState::PreValueWhitespace),
            ')' => {
                self.commit(None)?;
                self.switch_to(AttributeState::Done);
            }
            // The previous name had no value; this starts the next one.
            c if is_name_char(c) => {
                self.commit(None)?;
                self.name.push(c);
                self.switch_to(AttributeState::AttrName);
            }
            c => return Err(ErrorKind::UnexpectedCharacter(c)),
        }
        Ok(())
    }

    fn handle_pre_value_whitespace_state(&mut self, c: char) -> Result<(), ErrorKind> {
        match c {
            ' ' => {}
            '"' | '\'' => {
                self.value_kind = ValueKind::Quoted(c);
                self.switch_to(AttributeState::Value);
            }
            c if c.is_ascii_digit() => {
                self.value_kind = ValueKind::Integer;
                self.value.push(c);
                self.switch_to(AttributeState::Value);
            }
            ')' => return Err(ErrorKind::DanglingEquals),
            c => return Err(ErrorKind::UnexpectedCharacter(c)),
        }
        Ok(())
    }

    fn handle_value_state(&mut self, c: char) -> Result<(), ErrorKind> {
        match self.value_kind {
            ValueKind::Quoted(quote) if c == quote => {
                let value = mem::take(&mut self.value);
                self.commit(Some(AttributeValue::Str { value, quote }))?;
                self.switch_to(AttributeState::PreNameWhitespace);
            }
            ValueKind::Quoted(_) => self.value.push(c),
            ValueKind::Integer => match c {
                c if c.is_ascii_digit() => self.value.push(c),
                ' ' => {
                    self.commit_integer()?;
                    self.switch_to(AttributeState::PreNameWhitespace);
                }
                ')' => {
                    self.commit_integer()?;
                    self.switch_to(AttributeState::Done);
                }
                c => {
                    self.value.push(c);
                    return Err(ErrorKind::InvalidIntegerLiteral(mem::take(&mut self.value)));
                }
            },
        }
        Ok(())
    }

    fn commit_integer(&mut self) -> Result<(), ErrorKind> {
        let digits = mem::take(&mut self.value);
        match digits.parse::<u64>() {
            Ok(n) => self.commit(Some(AttributeValue::Integer(n))),
            Err(_) => Err(ErrorKind::InvalidIntegerLiteral(digits)),
        }
    }

    fn commit(&mut self, value: Option<AttributeValue>) -> Result<(), ErrorKind> {
        let name = mem::take(&mut self.name);
        if self.attributes.iter().any(|attr| attr.name == name) {
            return Err(ErrorKind::DuplicateAttribute(name));
        }
        self.attributes.push(Attribute { name, value });
        Ok(())
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-'
}
