//! Indentation measurement.
//!
//! The first indented line of a buffer fixes the indentation unit: the
//! whitespace character it uses and how many of them make one level. Every
//! later line is measured against that unit.

use hamlet_common::ErrorKind;
use tracing::trace;

/// The whitespace that makes up one level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentUnit {
    /// Either a space or a tab.
    pub ch: char,
    /// Number of `ch` per level.
    pub width: usize,
}

/// Per-buffer indentation state.
#[derive(Debug, Clone, Default)]
pub struct IndentTracker {
    unit: Option<IndentUnit>,
}

impl IndentTracker {
    /// A tracker that has not seen an indented line yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { unit: None }
    }

    /// The inferred unit, once an indented line has been measured.
    #[must_use]
    pub const fn unit(&self) -> Option<IndentUnit> {
        self.unit
    }

    /// Indentation level of `line`, or `None` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MixedIndentation`] if the leading whitespace mixes
    /// characters, and [`ErrorKind::UnevenIndentation`] if it is not a whole
    /// number of units.
    pub fn measure(&mut self, line: &str) -> Result<Option<usize>, ErrorKind> {
        if is_blank(line) {
            return Ok(None);
        }

        let whitespace = leading_whitespace(line);
        let Some(first) = whitespace.chars().next() else {
            return Ok(Some(0));
        };

        let Some(unit) = self.unit else {
            if whitespace.chars().any(|c| c != first) {
                return Err(ErrorKind::MixedIndentation);
            }
            let unit = IndentUnit {
                ch: first,
                width: whitespace.len(),
            };
            trace!(ch = ?unit.ch, width = unit.width, "inferred indentation unit");
            self.unit = Some(unit);
            return Ok(Some(1));
        };

        if whitespace.chars().any(|c| c != unit.ch) {
            return Err(ErrorKind::MixedIndentation);
        }
        if whitespace.len() % unit.width != 0 {
            return Err(ErrorKind::UnevenIndentation { unit: unit.width });
        }
        Ok(Some(whitespace.len() / unit.width))
    }

    /// Strip up to `level` units from a line inside a raw-text region whose
    /// opening line sits at `level - 1`.
    ///
    /// Any line indented past the opening line stays in the region, even
    /// when its indentation is not a whole number of units; the remainder
    /// is returned verbatim. Returns `None` when the line closes the region
    /// and should be measured normally instead. The unit is inferred from
    /// this line if it is still unknown.
    ///
    /// # Errors
    ///
    /// Propagates errors from inferring the unit.
    pub fn strip_raw<'a>(
        &mut self,
        line: &'a str,
        level: usize,
    ) -> Result<Option<&'a str>, ErrorKind> {
        if self.unit.is_none() {
            if leading_whitespace(line).is_empty() {
                return Ok(None);
            }
            let _ = self.measure(line)?;
        }
        let Some(unit) = self.unit else {
            return Ok(None);
        };

        let prefix = line.chars().take_while(|&c| c == unit.ch).count();
        let opening = level.saturating_sub(1) * unit.width;
        if prefix <= opening {
            return Ok(None);
        }
        Ok(Some(&line[prefix.min(level * unit.width)..]))
    }
}

/// Whether a line is empty or holds only spaces and tabs.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

/// The run of spaces and tabs at the start of `line`.
#[must_use]
pub fn leading_whitespace(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}
