//! Parse options.
//!
//! Options are passed explicitly into every parse; there is no global
//! default engine.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::tables::{BlockSpec, DJANGO_BLOCKS, JINJA_BLOCKS};

/// The template language that `-` block lines and `=` variable lines are
/// compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Engine {
    /// Jinja2.
    Jinja,
    /// Django templates.
    Django,
}

impl Engine {
    /// The block keyword table for this engine.
    #[must_use]
    pub const fn blocks(self) -> &'static [BlockSpec] {
        match self {
            Self::Jinja => JINJA_BLOCKS,
            Self::Django => DJANGO_BLOCKS,
        }
    }

    /// The block whose opening keyword is `keyword`, if any.
    #[must_use]
    pub fn opening_block(self, keyword: &str) -> Option<&'static BlockSpec> {
        self.blocks().iter().find(|spec| spec.open == keyword)
    }

    /// Whether `keyword` continues at least one of this engine's blocks.
    #[must_use]
    pub fn is_continuation(self, keyword: &str) -> bool {
        self.blocks().iter().any(|spec| spec.continues_with(keyword))
    }
}

/// Options for a single parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Template engine for block and variable syntax. `None` disables both.
    pub engine: Option<Engine>,
}

impl ParseOptions {
    /// Options with no template engine.
    #[must_use]
    pub const fn new() -> Self {
        Self { engine: None }
    }

    /// Options targeting the given engine.
    #[must_use]
    pub const fn with_engine(engine: Engine) -> Self {
        Self {
            engine: Some(engine),
        }
    }
}
