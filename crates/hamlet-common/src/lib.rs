//! Common definitions for the hamlet compiler.
//!
//! This crate provides shared infrastructure used by every other crate:
//! - **Errors** - the single fatal [`ParseError`] type and its [`ErrorKind`]s
//! - **Options** - [`ParseOptions`] and the [`Engine`] selection
//! - **Tables** - self-closing tags, engine block keywords and doctypes

pub mod config;
pub mod error;
pub mod tables;

pub use config::{Engine, ParseOptions};
pub use error::{ErrorKind, ParseError};
pub use tables::BlockSpec;
