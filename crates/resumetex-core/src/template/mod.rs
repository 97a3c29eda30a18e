//! Template module - Pure text substitution template engine
//!
//! This module renders the LaTeX resume layout from an escaped data record.
//!
//! ## Philosophy
//!
//! - **Pure text substitution**: no LaTeX evaluation, no escaping. Data must
//!   already be escaped ([`crate::escape`]) before it reaches the engine.
//! - **Explicit syntax**: delimiters are a [`Syntax`] value handed to the
//!   engine, never global state.
//!
//! ## Syntax (default delimiters `<<` / `>>`)
//!
//! - Basic placeholders: `<<key>>` or `<< key >>` (spaces optional)
//! - Nested access: `<< nested.key >>`
//! - List iteration: `<< each items |item| >> ... << /each >>`
//! - Conditional: `<< if items >> ... << /if >>` (skipped when empty or absent)
//! - Escape sequences: `\<<literal>>`

pub mod engine;
pub mod error;
pub mod syntax;

pub use engine::{TemplateContext, TemplateEngine, render};
pub use error::TemplateError;
pub use syntax::Syntax;
