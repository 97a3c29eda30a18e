//! Core of resumetex: data model, LaTeX escaping and template rendering.
//!
//! The pipeline is strictly sequential:
//!
//! ```text
//! Resume ──into_record──> Record ──escape_record──> EscapedRecord ──render_resume──> LaTeX
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod escape;
pub mod layout;
pub mod resume;
pub mod template;
pub mod value;

// Re-export commonly used types
pub use error::{Result, ResumetexError};
pub use escape::{EscapedRecord, escape_record};
pub use layout::{Layout, render_resume};
pub use resume::Resume;
pub use value::{Record, Value};
