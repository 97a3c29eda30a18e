//! The fixed resume layout

use crate::error::Result;
use crate::escape::EscapedRecord;
use crate::template::{Syntax, TemplateContext, TemplateEngine};

/// LaTeX source of the resume, written with the default `<<` / `>>` syntax
pub const RESUME_TEMPLATE: &str = include_str!("../builtin_templates/resume.tmp.tex");

/// A template source together with the delimiters it is written in
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub source: &'static str,
    pub syntax: Syntax,
}

impl Layout {
    /// The single built-in resume layout
    pub fn resume() -> Self {
        Self {
            source: RESUME_TEMPLATE,
            syntax: Syntax::default(),
        }
    }

    /// Render the layout from escaped data
    pub fn render(&self, record: &EscapedRecord) -> Result<String> {
        let engine = TemplateEngine::new(self.syntax.clone())?;
        let context = TemplateContext::from_escaped(record);
        Ok(engine.render(self.source, &context)?)
    }
}

/// Render the built-in resume layout
pub fn render_resume(record: &EscapedRecord) -> Result<String> {
    Layout::resume().render(record)
}
