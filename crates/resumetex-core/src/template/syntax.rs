//! Delimiter configuration for the template engine

/// Tag delimiters recognised by [`TemplateEngine`](super::TemplateEngine)
///
/// LaTeX uses `{` and `}` everywhere, so the default delimiters are `<<` and
/// `>>` instead of the usual double braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    pub open: String,
    pub close: String,
}

impl Syntax {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Check the delimiters can be tokenized unambiguously
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err("delimiters must not be empty".to_string());
        }
        if self.open == self.close {
            return Err(format!(
                "open and close delimiters must differ (both '{}')",
                self.open
            ));
        }
        if self.open.starts_with('\\') {
            return Err("open delimiter must not start with a backslash".to_string());
        }
        Ok(())
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::new("<<", ">>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_syntax_is_valid() {
        assert!(Syntax::default().validate().is_ok());
        assert_eq!(Syntax::default().open, "<<");
        assert_eq!(Syntax::default().close, ">>");
    }

    #[test]
    fn test_rejects_empty_delimiters() {
        assert!(Syntax::new("", ">>").validate().is_err());
        assert!(Syntax::new("<<", "").validate().is_err());
    }

    #[test]
    fn test_rejects_identical_delimiters() {
        let err = Syntax::new("@@", "@@").validate().unwrap_err();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn test_rejects_backslash_open() {
        assert!(Syntax::new("\\<", ">").validate().is_err());
    }
}
