use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumetexError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse '{path}': {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Input data errors
    #[error("DATA_PARSE_ERROR: failed to parse '{path}': {reason}")]
    DataParseError { path: PathBuf, reason: String },

    // Rendering errors
    #[error("TEMPLATE_ERROR: {0}")]
    TemplateError(crate::template::error::TemplateError),

    // Compiler errors
    #[error("COMPILER_EXEC_FAILED: {0}")]
    CompilerExecFailed(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(std::io::Error),
}

// The wrapped error is already part of the message, so it is not exposed as
// `source()`; otherwise `{:#}` chains print it twice.
impl From<crate::template::error::TemplateError> for ResumetexError {
    fn from(err: crate::template::error::TemplateError) -> Self {
        ResumetexError::TemplateError(err)
    }
}

impl From<std::io::Error> for ResumetexError {
    fn from(err: std::io::Error) -> Self {
        ResumetexError::IoError(err)
    }
}

pub type Result<T> = std::result::Result<T, ResumetexError>;
