use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerSource {
    /// `RESUMETEX_LATEX_BINARY` pointed at the binary
    EnvOverride,
    /// Found on the system `PATH`
    SystemPath,
}

impl fmt::Display for CompilerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerSource::EnvOverride => write!(f, "environment override"),
            CompilerSource::SystemPath => write!(f, "system PATH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerInfo {
    /// Program name that was requested
    pub program: String,
    pub path: PathBuf,
    pub source: CompilerSource,
}
