use super::consts;
use crate::error::{Result, ResumetexError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// resumetex.toml schema
///
/// Every section is optional; an absent file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compiler: CompilerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Executable name (resolved on PATH) or path
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: consts::compiler::DEFAULT_PROGRAM.to_string(),
            args: consts::compiler::DEFAULT_ARGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Rendered LaTeX file, relative to the working directory
    pub source: PathBuf,
    /// Compiler log written on failure
    pub log: PathBuf,
    pub log_tail_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(consts::output::DEFAULT_SOURCE),
            log: PathBuf::from(consts::output::DEFAULT_LOG),
            log_tail_lines: consts::output::DEFAULT_LOG_TAIL_LINES,
        }
    }
}

impl OutputConfig {
    /// PDF produced next to the source file
    pub fn pdf(&self) -> PathBuf {
        self.source.with_extension("pdf")
    }
}

impl Config {
    /// Parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ResumetexError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load an explicit config file, or `resumetex.toml` from `dir` if present
    ///
    /// An explicit path must exist. Without one, a missing file yields the
    /// defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = dir.join(consts::CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            debug!(dir = %dir.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.compiler.program.trim().is_empty() {
            return Err(ResumetexError::ConfigInvalidValue {
                field: "compiler.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.output.source.as_os_str().is_empty() {
            return Err(ResumetexError::ConfigInvalidValue {
                field: "output.source".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.output.log.as_os_str().is_empty() {
            return Err(ResumetexError::ConfigInvalidValue {
                field: "output.log".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
