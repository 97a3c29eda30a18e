//! Global context for CLI commands

use anyhow::{Context as _, Result};
use resumetex_core::config::Config;
use std::env;
use std::path::{Path, PathBuf};

/// Working directory and loaded config
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Load config from `config_path`, or `resumetex.toml` in the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be determined
    /// - An explicit config file is missing
    /// - The config file cannot be parsed or holds invalid values
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let cwd = env::current_dir()?;
        let config = Config::load(config_path, &cwd).with_context(|| match config_path {
            Some(path) => format!("Failed to load config '{}'", path.display()),
            None => "Failed to load config".to_string(),
        })?;

        Ok(Self {
            cwd,
            config,
            verbose,
        })
    }
}
