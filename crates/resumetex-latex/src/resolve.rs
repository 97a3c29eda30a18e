use crate::info::{CompilerInfo, CompilerSource};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Environment variable that points at a compiler binary, bypassing `PATH`
pub const LATEX_BINARY_ENV: &str = "RESUMETEX_LATEX_BINARY";

/// Options for resolving the compiler
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Program name or path, e.g. `pdflatex`
    pub program: String,
}

impl ResolveOptions {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Result of compiler resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    Found(CompilerInfo),
    NotFound {
        program: String,
        searched_locations: Vec<String>,
    },
}

/// Resolve from the environment override
///
/// Returns `Err(location)` describing what was checked when the variable is
/// set but unusable.
fn resolve_env_override(program: &str) -> Option<Result<CompilerInfo, String>> {
    let value = std::env::var_os(LATEX_BINARY_ENV)?;
    if value.is_empty() {
        return None;
    }

    let path = PathBuf::from(value);
    if path.is_file() {
        Some(Ok(CompilerInfo {
            program: program.to_string(),
            path,
            source: CompilerSource::EnvOverride,
        }))
    } else {
        Some(Err(format!(
            "{}={} (not a file)",
            LATEX_BINARY_ENV,
            path.display()
        )))
    }
}

/// Resolve from the system `PATH`
fn resolve_system(program: &str) -> Option<CompilerInfo> {
    let path = which::which(program).ok()?;
    Some(CompilerInfo {
        program: program.to_string(),
        path,
        source: CompilerSource::SystemPath,
    })
}

/// Resolve the compiler based on options
///
/// Resolution priority:
/// 1. `RESUMETEX_LATEX_BINARY`
/// 2. System PATH
/// 3. NotFound
pub fn resolve_compiler(options: &ResolveOptions) -> ResolveResult {
    let program = options.program.as_str();
    let mut searched_locations = Vec::new();

    match resolve_env_override(program) {
        Some(Ok(info)) => {
            debug!(path = %info.path.display(), "compiler from environment override");
            return ResolveResult::Found(info);
        }
        Some(Err(location)) => searched_locations.push(location),
        None => {}
    }

    if let Some(info) = resolve_system(program) {
        debug!(path = %info.path.display(), "compiler found on PATH");
        return ResolveResult::Found(info);
    }
    searched_locations.push(format!("system PATH ({})", program));

    debug!(program, ?searched_locations, "compiler not found");
    ResolveResult::NotFound {
        program: program.to_string(),
        searched_locations,
    }
}

/// Run `<binary> --version` and return the first non-empty line
///
/// Returns `None` if the binary cannot be run or exits unsuccessfully.
pub fn probe_version(path: &Path) -> Option<String> {
    let output = Command::new(path)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
