//! Defaults shared by the config model and the CLI

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "resumetex.toml";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "RESUMETEX_CONFIG";

pub mod compiler {
    /// Compiler executable looked up on PATH
    pub const DEFAULT_PROGRAM: &str = "pdflatex";

    /// Arguments passed before the source file
    pub const DEFAULT_ARGS: &[&str] = &["-interaction=nonstopmode"];
}

pub mod output {
    /// Rendered LaTeX source
    pub const DEFAULT_SOURCE: &str = "resume.tex";

    /// Compiler diagnostics on failure
    pub const DEFAULT_LOG: &str = "latex_error.log";

    /// Lines of the failure log shown on the terminal
    pub const DEFAULT_LOG_TAIL_LINES: usize = 20;
}
