//! LaTeX compiler resolution and execution for resumetex.
//!
//! This crate locates a LaTeX compiler, runs it on a rendered source file and
//! records its diagnostics when it fails.
//!
//! # Architecture
//!
//! - [`info`]: Types describing a resolved compiler
//! - [`resolve`]: Compiler lookup (environment override, then `PATH`)
//! - [`exec`]: Compiler execution with output capture
//! - [`log`]: Failure log writing and tail extraction
//!
//! # Resolution Flow
//!
//! ```text
//! resolve_compiler()
//!     ↓
//! 1. RESUMETEX_LATEX_BINARY (if set and pointing at a file)
//!     ↓ (not set)
//! 2. which::which(program)
//!     ↓ (not found)
//! 3. NotFound with searched locations
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use resumetex_latex::{ExecOptions, ResolveOptions, ResolveResult, exec_compiler, resolve_compiler};
//! use std::path::Path;
//!
//! # fn main() -> resumetex_core::Result<()> {
//! match resolve_compiler(&ResolveOptions::new("pdflatex")) {
//!     ResolveResult::Found(info) => {
//!         let options = ExecOptions::for_source(
//!             info.path,
//!             vec!["-interaction=nonstopmode".to_string()],
//!             Path::new("resume.tex"),
//!         );
//!         let result = exec_compiler(&options)?;
//!         println!("Exit code: {}", result.exit_code);
//!     }
//!     ResolveResult::NotFound { program, .. } => {
//!         println!("{} not found", program);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod exec;
pub mod info;
pub mod log;
pub mod resolve;

// Re-export commonly used types
pub use exec::{ExecOptions, ExecResult, exec_compiler};
pub use info::{CompilerInfo, CompilerSource};
pub use log::{format_failure_log, log_tail, write_failure_log};
pub use resolve::{LATEX_BINARY_ENV, ResolveOptions, ResolveResult, probe_version, resolve_compiler};

// Type alias for convenience
pub type Result<T> = resumetex_core::Result<T>;
