//! Environment isolation utilities for testing
//!
//! Tests that touch process environment variables must hold [`ENV_LOCK`] so
//! they do not interfere with each other when run in parallel.

use std::path::Path;
use std::sync::Mutex;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variable that overrides compiler lookup
pub const LATEX_BINARY_ENV: &str = "RESUMETEX_LATEX_BINARY";

/// Run a test with a controlled compiler override
///
/// With `Some(path)`, `RESUMETEX_LATEX_BINARY` points at `path` for the
/// duration of `f`; with `None` the variable is removed. The previous value
/// is restored afterwards.
///
/// # Examples
///
/// ```no_run
/// use resumetex_testkit::with_isolated_latex_env;
/// use std::path::Path;
///
/// with_isolated_latex_env(Some(Path::new("/usr/bin/pdflatex")), || {
///     // compiler resolution sees the override here
/// });
/// ```
pub fn with_isolated_latex_env<F, R>(binary: Option<&Path>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| {
        // Environment variables remain valid after a panic; the lock only
        // serializes access
        poisoned.into_inner()
    });

    let original = std::env::var_os(LATEX_BINARY_ENV);

    // SAFETY: We hold ENV_LOCK, so no other test modifies env vars concurrently.
    unsafe {
        match binary {
            Some(path) => std::env::set_var(LATEX_BINARY_ENV, path),
            None => std::env::remove_var(LATEX_BINARY_ENV),
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        match original {
            Some(value) => std::env::set_var(LATEX_BINARY_ENV, value),
            None => std::env::remove_var(LATEX_BINARY_ENV),
        }
    }

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
