//! Test utilities for resumetex
//!
//! This crate provides shared testing utilities used across the resumetex workspace.

mod env;
mod fixtures;

pub use env::{ENV_LOCK, LATEX_BINARY_ENV, with_isolated_latex_env};
pub use fixtures::{FakeCompiler, write_fake_compiler};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test temporary files end up in a single gitignored location that is
/// easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use resumetex_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("resume.tex");
/// std::fs::write(&file_path, "\\documentclass{article}").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_under_dot_tmp() {
        let temp = temp_dir_in_workspace();
        let parent = temp.path().parent().unwrap();
        assert!(parent.ends_with(".tmp"));
        assert!(temp.path().is_dir());
    }

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().to_path_buf();
        drop(temp);
        assert!(!path.exists());
    }
}
