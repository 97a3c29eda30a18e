//! Compiler failure log

use crate::Result;
use crate::exec::ExecResult;
use std::path::Path;
use tracing::debug;

/// Separator between captured stdout and stderr in the failure log
pub const STDERR_SEPARATOR: &str = "\n--- STDERR ---\n";

/// Format a failed run as stdout, the separator, then stderr
///
/// The compiler's bytes are copied unchanged.
pub fn format_failure_log(result: &ExecResult) -> Vec<u8> {
    let mut log = Vec::with_capacity(
        result.stdout.len() + STDERR_SEPARATOR.len() + result.stderr.len(),
    );
    log.extend_from_slice(&result.stdout);
    log.extend_from_slice(STDERR_SEPARATOR.as_bytes());
    log.extend_from_slice(&result.stderr);
    log
}

/// Write the failure log, replacing any previous one
///
/// Missing parent directories are created.
pub fn write_failure_log(path: &Path, result: &ExecResult) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, format_failure_log(result))?;
    debug!(path = %path.display(), "wrote compiler log");
    Ok(())
}

/// Last `lines` non-empty lines of `text`, in order
pub fn log_tail(text: &str, lines: usize) -> Vec<&str> {
    let mut tail: Vec<&str> = text
        .lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .take(lines)
        .collect();
    tail.reverse();
    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumetex_testkit::temp_dir_in_workspace;

    fn failed_run() -> ExecResult {
        ExecResult {
            exit_code: 1,
            stdout: b"This is pdfTeX\n! Undefined control sequence.".to_vec(),
            stderr: b"fatal".to_vec(),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_format_failure_log() {
        assert_eq!(
            format_failure_log(&failed_run()),
            b"This is pdfTeX\n! Undefined control sequence.\n--- STDERR ---\nfatal"
        );
    }

    #[test]
    fn test_format_with_empty_streams() {
        let result = ExecResult {
            stdout: Vec::new(),
            stderr: Vec::new(),
            ..failed_run()
        };
        assert_eq!(format_failure_log(&result), STDERR_SEPARATOR.as_bytes());
    }

    #[test]
    fn test_write_failure_log_overwrites() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("latex_error.log");
        std::fs::write(&path, "stale content").unwrap();

        write_failure_log(&path, &failed_run()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with("This is pdfTeX"));
        assert!(content.ends_with("--- STDERR ---\nfatal"));
    }

    #[test]
    fn test_write_failure_log_creates_parent_dirs() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("logs/nested/latex_error.log");

        write_failure_log(&path, &failed_run()).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_write_failure_log_keeps_raw_bytes() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("latex_error.log");
        let result = ExecResult {
            stdout: b"caf\xe9 error".to_vec(),
            stderr: b"\xff".to_vec(),
            ..failed_run()
        };

        write_failure_log(&path, &result).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"caf\xe9 error"));
        assert!(bytes.ends_with(b"--- STDERR ---\n\xff"));
    }

    #[test]
    fn test_log_tail() {
        let text = "a\nb\n\nc\nd\n";
        assert_eq!(log_tail(text, 2), vec!["c", "d"]);
        assert_eq!(log_tail(text, 10), vec!["a", "b", "c", "d"]);
        assert!(log_tail(text, 0).is_empty());
        assert!(log_tail("", 5).is_empty());
    }
}
