use crate::Result;
use resumetex_core::ResumetexError;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, info};

/// Options for executing the compiler
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub binary: PathBuf,
    /// Arguments placed before the source file
    pub args: Vec<String>,
    /// Source file, relative to `working_dir`
    pub source: PathBuf,
    pub working_dir: PathBuf,
}

impl ExecOptions {
    /// Run in the directory holding `source` so the PDF lands next to it
    pub fn for_source(binary: PathBuf, args: Vec<String>, source: &Path) -> Self {
        let working_dir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| source.to_path_buf());

        Self {
            binary,
            args,
            source: file_name,
            working_dir,
        }
    }
}

/// Result of a compiler run
///
/// Output is kept as raw bytes; TeX engines print 8-bit characters that are
/// not valid UTF-8.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Process exit code, `-1` when terminated by a signal
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub duration_ms: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout decoded for display
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stderr decoded for display
    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Execute the compiler and capture its output
///
/// A non-zero exit is reported through [`ExecResult::exit_code`], not as an
/// error. Only a failure to start the process is an error.
pub fn exec_compiler(options: &ExecOptions) -> Result<ExecResult> {
    debug!(
        binary = %options.binary.display(),
        args = ?options.args,
        source = %options.source.display(),
        working_dir = %options.working_dir.display(),
        "running compiler"
    );

    let start = Instant::now();
    let output = Command::new(&options.binary)
        .args(&options.args)
        .arg(&options.source)
        .current_dir(&options.working_dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            ResumetexError::CompilerExecFailed(format!(
                "failed to run '{}': {}",
                options.binary.display(),
                e
            ))
        })?;

    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: output.stdout,
        stderr: output.stderr,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        exit_code = result.exit_code,
        duration_ms = result.duration_ms,
        "compiler finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_source_bare_file() {
        let options = ExecOptions::for_source(
            PathBuf::from("pdflatex"),
            vec![],
            Path::new("resume.tex"),
        );
        assert_eq!(options.working_dir, PathBuf::from("."));
        assert_eq!(options.source, PathBuf::from("resume.tex"));
    }

    #[test]
    fn test_for_source_nested_file() {
        let options = ExecOptions::for_source(
            PathBuf::from("pdflatex"),
            vec!["-interaction=nonstopmode".to_string()],
            Path::new("out/cv.tex"),
        );
        assert_eq!(options.working_dir, PathBuf::from("out"));
        assert_eq!(options.source, PathBuf::from("cv.tex"));
        assert_eq!(options.args, vec!["-interaction=nonstopmode"]);
    }

    #[test]
    fn test_missing_binary_is_exec_failure() {
        let options = ExecOptions::for_source(
            PathBuf::from("/nonexistent/path/to/pdflatex"),
            vec![],
            Path::new("resume.tex"),
        );
        match exec_compiler(&options) {
            Err(ResumetexError::CompilerExecFailed(msg)) => {
                assert!(msg.contains("/nonexistent/path/to/pdflatex"))
            }
            other => panic!("Expected CompilerExecFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use resumetex_testkit::{FakeCompiler, temp_dir_in_workspace, write_fake_compiler};

        #[test]
        fn test_success_writes_pdf_next_to_source() {
            let temp = temp_dir_in_workspace();
            let fake = write_fake_compiler(temp.path(), &FakeCompiler::succeeding());
            let source = temp.path().join("resume.tex");
            std::fs::write(&source, "\\documentclass{article}").unwrap();

            let options = ExecOptions::for_source(
                fake,
                vec!["-interaction=nonstopmode".to_string()],
                &source,
            );
            let result = exec_compiler(&options).unwrap();

            assert!(result.success());
            assert!(result.stdout_lossy().contains("Output written"));
            assert!(temp.path().join("resume.pdf").exists());
        }

        #[test]
        fn test_failure_captures_both_streams() {
            let temp = temp_dir_in_workspace();
            let fake = write_fake_compiler(temp.path(), &FakeCompiler::failing());
            let source = temp.path().join("resume.tex");

            let result =
                exec_compiler(&ExecOptions::for_source(fake, vec![], &source)).unwrap();

            assert!(!result.success());
            assert_eq!(result.exit_code, 1);
            assert!(result.stdout_lossy().contains("Undefined control sequence"));
            assert!(result.stderr_lossy().contains("fatal error"));
            assert!(!temp.path().join("resume.pdf").exists());
        }

        #[test]
        fn test_non_utf8_output_kept_verbatim() {
            let temp = temp_dir_in_workspace();
            let fake = write_fake_compiler(
                temp.path(),
                &FakeCompiler {
                    stdout: b"caf\xe9 error".to_vec(),
                    ..FakeCompiler::failing()
                },
            );
            let source = temp.path().join("resume.tex");

            let result =
                exec_compiler(&ExecOptions::for_source(fake, vec![], &source)).unwrap();

            assert_eq!(result.stdout, b"caf\xe9 error");
            assert_eq!(result.stdout_lossy(), "caf\u{fffd} error");
        }
    }
}
