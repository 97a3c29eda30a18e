//! Fake compiler scripts
//!
//! Integration tests never run a real TeX installation. Instead they point the
//! compiler override at a small shell script that behaves like `pdflatex` as
//! far as resumetex can observe: it prints to both streams, may write the PDF
//! next to the source file, and exits with a chosen status.
//!
//! Stream contents are stored in files beside the script and copied with
//! `cat`, so arbitrary bytes (including non-UTF-8) reach the caller unchanged.

use std::path::{Path, PathBuf};

/// Behaviour of a fake compiler script
#[derive(Debug, Clone)]
pub struct FakeCompiler {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Create `<source stem>.pdf` next to the source file
    pub writes_pdf: bool,
}

impl FakeCompiler {
    /// A compiler run that succeeds and produces the PDF
    pub fn succeeding() -> Self {
        Self {
            exit_code: 0,
            stdout: b"Output written on resume.pdf (1 page).\n".to_vec(),
            stderr: Vec::new(),
            writes_pdf: true,
        }
    }

    /// A compiler run that fails with diagnostics on both streams
    pub fn failing() -> Self {
        Self {
            exit_code: 1,
            stdout: b"! Undefined control sequence.\nl.42 \\badmacro\n".to_vec(),
            stderr: b"pdflatex: fatal error\n".to_vec(),
            writes_pdf: false,
        }
    }
}

/// Quote text for a POSIX shell single-quoted string
#[cfg(unix)]
fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Write an executable fake compiler into `dir` and return its path
///
/// `--version` prints a pdfTeX-style banner and exits 0.
#[cfg(unix)]
pub fn write_fake_compiler(dir: &Path, fake: &FakeCompiler) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pdflatex");
    let stdout_path = dir.join("fake-pdflatex.stdout");
    let stderr_path = dir.join("fake-pdflatex.stderr");
    std::fs::write(&stdout_path, &fake.stdout).expect("Failed to write fake stdout");
    std::fs::write(&stderr_path, &fake.stderr).expect("Failed to write fake stderr");

    let mut script = String::from("#!/bin/sh\n");
    script.push_str(
        "if [ \"$1\" = \"--version\" ]; then echo 'pdfTeX 3.141592653-2.6-1.40.25 (fake)'; exit 0; fi\n",
    );
    script.push_str(&format!(
        "cat {}\n",
        shell_quote(&stdout_path.to_string_lossy())
    ));
    script.push_str(&format!(
        "cat {} >&2\n",
        shell_quote(&stderr_path.to_string_lossy())
    ));
    if fake.writes_pdf {
        script.push_str("for last; do :; done\n");
        script.push_str(": > \"${last%.tex}.pdf\"\n");
    }
    script.push_str(&format!("exit {}\n", fake.exit_code));

    std::fs::write(&path, script).expect("Failed to write fake compiler");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake compiler")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to make fake compiler executable");
    path
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::temp_dir_in_workspace;
    use std::process::Command;

    #[test]
    fn test_fake_compiler_failing() {
        let temp = temp_dir_in_workspace();
        let path = write_fake_compiler(temp.path(), &FakeCompiler::failing());

        let output = Command::new(&path).arg("resume.tex").output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stdout).contains("Undefined control sequence"));
        assert!(String::from_utf8_lossy(&output.stderr).contains("fatal error"));
    }

    #[test]
    fn test_fake_compiler_writes_pdf() {
        let temp = temp_dir_in_workspace();
        let path = write_fake_compiler(temp.path(), &FakeCompiler::succeeding());

        let status = Command::new(&path)
            .current_dir(temp.path())
            .args(["-interaction=nonstopmode", "resume.tex"])
            .status()
            .unwrap();
        assert!(status.success());
        assert!(temp.path().join("resume.pdf").exists());
    }

    #[test]
    fn test_fake_compiler_version() {
        let temp = temp_dir_in_workspace();
        let path = write_fake_compiler(temp.path(), &FakeCompiler::failing());

        let output = Command::new(&path).arg("--version").output().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).starts_with("pdfTeX"));
    }

    #[test]
    fn test_fake_compiler_raw_bytes() {
        let temp = temp_dir_in_workspace();
        let fake = FakeCompiler {
            stdout: b"caf\xe9".to_vec(),
            ..FakeCompiler::failing()
        };
        let path = write_fake_compiler(temp.path(), &fake);

        let output = Command::new(&path).arg("resume.tex").output().unwrap();
        assert_eq!(output.stdout, b"caf\xe9");
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
