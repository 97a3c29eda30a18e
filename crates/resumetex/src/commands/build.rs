//! Build command - render the resume and compile it to PDF

use crate::cli::BuildArgs;
use crate::context::Context;
use crate::prompt::Prompter;
use anyhow::{Context as _, Result};
use colored::Colorize;
use resumetex_core::{Resume, escape_record, render_resume};
use resumetex_latex::{
    ExecOptions, ResolveOptions, ResolveResult, exec_compiler, format_failure_log, log_tail,
    resolve_compiler, write_failure_log,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a build ended
///
/// Only the source file is guaranteed. A missing compiler or a failed
/// compilation is reported to the user, not returned as an error.
#[derive(Debug)]
pub enum BuildOutcome {
    /// `--no-compile` was given
    SourceOnly,
    Compiled { pdf: PathBuf, duration_ms: u64 },
    CompilerMissing { program: String },
    CompileFailed { exit_code: i32, log: PathBuf, tail: Vec<String> },
}

/// Build the resume
///
/// # Arguments
///
/// * `args` - Build options from the command line
/// * `config_path` - Explicit config file, if any
/// * `verbose` - Enable verbose output if true
pub fn run(args: BuildArgs, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let mut ctx = Context::new(config_path.as_deref(), verbose)?;
    if let Some(program) = &args.compiler {
        ctx.config.compiler.program = program.clone();
    }

    // Step 1: Collect resume data
    let resume = match &args.data {
        Some(path) => {
            if verbose {
                println!("{} Reading resume data from {}", "→".cyan(), path.display());
            }
            Resume::from_file(path)?
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let resume = Prompter::new(stdin.lock(), stdout.lock()).collect_resume()?;
            println!();
            resume
        }
    };

    let outcome = build(&ctx, resume, args.no_compile)?;
    report(&ctx, &outcome);
    Ok(())
}

/// Render, write and compile a resume
pub fn build(ctx: &Context, resume: Resume, no_compile: bool) -> Result<BuildOutcome> {
    let verbose = ctx.verbose;
    let output = &ctx.config.output;

    // Step 2: Escape and render
    if verbose {
        println!("{} Rendering LaTeX source", "→".cyan());
    }
    let escaped = escape_record(resume.into_record());
    let latex = render_resume(&escaped)?;

    // Step 3: Write the source before compiling
    let source = ctx.cwd.join(&output.source);
    write_source(&source, &latex)?;
    println!("{} Wrote {}", "✓".green().bold(), output.source.display());

    if no_compile {
        return Ok(BuildOutcome::SourceOnly);
    }

    // Step 4: Resolve the compiler
    let program = ctx.config.compiler.program.clone();
    if verbose {
        println!("{} Resolving compiler '{}'", "→".cyan(), program);
    }
    let info = match resolve_compiler(&ResolveOptions::new(program.as_str())) {
        ResolveResult::Found(info) => info,
        ResolveResult::NotFound {
            program,
            searched_locations,
        } => {
            debug!(%program, ?searched_locations, "compiler not found");
            return Ok(BuildOutcome::CompilerMissing { program });
        }
    };

    // Step 5: Compile
    println!("{} Compiling LaTeX to PDF", "→".cyan());
    if verbose {
        println!(
            "  Command: {} {} {}",
            info.path.display(),
            ctx.config.compiler.args.join(" "),
            output.source.display()
        );
    }

    let options = ExecOptions::for_source(info.path, ctx.config.compiler.args.clone(), &source);
    let result = exec_compiler(&options)?;

    if result.success() {
        return Ok(BuildOutcome::Compiled {
            pdf: output.pdf(),
            duration_ms: result.duration_ms,
        });
    }

    // Step 6: Record the failure
    debug!(exit_code = result.exit_code, "compilation failed");
    let log = ctx.cwd.join(&output.log);
    write_failure_log(&log, &result)?;

    let text = String::from_utf8_lossy(&format_failure_log(&result)).into_owned();
    let tail = log_tail(&text, output.log_tail_lines)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(BuildOutcome::CompileFailed {
        exit_code: result.exit_code,
        log: output.log.clone(),
        tail,
    })
}

fn write_source(path: &Path, latex: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(path, latex).with_context(|| format!("Failed to write '{}'", path.display()))
}

fn report(ctx: &Context, outcome: &BuildOutcome) {
    match outcome {
        BuildOutcome::SourceOnly => {
            if ctx.verbose {
                println!("{} Skipping compilation", "→".cyan());
            }
        }
        BuildOutcome::Compiled { pdf, duration_ms } => {
            println!(
                "{} Resume generated: {} ({}ms)",
                "✓".green().bold(),
                pdf.display(),
                duration_ms
            );
        }
        BuildOutcome::CompilerMissing { program } => {
            eprintln!(
                "{} '{}' not found. Install MiKTeX or TeX Live and add to PATH.",
                "!".yellow().bold(),
                program
            );
        }
        BuildOutcome::CompileFailed {
            exit_code,
            log,
            tail,
        } => {
            eprintln!(
                "{} LaTeX compilation failed (exit code {})",
                "✗".red().bold(),
                exit_code
            );
            for line in tail {
                eprintln!("  {}", line);
            }
            eprintln!("LaTeX error log saved to {}", log.display());
        }
    }
}
