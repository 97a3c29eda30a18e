//! Doctor command - environment health check

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use resumetex_core::config::Config;
use resumetex_latex::{ResolveOptions, ResolveResult, probe_version, resolve_compiler};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// Doctor command JSON output schema
#[derive(Debug, Serialize, Deserialize)]
struct DoctorOutput {
    schema_version: String,
    working_dir: String,
    timestamp: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Check {
    id: String,
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// Run environment health check
///
/// # Arguments
///
/// * `json` - Output in JSON format if true
/// * `config_path` - Explicit config file, if any
/// * `verbose` - Enable verbose output if true
///
/// # Returns
///
/// Always returns Ok(()) - doctor command always exits 0
pub fn run(json: bool, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    // Try to load context, but continue even if it fails
    let ctx_result = Context::new(config_path.as_deref(), verbose);

    let mut checks = Vec::new();

    // Check 1: Config validity
    let config_check = match &ctx_result {
        Ok(_) => Check {
            id: "config_valid".to_string(),
            name: "Configuration".to_string(),
            status: CheckStatus::Ok,
            message: match &config_path {
                Some(path) => format!("{} is valid", path.display()),
                None => "Configuration is valid".to_string(),
            },
            details: None,
        },
        Err(e) => Check {
            id: "config_valid".to_string(),
            name: "Configuration".to_string(),
            status: CheckStatus::Error,
            message: format!("{:#}", e),
            details: None,
        },
    };
    checks.push(config_check);

    // Check 2: Compiler availability, with defaults when config failed
    let (working_dir, program) = match &ctx_result {
        Ok(ctx) => (
            ctx.cwd.display().to_string(),
            ctx.config.compiler.program.clone(),
        ),
        Err(_) => (
            env::current_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|_| ".".to_string()),
            Config::default().compiler.program,
        ),
    };
    checks.push(compiler_check(&program));

    let output = DoctorOutput {
        schema_version: "1.0".to_string(),
        working_dir,
        timestamp: Utc::now().to_rfc3339(),
        checks,
    };

    if json {
        print_json(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_human_readable(&output);
    }

    Ok(())
}

fn compiler_check(program: &str) -> Check {
    let mut details = BTreeMap::new();
    details.insert(
        "program".to_string(),
        serde_json::Value::String(program.to_string()),
    );

    match resolve_compiler(&ResolveOptions::new(program)) {
        ResolveResult::Found(info) => {
            let version = probe_version(&info.path);
            details.insert(
                "path".to_string(),
                serde_json::Value::String(info.path.display().to_string()),
            );
            details.insert(
                "source".to_string(),
                serde_json::Value::String(info.source.to_string()),
            );

            match version {
                Some(version) => {
                    details.insert("version".to_string(), serde_json::Value::String(version));
                    Check {
                        id: "compiler_available".to_string(),
                        name: "LaTeX compiler".to_string(),
                        status: CheckStatus::Ok,
                        message: format!("{} available", program),
                        details: Some(details),
                    }
                }
                None => Check {
                    id: "compiler_available".to_string(),
                    name: "LaTeX compiler".to_string(),
                    status: CheckStatus::Warning,
                    message: format!("{} found but '--version' failed", program),
                    details: Some(details),
                },
            }
        }
        ResolveResult::NotFound {
            program,
            searched_locations,
        } => {
            details.insert(
                "searched_locations".to_string(),
                serde_json::Value::Array(
                    searched_locations
                        .into_iter()
                        .map(serde_json::Value::String)
                        .collect(),
                ),
            );

            Check {
                id: "compiler_available".to_string(),
                name: "LaTeX compiler".to_string(),
                status: CheckStatus::Error,
                message: format!(
                    "{} not found. Install MiKTeX or TeX Live and add to PATH",
                    program
                ),
                details: Some(details),
            }
        }
    }
}

/// Print human-readable output
fn print_human_readable(output: &DoctorOutput) {
    println!("{}", "Environment Health Check".bold());
    println!();
    println!("Working directory: {}", output.working_dir);
    println!();

    println!("{}", "Checks:".bold());
    for check in &output.checks {
        let status_str = match check.status {
            CheckStatus::Ok => "✓".green(),
            CheckStatus::Warning => "!".yellow(),
            CheckStatus::Error => "✗".red(),
        };

        println!("  {} {}: {}", status_str, check.name.bold(), check.message);

        if let Some(details) = &check.details {
            for (key, value) in details {
                println!("      {}: {}", key, value);
            }
        }
    }

    println!();
    println!("Timestamp: {}", output.timestamp);
}
