//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use resumetex_core::config::consts::CONFIG_ENV_VAR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resumetex")]
#[command(version, about = "Generate a LaTeX resume and compile it to PDF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./resumetex.toml when present)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect resume data, render the LaTeX source and compile it
    Build(BuildArgs),

    /// Print the built-in resume layout
    Template,

    /// Check environment health
    Doctor {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Read resume data from a TOML or JSON file instead of prompting
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Stop after writing the LaTeX source
    #[arg(long)]
    pub no_compile: bool,

    /// Compiler program, overriding compiler.program from config
    #[arg(long, value_name = "PROGRAM")]
    pub compiler: Option<String>,
}
