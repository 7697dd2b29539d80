//! CLI parsing for DetectAI

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "detectai")]
#[command(about = "Bug analysis, explanation, optimization and security scanning for source code", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base url of the analysis backend, overriding the config file
    #[arg(long, env = "DETECTAI_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find bugs and get suggested fixes
    Analyze(commands::tool::Args),

    /// Explain what a piece of code does
    #[command(alias = "explain")]
    Summarize(commands::tool::Args),

    /// Get an optimized version of the code with a complexity comparison
    Optimize(commands::tool::Args),

    /// Scan the code for security vulnerabilities
    #[command(alias = "security-scan")]
    Scan(commands::tool::Args),

    /// Navigate between the tools interactively
    Shell(commands::shell::Args),

    /// Inspect and change the global configuration
    Config(commands::config::Args),
}
