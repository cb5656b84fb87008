//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "uifit",
    version,
    about = "uifit — HTML/CSS design-tool conversion fitness linter",
    long_about = "uifit — analyze HTML/CSS documents for structures that degrade fidelity or efficiency when imported into a design tool's component model.\n\nConfiguration precedence: CLI > uifit.toml > defaults.",
    after_help = "Examples:\n  uifit analyze src/**/*.html\n  uifit analyze page.html --output json --min-score 80\n  uifit validate page.html --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for analyzing and validating documents.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current uifit version.")]
    Version,
    /// Full analyzer report with fitness score
    #[command(
        about = "Run the analyzer report",
        long_about = "Scan each document and print the sectioned report: duplicate graphics, repeated patterns, component markers, layout methods, design tokens, fitness score, recommendations.",
        after_help = "Examples:\n  uifit analyze src/**/*.html\n  uifit analyze page.html --output json"
    )]
    Analyze {
        #[arg(help = "Document paths or glob patterns (default: from uifit.toml)")]
        patterns: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Fail (exit 1) when any document scores below this")]
        min_score: Option<i64>,
    },
    /// Issue-centric validation; errors fail the run
    #[command(
        about = "Run validation checks",
        long_about = "Evaluate the structural rule battery and print issues grouped by severity. Any error-severity issue yields a non-zero exit.",
        after_help = "Examples:\n  uifit validate page.html\n  uifit validate src/**/*.html --output json"
    )]
    Validate {
        #[arg(help = "Document paths or glob patterns (default: from uifit.toml)")]
        patterns: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
