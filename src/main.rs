//! uifit CLI binary entry point.
//! Delegates to the library for analysis and printing.

use clap::Parser;
use std::process;
use uifit::cli::{Cli, Commands};
use uifit::{analyze, config, output, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Analyze {
            patterns,
            repo_root,
            output: out_mode,
            min_score,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &patterns,
                out_mode.as_deref(),
                min_score,
            );
            require_patterns(&eff);
            note_missing_config(&eff);
            note_config_patterns(&eff, patterns.is_empty());
            let root = eff.repo_root.to_string_lossy().to_string();
            let (mut results, errors) = analyze::run_analyze(&root, &eff.patterns, &eff.ignore);
            if eff.clamp_score {
                for r in &mut results {
                    if r.score < 0 {
                        r.score = 0;
                    }
                }
            }
            output::print_analyze(&results, &eff.output, &errors);
            if results.is_empty() && !errors.is_empty() {
                process::exit(2);
            }
            if let Some(min) = eff.min_score {
                if results.iter().any(|r| r.score < min) {
                    process::exit(1);
                }
            }
        }
        Commands::Validate {
            patterns,
            repo_root,
            output: out_mode,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &patterns,
                out_mode.as_deref(),
                None,
            );
            require_patterns(&eff);
            note_missing_config(&eff);
            note_config_patterns(&eff, patterns.is_empty());
            let root = eff.repo_root.to_string_lossy().to_string();
            let (results, errors) = analyze::run_validate(&root, &eff.patterns, &eff.ignore);
            output::print_validate(&results, &eff.output, &errors);
            if results.is_empty() && !errors.is_empty() {
                process::exit(2);
            }
            // any error-severity issue maps to a failing exit
            if results.iter().any(|r| r.summary.errors > 0) {
                process::exit(1);
            }
        }
    }
}

fn require_patterns(eff: &config::Effective) {
    if !eff.patterns_configured {
        eprintln!(
            "{} {}",
            utils::error_prefix(),
            "No documents given. Pass paths/globs or set patterns in uifit.toml."
        );
        process::exit(2);
    }
}

fn note_config_patterns(eff: &config::Effective, cli_patterns_empty: bool) {
    if cli_patterns_empty && eff.patterns_configured && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::info_prefix(),
            format!("Using patterns from config: [{}]", eff.patterns.join(", "))
        );
    }
}

fn note_missing_config(eff: &config::Effective) {
    if eff.output != "json" && config::load_config(&eff.repo_root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No uifit.toml found; using defaults."
        );
    }
}
