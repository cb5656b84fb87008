//! Output rendering for the analyze and validate commands.
//!
//! Supports `human` (default) and `json` outputs. JSON composition is
//! split into pure functions so shapes can be tested directly.

use crate::models::{Severity, Summary, ValidateResult};
use crate::report::{render_analysis, DocumentAnalysis};
use owo_colors::OwoColorize;
use serde_json::{json, Value as JsonVal};

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print analyzer reports in the requested format.
pub fn print_analyze(results: &[DocumentAnalysis], output: &str, read_errors: &[String]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_analyze_json(results, read_errors)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for doc in results {
                print!("{}", render_analysis(doc, color));
                println!();
            }
            for err in read_errors {
                if color {
                    eprintln!("{} {}", "✖".red(), err);
                } else {
                    eprintln!("✖ {}", err);
                }
            }
        }
    }
}

/// Print validator results grouped by severity.
pub fn print_validate(results: &[ValidateResult], output: &str, read_errors: &[String]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_validate_json(results, read_errors)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for res in results {
                for sev in [Severity::Error, Severity::Warning, Severity::Info] {
                    for is in res.issues.iter().filter(|i| i.severity == sev) {
                        let tag = format!("⟦{}⟧", sev.tag());
                        let tag = if color {
                            match sev {
                                Severity::Error => tag.red().bold().to_string(),
                                Severity::Warning => tag.yellow().bold().to_string(),
                                Severity::Info => tag.blue().bold().to_string(),
                            }
                        } else {
                            tag
                        };
                        let icon = match sev {
                            Severity::Error => {
                                if color {
                                    "✖".red().to_string()
                                } else {
                                    "✖".to_string()
                                }
                            }
                            Severity::Warning => {
                                if color {
                                    "▲".yellow().to_string()
                                } else {
                                    "▲".to_string()
                                }
                            }
                            Severity::Info => {
                                if color {
                                    "◆".blue().to_string()
                                } else {
                                    "◆".to_string()
                                }
                            }
                        };
                        let file = if color {
                            res.file.clone().bold().to_string()
                        } else {
                            res.file.clone()
                        };
                        let line = is
                            .line
                            .map(|l| format!(":{}", l))
                            .unwrap_or_default();
                        println!("{} {} {}{} ❲{}❳ — {}", icon, tag, file, line, is.rule, is.message);
                    }
                }
            }
            let total = aggregate(results);
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} files={}",
                total.errors,
                total.warnings,
                total.infos,
                results.len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
            for err in read_errors {
                if color {
                    eprintln!("{} {}", "✖".red(), err);
                } else {
                    eprintln!("✖ {}", err);
                }
            }
        }
    }
}

fn aggregate(results: &[ValidateResult]) -> Summary {
    let mut total = Summary::default();
    for r in results {
        total.errors += r.summary.errors;
        total.warnings += r.summary.warnings;
        total.infos += r.summary.infos;
    }
    total
}

/// Compose analyzer JSON (pure, for testing/snapshot purposes).
pub fn compose_analyze_json(results: &[DocumentAnalysis], read_errors: &[String]) -> JsonVal {
    let items: Vec<JsonVal> = results
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();
    json!({
        "results": items,
        "summary": {
            "documents": results.len(),
            "read_errors": read_errors,
        }
    })
}

/// Compose validator JSON (pure, for testing/snapshot purposes).
///
/// A single document yields the bare `{file, issues, summary}` record;
/// multiple documents are wrapped with an aggregate summary.
pub fn compose_validate_json(results: &[ValidateResult], read_errors: &[String]) -> JsonVal {
    if results.len() == 1 && read_errors.is_empty() {
        return serde_json::to_value(&results[0]).unwrap();
    }
    let items: Vec<JsonVal> = results
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();
    let total = aggregate(results);
    json!({
        "results": items,
        "summary": {
            "errors": total.errors,
            "warnings": total.warnings,
            "infos": total.infos,
            "files": results.len(),
            "read_errors": read_errors,
        }
    })
}
