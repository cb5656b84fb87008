//! Per-file drivers for the analyzer and validator paths.
//!
//! Each document is a fresh, independent run: scan once, detect
//! patterns once, evaluate rules once. Parallelism only crosses
//! document boundaries.

use crate::models::scan::TokenMap;
use crate::models::{Issue, Summary, ValidateResult};
use crate::patterns::{self, Motif};
use crate::report::{self, DocumentAnalysis};
use crate::rules;
use crate::scanner;
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Analyze one document's text. Pure: no I/O, no shared state.
pub fn analyze_text(file: String, text: &str, ignore: &[String]) -> DocumentAnalysis {
    let scan = scanner::scan(text);
    let motifs: Vec<Motif> = patterns::detect_motifs(text);
    let tokens: Option<TokenMap> = patterns::extract_tokens(text);
    let mut issues: Vec<Issue> = rules::evaluate(&scan, &motifs, tokens.as_ref(), text);
    if !ignore.is_empty() {
        issues.retain(|i| !ignore.iter().any(|r| r == &i.rule));
    }
    let score = report::compute_score(&scan, tokens.is_some());
    DocumentAnalysis {
        file,
        scan,
        motifs,
        tokens,
        issues,
        score,
    }
}

/// Run the analyzer over every document matched by the patterns.
///
/// Returns per-document analyses plus read-error messages for files
/// that could not be loaded (those produce no partial report).
pub fn run_analyze(
    repo_root: &str,
    patterns: &[String],
    ignore: &[String],
) -> (Vec<DocumentAnalysis>, Vec<String>) {
    let root = PathBuf::from(repo_root);
    let targets = collect_targets(&root, patterns);

    let outcomes: Vec<Result<DocumentAnalysis, String>> = targets
        .par_iter()
        .map(|path| {
            let display = display_path(&root, path);
            match fs::read_to_string(path) {
                Ok(text) => Ok(analyze_text(display, &text, ignore)),
                Err(e) => Err(format!("cannot read {}: {}", display, e)),
            }
        })
        .collect();

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for o in outcomes {
        match o {
            Ok(a) => results.push(a),
            Err(e) => errors.push(e),
        }
    }
    (results, errors)
}

/// Run the validator path: same analysis, issue-centric result.
pub fn run_validate(
    repo_root: &str,
    patterns: &[String],
    ignore: &[String],
) -> (Vec<ValidateResult>, Vec<String>) {
    let (analyses, errors) = run_analyze(repo_root, patterns, ignore);
    let results = analyses
        .into_iter()
        .map(|a| {
            let summary = Summary::of(&a.issues);
            ValidateResult {
                file: a.file,
                issues: a.issues,
                summary,
            }
        })
        .collect();
    (results, errors)
}

/// Expand glob patterns under the root into a sorted, deduplicated
/// target list so output order is stable.
fn collect_targets(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs = root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    if entry.is_file() {
                        targets.push(entry);
                    }
                }
            }
            Err(_) => {
                // a literal path still works even when it is not a
                // valid glob
                if abs.is_file() {
                    targets.push(abs);
                }
            }
        }
    }
    targets.sort();
    targets.dedup();
    targets
}

fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}
