//! Report assembler: fitness score and the human-readable analyzer
//! report with its banner-delimited sections.

use crate::models::scan::{ScanOutcome, TokenMap};
use crate::models::Issue;
use crate::patterns::Motif;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize, Debug)]
/// Full analyzer bundle for one document.
pub struct DocumentAnalysis {
    pub file: String,
    pub scan: ScanOutcome,
    pub motifs: Vec<Motif>,
    pub tokens: Option<TokenMap>,
    pub issues: Vec<Issue>,
    pub score: i64,
}

/// Compute the fitness score.
///
/// The score is deliberately not floored at 0: deeply unfit documents
/// keep losing points, which stays meaningful as a relative signal.
/// Callers may clamp via config. The component-marker penalty is flat:
/// a document using no data-component markers loses 15 points whether
/// or not repeated motifs were detected.
pub fn compute_score(scan: &ScanOutcome, has_token_block: bool) -> i64 {
    let mut score = 100i64;
    let kinds = scan.duplicate_kinds() as i64;
    if kinds > 0 {
        score -= (5 * kinds).min(20);
    }
    let abs = scan.style.absolute as i64;
    if abs > 5 {
        score -= abs.min(15);
    }
    if scan.markers.is_empty() {
        score -= 15;
    }
    if !has_token_block {
        score -= 10;
    }
    score
}

const BANNER: &str =
    "────────────────────────────────────────────────────────────";

/// Render the multi-section human report for one document.
pub fn render_analysis(doc: &DocumentAnalysis, color: bool) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Analysis: {}", doc.file), color);

    section(&mut out, "Duplicate vector graphics", color);
    let mut any_dup = false;
    for rec in doc.scan.duplicates() {
        any_dup = true;
        out.push_str(&format!(
            "  {}x  {}  (lines {})\n",
            rec.count,
            snippet(&rec.fingerprint, 56),
            rec.lines
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !any_dup {
        out.push_str("  none\n");
    }

    section(&mut out, "Repeated patterns", color);
    if doc.motifs.is_empty() {
        out.push_str("  none above threshold\n");
    }
    for m in &doc.motifs {
        out.push_str(&format!("  {}: {} occurrences\n", m.name, m.count));
    }

    section(&mut out, "Component markers", color);
    if doc.scan.markers.is_empty() {
        out.push_str("  no data-component markers used\n");
    }
    for (name, count) in doc.scan.markers.iter() {
        out.push_str(&format!("  {}: {}\n", name, count));
    }

    section(&mut out, "Layout methods", color);
    out.push_str(&format!(
        "  absolute: {}  flex: {}  grid: {}\n",
        doc.scan.style.absolute, doc.scan.style.flex, doc.scan.style.grid
    ));

    section(&mut out, "Design tokens", color);
    match &doc.tokens {
        None => out.push_str("  no :root token block\n"),
        Some(t) => {
            out.push_str(&format!("  {} token(s) declared\n", t.len()));
            for (name, value) in t.iter().take(8) {
                out.push_str(&format!("  --{}: {}\n", name, value));
            }
            if t.len() > 8 {
                out.push_str(&format!("  ... and {} more\n", t.len() - 8));
            }
        }
    }

    section(&mut out, "Fitness score", color);
    let score_line = format!("  {} / 100\n", doc.score);
    if color {
        if doc.score >= 80 {
            out.push_str(&score_line.green().to_string());
        } else if doc.score >= 50 {
            out.push_str(&score_line.yellow().to_string());
        } else {
            out.push_str(&score_line.red().to_string());
        }
    } else {
        out.push_str(&score_line);
    }

    section(&mut out, "Recommendations", color);
    let mut any_rec = false;
    for issue in &doc.issues {
        if let Some(s) = &issue.suggestion {
            any_rec = true;
            out.push_str(&format!("  [{}] {}\n", issue.rule, s));
        }
    }
    if !any_rec {
        out.push_str("  none\n");
    }

    out
}

fn heading(out: &mut String, title: &str, color: bool) {
    if color {
        out.push_str(&title.bold().to_string());
    } else {
        out.push_str(title);
    }
    out.push('\n');
}

fn section(out: &mut String, title: &str, color: bool) {
    out.push_str(BANNER);
    out.push('\n');
    heading(out, title, color);
}

fn snippet(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use crate::rules;
    use crate::scanner;

    fn analyze(doc: &str) -> DocumentAnalysis {
        let scan = scanner::scan(doc);
        let motifs = patterns::detect_motifs(doc);
        let tokens = patterns::extract_tokens(doc);
        let issues = rules::evaluate(&scan, &motifs, tokens.as_ref(), doc);
        let score = compute_score(&scan, tokens.is_some());
        DocumentAnalysis {
            file: "test.html".into(),
            scan,
            motifs,
            tokens,
            issues,
            score,
        }
    }

    #[test]
    fn test_empty_document_scores_seventy_five() {
        // no markers and no token block cost points even when the
        // document is empty
        let doc = analyze("");
        assert_eq!(doc.score, 75);
    }

    #[test]
    fn test_absolute_penalty_capped_at_fifteen() {
        let mut body = String::from(
            "<style>:root { --a:1; }</style><div data-component=\"Box\"></div>",
        );
        for _ in 0..30 {
            body.push_str("<div style=\"position:absolute\"></div>");
        }
        let doc = analyze(&body);
        assert_eq!(doc.score, 100 - 15);
    }

    #[test]
    fn test_twelve_absolutes_subtract_their_count() {
        let mut body = String::from(
            "<style>:root { --a:1; }</style><div data-component=\"Box\"></div>",
        );
        for _ in 0..12 {
            body.push_str("<div style=\"position:absolute\"></div>");
        }
        let doc = analyze(&body);
        assert_eq!(doc.score, 100 - 12);
    }

    #[test]
    fn test_duplicate_penalty_caps_at_twenty() {
        // five distinct duplicated graphics would cost 25 uncapped
        let mut body = String::from(
            "<style>:root { --a:1; }</style><div data-component=\"Box\"></div>",
        );
        for n in 0..5 {
            let svg = format!("<svg><rect width=\"{}\"/></svg>", n);
            body.push_str(&svg);
            body.push_str(&svg);
        }
        let doc = analyze(&body);
        assert_eq!(doc.scan.duplicate_kinds(), 5);
        assert_eq!(doc.score, 100 - 20);
    }

    #[test]
    fn test_marker_penalty_is_flat() {
        // two cards stay below the motif threshold; the penalty for
        // missing markers applies regardless
        let cards = r#"
            <style>:root { --a:1; --b:2; --c:3; --d:4; --e:5; }</style>
            <div class="card"></div><div class="card"></div>
        "#;
        let doc = analyze(cards);
        assert!(doc.motifs.is_empty());
        assert_eq!(doc.score, 100 - 15);

        let marked = r#"
            <style>:root { --a:1; --b:2; --c:3; --d:4; --e:5; }</style>
            <div data-component="Card" class="card"></div>
        "#;
        assert_eq!(analyze(marked).score, 100);
    }

    #[test]
    fn test_all_penalties_stack() {
        let mut body = String::new();
        for n in 0..4 {
            let svg = format!("<svg><rect width=\"{}\"/></svg>", n);
            body.push_str(&svg);
            body.push_str(&svg);
        }
        for _ in 0..20 {
            body.push_str("<div style=\"position:absolute\"></div>");
        }
        for _ in 0..6 {
            body.push_str("<li class=\"item\">");
        }
        // -20 dup, -15 absolute, -15 markers, -10 tokens
        let doc = analyze(&body);
        assert_eq!(doc.score, 100 - 20 - 15 - 15 - 10);
    }

    #[test]
    fn test_render_is_idempotent_and_sectioned() {
        let doc = analyze("<svg><rect/></svg><svg><rect/></svg>");
        let a = render_analysis(&doc, false);
        let b = render_analysis(&doc, false);
        assert_eq!(a, b);
        assert!(a.contains("Duplicate vector graphics"));
        assert!(a.contains("Fitness score"));
        assert!(a.contains("Recommendations"));
        assert_eq!(a.matches(BANNER).count(), 7);
    }

    #[test]
    fn test_snippet_truncates_long_fingerprints() {
        let s = "x".repeat(100);
        let cut = snippet(&s, 56);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 59);
    }
}
