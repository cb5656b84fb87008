//! Rule engine: a fixed, ordered battery of structural checks.
//!
//! Every rule reads the shared upstream data (scan outcome, motifs,
//! tokens, raw text) and appends zero or more issues. Rules never read
//! each other's output; the issue list keeps evaluation order.

use crate::models::scan::{ScanOutcome, TokenMap};
use crate::models::{Issue, Severity};
use crate::patterns::Motif;
use regex::Regex;

/// Token categories checked independently for coverage.
const TOKEN_CATEGORIES: &[&str] = &["color", "space", "font", "radius"];

/// Class tokens that commonly encode element state.
const STATE_CLASSES: &[&str] = &["active", "disabled", "hover", "focus", "selected"];

/// Run the full battery and return issues in evaluation order.
pub fn evaluate(
    scan: &ScanOutcome,
    motifs: &[Motif],
    tokens: Option<&TokenMap>,
    text: &str,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_duplicate_vectors(scan, text, &mut issues);
    check_component_markers(scan, motifs, &mut issues);
    check_tokens(tokens, &mut issues);
    check_layout(scan, &mut issues);
    check_theme(text, &mut issues);
    check_state_classes(scan, text, &mut issues);
    check_dynamic_containers(text, &mut issues);
    check_class_naming(scan, &mut issues);
    issues
}

fn check_duplicate_vectors(scan: &ScanOutcome, text: &str, issues: &mut Vec<Issue>) {
    let kinds = scan.duplicate_kinds();
    if kinds == 0 {
        return;
    }
    let total: usize = scan.duplicates().map(|r| r.count).sum();
    let first_line = scan.duplicates().find_map(|r| r.lines.first().copied());
    // tag-boundary match so custom elements like <user-card> do not
    // count as reuse
    let symbol_reuse = Regex::new(r"(?i)<(?:symbol|use)[\s>/]").expect("symbol-reuse regex");
    let has_symbol_reuse = symbol_reuse.is_match(text);
    let mut issue = if has_symbol_reuse {
        Issue::new(
            Severity::Warning,
            "duplicate-svg-partial",
            format!(
                "{} duplicated vector graphic(s) ({} occurrences) despite symbol reuse being in place",
                kinds, total
            ),
        )
        .with_suggestion("move the remaining duplicates into <symbol> definitions")
    } else {
        Issue::new(
            Severity::Error,
            "duplicate-svg",
            format!(
                "{} vector graphic(s) repeated verbatim ({} total occurrences)",
                kinds, total
            ),
        )
        .with_suggestion("define each graphic once in a <symbol> and reference it with <use>")
    };
    if let Some(line) = first_line {
        issue = issue.with_line(line);
    }
    issues.push(issue);
}

fn check_component_markers(scan: &ScanOutcome, motifs: &[Motif], issues: &mut Vec<Issue>) {
    // every reported motif already exceeds count 3
    if !motifs.is_empty() && scan.markers.is_empty() {
        let names: Vec<&str> = motifs.iter().map(|m| m.name.as_str()).collect();
        issues.push(
            Issue::new(
                Severity::Warning,
                "missing-component-markers",
                format!(
                    "repeated {} structures found but no data-component markers are used",
                    names.join("/")
                ),
            )
            .with_suggestion("tag reusable units with data-component so tooling can map them"),
        );
    }
}

fn check_tokens(tokens: Option<&TokenMap>, issues: &mut Vec<Issue>) {
    let tokens = match tokens {
        Some(t) => t,
        None => {
            issues.push(
                Issue::new(
                    Severity::Error,
                    "missing-token-block",
                    "no :root design-token block found",
                )
                .with_suggestion("declare shared values as --name: value custom properties in :root"),
            );
            return;
        }
    };
    if tokens.len() < 5 {
        issues.push(Issue::new(
            Severity::Warning,
            "sparse-tokens",
            format!(
                "token block declares only {} entr{}; shared styling likely lives elsewhere",
                tokens.len(),
                if tokens.len() == 1 { "y" } else { "ies" }
            ),
        ));
    }
    for cat in TOKEN_CATEGORIES {
        if !tokens.has_prefix(cat) {
            issues.push(Issue::new(
                Severity::Info,
                "missing-token-category",
                format!("no --{}-* tokens declared", cat),
            ));
        }
    }
}

fn check_layout(scan: &ScanOutcome, issues: &mut Vec<Issue>) {
    let abs = scan.style.absolute;
    if abs > 10 {
        issues.push(
            Issue::new(
                Severity::Error,
                "absolute-overuse",
                format!("{} absolute-positioning declarations", abs),
            )
            .with_suggestion("prefer flex or grid layout; absolute positions pin every node"),
        );
    } else if abs > 5 {
        issues.push(Issue::new(
            Severity::Warning,
            "absolute-heavy",
            format!("{} absolute-positioning declarations", abs),
        ));
    }
    if scan.style.flex + scan.style.grid == 0 {
        issues.push(
            Issue::new(
                Severity::Warning,
                "no-flex-layout",
                "no flex or grid layout detected",
            )
            .with_suggestion("flex/grid maps to automatic layout in design tools"),
        );
    }
}

fn check_theme(text: &str, issues: &mut Vec<Issue>) {
    if !contains_ci(text, "data-theme=") {
        issues.push(Issue::new(
            Severity::Info,
            "missing-theme-attr",
            "no data-theme attribute found on any element",
        ));
    }
    if !contains_ci(text, "[data-theme=") {
        issues.push(Issue::new(
            Severity::Info,
            "missing-theme-selector",
            "no [data-theme=...] scoped style selector found",
        ));
    }
}

fn check_state_classes(scan: &ScanOutcome, text: &str, issues: &mut Vec<Issue>) {
    let used: Vec<&str> = scan
        .classes
        .keys()
        .filter(|c| STATE_CLASSES.iter().any(|s| c.eq_ignore_ascii_case(s)))
        .collect();
    if !used.is_empty() && !contains_ci(text, "data-state") {
        issues.push(
            Issue::new(
                Severity::Warning,
                "state-class",
                format!(
                    "state expressed via class ({}) instead of a data-state attribute",
                    used.join(", ")
                ),
            )
            .with_suggestion("use data-state so variants survive the component mapping"),
        );
    }
}

fn check_dynamic_containers(text: &str, issues: &mut Vec<Issue>) {
    // no backreferences in the regex crate, so each container tag gets
    // its own open/close alternative to keep the pair matched
    let per_tag: Vec<String> = ["ul", "ol", "tbody", "div"]
        .iter()
        .map(|t| format!(r#"<{t}\b[^>]*\bid\s*=\s*"[^"]*"[^>]*>\s*</{t}>"#))
        .collect();
    let empty_container = Regex::new(&format!("(?i)(?:{})", per_tag.join("|")))
        .expect("container regex");
    if empty_container.is_match(text) && !contains_ci(text, "<template") {
        issues.push(
            Issue::new(
                Severity::Info,
                "container-no-template",
                "empty identified container without a <template> for its rows",
            )
            .with_suggestion("ship a <template> child so the repeated item structure is explicit"),
        );
    }
}

fn check_class_naming(scan: &ScanOutcome, issues: &mut Vec<Issue>) {
    // block__element--modifier, case-insensitive; js- prefixed hooks are
    // scripting-only and exempt
    let bem = Regex::new(
        r"(?i)^[a-z][a-z0-9]*(?:-[a-z0-9]+)*(?:__[a-z0-9]+(?:-[a-z0-9]+)*)?(?:--[a-z0-9]+(?:-[a-z0-9]+)*)?$",
    )
    .expect("bem regex");
    let considered: Vec<&str> = scan
        .classes
        .keys()
        .filter(|c| !c.to_ascii_lowercase().starts_with("js-"))
        .collect();
    if considered.is_empty() {
        return;
    }
    let failing = considered.iter().filter(|c| !bem.is_match(c)).count();
    if failing * 2 > considered.len() {
        issues.push(Issue::new(
            Severity::Info,
            "non-bem-classes",
            format!(
                "{} of {} distinct class names do not follow block__element--modifier naming",
                failing,
                considered.len()
            ),
        ));
    }
}

fn contains_ci(text: &str, needle: &str) -> bool {
    let needle = needle.to_ascii_lowercase();
    text.to_ascii_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use crate::scanner;

    fn run(doc: &str) -> Vec<Issue> {
        let scan = scanner::scan(doc);
        let motifs = patterns::detect_motifs(doc);
        let tokens = patterns::extract_tokens(doc);
        evaluate(&scan, &motifs, tokens.as_ref(), doc)
    }

    fn rule_ids(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.rule.as_str()).collect()
    }

    #[test]
    fn test_duplicate_svg_without_symbol_is_error() {
        // two structurally identical blocks, different internal whitespace
        let doc = concat!(
            "<svg viewBox=\"0 0 10 10\"><circle cx=\"5\" cy=\"5\" r=\"4\"/></svg>",
            "<svg viewBox=\"0 0 10 10\">\n  <circle cx=\"5\"  cy=\"5\" r=\"4\"/>\n</svg>",
            "<style>:root { --a:1; }</style>"
        );
        let scan = scanner::scan(doc);
        assert_eq!(scan.subtrees.len(), 1);
        assert_eq!(scan.subtrees[0].count, 2);
        let issues = run(doc);
        let dup: Vec<_> = issues.iter().filter(|i| i.rule.starts_with("duplicate-svg")).collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].rule, "duplicate-svg");
        assert_eq!(dup[0].severity, Severity::Error);
    }

    #[test]
    fn test_duplicate_svg_with_symbol_downgrades_to_warning() {
        let doc = concat!(
            "<svg><rect width=\"3\"/></svg><svg><rect width=\"3\"/></svg>",
            "<svg><symbol id=\"ic\"></symbol></svg>"
        );
        let issues = run(doc);
        assert!(rule_ids(&issues).contains(&"duplicate-svg-partial"));
        assert!(!rule_ids(&issues).contains(&"duplicate-svg"));
    }

    #[test]
    fn test_custom_element_is_not_symbol_reuse() {
        // <user-card> must not pass for a <use> reference
        let doc = concat!(
            "<user-card name=\"a\"></user-card>",
            "<svg><rect width=\"3\"/></svg><svg><rect width=\"3\"/></svg>"
        );
        let issues = run(doc);
        assert!(rule_ids(&issues).contains(&"duplicate-svg"));
        assert!(!rule_ids(&issues).contains(&"duplicate-svg-partial"));
    }

    #[test]
    fn test_missing_markers_requires_repeated_motif() {
        let plain = "<div class=\"box\"></div>";
        assert!(!rule_ids(&run(plain)).contains(&"missing-component-markers"));

        let cards = r#"
            <div class="card"></div><div class="card"></div>
            <div class="card"></div><div class="card"></div>
        "#;
        assert!(rule_ids(&run(cards)).contains(&"missing-component-markers"));

        let marked = r#"
            <div class="card" data-component="Card"></div><div class="card"></div>
            <div class="card"></div><div class="card"></div>
        "#;
        assert!(!rule_ids(&run(marked)).contains(&"missing-component-markers"));
    }

    #[test]
    fn test_token_categories_fire_independently() {
        // 6 entries cover color/space but not font/radius: sparse-tokens
        // stays quiet, two category infos fire
        let doc = "<style>:root { --color-a: #111; --color-b: #222; --space-sm: 4px; --space-md: 8px; --space-lg: 16px; --color-c: #333; }</style>";
        let issues = run(doc);
        let ids = rule_ids(&issues);
        assert!(!ids.contains(&"sparse-tokens"));
        let cats: Vec<_> = issues
            .iter()
            .filter(|i| i.rule == "missing-token-category")
            .collect();
        assert_eq!(cats.len(), 2);
        assert!(cats[0].message.contains("--font-"));
        assert!(cats[1].message.contains("--radius-"));
    }

    #[test]
    fn test_missing_block_skips_category_checks() {
        let issues = run("<div></div>");
        let ids = rule_ids(&issues);
        assert!(ids.contains(&"missing-token-block"));
        assert!(!ids.contains(&"missing-token-category"));
        assert!(!ids.contains(&"sparse-tokens"));
    }

    #[test]
    fn test_absolute_thresholds() {
        let mut doc = String::new();
        for _ in 0..12 {
            doc.push_str("<div style=\"position: absolute\"></div>");
        }
        let issues = run(&doc);
        let ids = rule_ids(&issues);
        assert!(ids.contains(&"absolute-overuse"));
        assert!(!ids.contains(&"absolute-heavy"));
        assert!(ids.contains(&"no-flex-layout"));

        let mut doc = String::new();
        for _ in 0..7 {
            doc.push_str("<div style=\"position:absolute\"></div>");
        }
        let ids_mid = run(&doc);
        let ids_mid = rule_ids(&ids_mid);
        assert!(ids_mid.contains(&"absolute-heavy"));
        assert!(!ids_mid.contains(&"absolute-overuse"));
    }

    #[test]
    fn test_state_class_needs_missing_attribute() {
        let doc = "<button class=\"btn active\"></button>";
        assert!(rule_ids(&run(doc)).contains(&"state-class"));

        let doc = "<button class=\"btn active\" data-state=\"on\"></button>";
        assert!(!rule_ids(&run(doc)).contains(&"state-class"));
    }

    #[test]
    fn test_dynamic_container_without_template() {
        let doc = "<ul id=\"results\"></ul>";
        assert!(rule_ids(&run(doc)).contains(&"container-no-template"));

        let doc = "<ul id=\"results\"></ul><template><li></li></template>";
        assert!(!rule_ids(&run(doc)).contains(&"container-no-template"));
    }

    #[test]
    fn test_dynamic_container_close_tag_must_match() {
        let doc = "<div id=\"results\"></ul>";
        assert!(!rule_ids(&run(doc)).contains(&"container-no-template"));

        let doc = "<tbody id=\"rows\"></tbody>";
        assert!(rule_ids(&run(doc)).contains(&"container-no-template"));
    }

    #[test]
    fn test_non_bem_classes_majority_rule() {
        // 3 of 4 distinct tokens break the pattern, js- hook exempt
        let doc = "<div class=\"Header_Main nav_item main_content card js-Toggle\"></div>";
        let issues = run(doc);
        assert!(rule_ids(&issues).contains(&"non-bem-classes"));

        let doc = "<div class=\"card card--flat card__title js-Toggle\"></div>";
        assert!(!rule_ids(&run(doc)).contains(&"non-bem-classes"));
    }

    #[test]
    fn test_empty_document_rule_defaults() {
        let issues = run("");
        let ids = rule_ids(&issues);
        assert!(ids.contains(&"missing-token-block"));
        assert!(ids.contains(&"no-flex-layout"));
        assert!(ids.contains(&"missing-theme-attr"));
        assert!(ids.contains(&"missing-theme-selector"));
        assert!(!ids.contains(&"duplicate-svg"));
        assert!(!ids.contains(&"missing-component-markers"));
    }
}
