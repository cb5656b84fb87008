//! Pattern detector: repeated structural motifs and the design-token
//! block, found with plain regex scans over the raw document text.

use crate::models::scan::TokenMap;
use regex::Regex;
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
/// A repeated structural motif whose count exceeded its threshold.
pub struct Motif {
    pub name: String,
    pub count: usize,
}

/// Scan for repeated-row/list/card motifs. Only motifs above their
/// fixed thresholds are returned (rows > 5, list items > 5, cards > 3).
pub fn detect_motifs(text: &str) -> Vec<Motif> {
    let row_tag = Regex::new(r"(?i)<tr[\s>/]").expect("motif regex");
    // word boundary keeps "arrow"/"browse" out of the row count
    let row_class = Regex::new(r#"(?i)class="[^"]*\brow"#).expect("motif regex");
    let list_item = Regex::new(r"(?i)<li[\s>/]").expect("motif regex");
    let card_class = Regex::new(r#"(?i)class="[^"]*card"#).expect("motif regex");

    let mut motifs = Vec::new();
    let rows = row_tag.find_iter(text).count() + row_class.find_iter(text).count();
    if rows > 5 {
        motifs.push(Motif {
            name: "row".into(),
            count: rows,
        });
    }
    let items = list_item.find_iter(text).count();
    if items > 5 {
        motifs.push(Motif {
            name: "list-item".into(),
            count: items,
        });
    }
    let cards = card_class.find_iter(text).count();
    if cards > 3 {
        motifs.push(Motif {
            name: "card".into(),
            count: cards,
        });
    }
    motifs
}

/// Extract design tokens from the first `:root { ... }` block.
///
/// Returns `None` when no block exists (a detectable "no design tokens"
/// condition, not an error). Duplicate declarations overwrite: the block
/// is a flat key/value list, so last write wins.
pub fn extract_tokens(text: &str) -> Option<TokenMap> {
    let root_at = text.find(":root")?;
    let after = &text[root_at..];
    let open = after.find('{')?;
    // token blocks are flat declaration lists; scanning to the next
    // closing brace is sufficient
    let close = after[open..].find('}')? + open;
    let body = &after[open + 1..close];

    let decl = Regex::new(r"--([A-Za-z0-9_-]+)\s*:\s*([^;]+);").expect("token regex");
    let mut tokens = TokenMap::new();
    for cap in decl.captures_iter(body) {
        tokens.insert(&cap[1], cap[2].trim());
    }
    Some(tokens)
}
