//! Streaming markup scanner.
//!
//! Walks the document once as a flat stream of start-tag/end-tag/text
//! events. No DOM is built: vector-graphic subtrees are tracked with a
//! single depth counter and a growable text accumulator, everything else
//! feeds insertion-ordered frequency tables.
//!
//! Guarantees:
//! - Malformed markup never aborts the scan. An unmatched end tag at
//!   depth 0 is a no-op; nesting past the depth ceiling abandons the
//!   current subtree and keeps scanning.
//! - Line numbers come from newline counts in text events only, so they
//!   are best-effort, not byte-exact.

use crate::models::scan::{ScanOutcome, StyleSignal, SubtreeRecord};
use regex::Regex;
use std::collections::HashMap;

/// Root tag of a vector-graphic subtree.
const VECTOR_ROOT: &str = "svg";

/// Abandon subtree accumulation past this nesting depth.
const DEPTH_CEILING: usize = 64;

/// HTML void elements: no end tag will arrive for these.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Layout-technique probes applied to inline and block style text.
/// Both `key: value` and `key:value` spacings match, case-insensitive.
struct StyleProbes {
    absolute: Regex,
    flex: Regex,
    grid: Regex,
}

impl StyleProbes {
    fn new() -> Self {
        StyleProbes {
            absolute: Regex::new(r"(?i)position\s*:\s*absolute").expect("probe regex"),
            flex: Regex::new(r"(?i)display\s*:\s*(?:inline-)?flex").expect("probe regex"),
            grid: Regex::new(r"(?i)display\s*:\s*(?:inline-)?grid").expect("probe regex"),
        }
    }

    fn feed(&self, style_text: &str, sig: &mut StyleSignal) {
        sig.absolute += self.absolute.find_iter(style_text).count();
        sig.flex += self.flex.find_iter(style_text).count();
        sig.grid += self.grid.find_iter(style_text).count();
    }
}

/// A parsed start tag. Attribute order is source order; values are
/// `None` for bare boolean attributes.
struct StartTag {
    name: String,
    attrs: Vec<(String, Option<String>)>,
    self_closing: bool,
}

impl StartTag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }
}

/// Scan the full document text and return the accumulated tables,
/// style counters, and vector subtree records.
pub fn scan(text: &str) -> ScanOutcome {
    let probes = StyleProbes::new();
    let mut out = ScanOutcome::default();
    let mut fp_index: HashMap<String, usize> = HashMap::new();

    let bytes = text.as_bytes();
    let mut i = 0usize;
    let mut line = 1usize;
    let mut svg_depth = 0usize;
    let mut svg_buf = String::new();
    let mut in_style = false;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            let end = find_byte(bytes, i, b'<').unwrap_or(bytes.len());
            let chunk = &text[i..end];
            line += chunk.bytes().filter(|b| *b == b'\n').count();
            if in_style {
                probes.feed(chunk, &mut out.style);
            }
            if svg_depth > 0 {
                let trimmed = chunk.trim();
                if !trimmed.is_empty() {
                    svg_buf.push(' ');
                    svg_buf.push_str(trimmed);
                }
            }
            i = end;
            continue;
        }

        let rest = &text[i..];
        if rest.starts_with("<!--") {
            i = rest
                .find("-->")
                .map(|p| i + p + 3)
                .unwrap_or(bytes.len());
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            i = find_byte(bytes, i, b'>').map(|p| p + 1).unwrap_or(bytes.len());
            continue;
        }
        if i + 1 < bytes.len() && bytes[i + 1] == b'/' {
            let close = find_byte(bytes, i, b'>');
            let end = close.map(|p| p + 1).unwrap_or(bytes.len());
            let inner = close.map(|p| &text[i + 2..p]).unwrap_or(&text[i + 2..]);
            let name = inner.trim().to_ascii_lowercase();
            if svg_depth > 0 {
                svg_buf.push_str("</");
                svg_buf.push_str(&name);
                svg_buf.push('>');
                svg_depth -= 1;
                if svg_depth == 0 {
                    record_subtree(&mut out.subtrees, &mut fp_index, &svg_buf, line);
                    svg_buf.clear();
                }
            } else if name == "style" {
                in_style = false;
            }
            // any other end tag at depth 0 is a no-op
            i = end;
            continue;
        }
        if i + 1 < bytes.len() && bytes[i + 1].is_ascii_alphabetic() {
            let (tag, next) = parse_start_tag(text, i);
            if svg_depth > 0 {
                append_open_tag(&mut svg_buf, &tag);
                if !(tag.self_closing || is_void(&tag.name)) {
                    if svg_depth >= DEPTH_CEILING {
                        svg_depth = 0;
                        svg_buf.clear();
                    } else {
                        svg_depth += 1;
                    }
                }
            } else {
                out.tags.bump(&tag.name);
                if let Some(cls) = tag.attr("class") {
                    for tok in cls.split_whitespace() {
                        out.classes.bump(tok);
                    }
                }
                if let Some(marker) = tag.attr("data-component") {
                    if !marker.is_empty() {
                        out.markers.bump(marker);
                    }
                }
                if let Some(style) = tag.attr("style") {
                    probes.feed(style, &mut out.style);
                }
                if tag.name == "style" && !tag.self_closing {
                    in_style = true;
                }
                if tag.name == VECTOR_ROOT && !tag.self_closing {
                    svg_depth = 1;
                    svg_buf.clear();
                    append_open_tag(&mut svg_buf, &tag);
                }
            }
            i = next;
            continue;
        }
        // stray '<' without a tag: treat as a single text byte
        i += 1;
    }

    out
}

/// Collapse whitespace runs and trim: two subtrees differing only in
/// formatting normalize to the same fingerprint.
pub fn fingerprint(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn record_subtree(
    subtrees: &mut Vec<SubtreeRecord>,
    fp_index: &mut HashMap<String, usize>,
    raw: &str,
    line: usize,
) {
    let fp = fingerprint(raw);
    if fp.is_empty() {
        return;
    }
    match fp_index.get(&fp) {
        Some(&ix) => {
            let rec = &mut subtrees[ix];
            rec.count += 1;
            rec.lines.push(line);
        }
        None => {
            fp_index.insert(fp.clone(), subtrees.len());
            subtrees.push(SubtreeRecord {
                fingerprint: fp,
                count: 1,
                lines: vec![line],
            });
        }
    }
}

fn append_open_tag(buf: &mut String, tag: &StartTag) {
    buf.push('<');
    buf.push_str(&tag.name);
    for (k, v) in &tag.attrs {
        buf.push(' ');
        buf.push_str(k);
        if let Some(v) = v {
            buf.push_str("=\"");
            buf.push_str(v);
            buf.push('"');
        }
    }
    buf.push('>');
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|b| *b == needle).map(|p| from + p)
}

/// Parse a start tag beginning at `at` (which points at `<`). Returns
/// the tag and the index just past the closing `>`.
fn parse_start_tag(text: &str, at: usize) -> (StartTag, usize) {
    let bytes = text.as_bytes();
    let mut i = at + 1;
    let name_start = i;
    while i < bytes.len()
        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':')
    {
        i += 1;
    }
    let name = text[name_start..i].to_ascii_lowercase();
    let mut attrs: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                self_closing = true;
                i += 1;
            }
            // malformed tag; hand the '<' back to the outer loop
            b'<' => break,
            _ => {
                let ns = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                let attr_name = text[ns..i].to_string();
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let mut value: Option<String> = None;
                if i < bytes.len() && bytes[i] == b'=' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                        let quote = bytes[i];
                        i += 1;
                        let vs = i;
                        while i < bytes.len() && bytes[i] != quote {
                            i += 1;
                        }
                        value = Some(text[vs..i].to_string());
                        if i < bytes.len() {
                            i += 1;
                        }
                    } else {
                        let vs = i;
                        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>'
                        {
                            i += 1;
                        }
                        value = Some(text[vs..i].to_string());
                    }
                }
                if !attr_name.is_empty() {
                    attrs.push((attr_name, value));
                }
            }
        }
    }

    (
        StartTag {
            name,
            attrs,
            self_closing,
        },
        i,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_variants_share_fingerprint() {
        let doc = r#"
            <svg width="10" height="10"><circle cx="5" cy="5" r="4"/></svg>
            <svg width="10"
                 height="10">
                <circle cx="5"   cy="5" r="4"/>
            </svg>
        "#;
        let out = scan(doc);
        assert_eq!(out.subtrees.len(), 1);
        assert_eq!(out.subtrees[0].count, 2);
        assert_eq!(out.subtrees[0].lines.len(), 2);
    }

    #[test]
    fn test_nested_vector_root_balances_depth() {
        let doc = r#"<svg><g><svg><rect/></svg></g></svg><div></div>"#;
        let out = scan(doc);
        // only the outermost subtree is recorded, inner structure is
        // part of its fingerprint
        assert_eq!(out.subtrees.len(), 1);
        assert_eq!(out.subtrees[0].count, 1);
        assert!(out.subtrees[0].fingerprint.contains("<rect>"));
        assert_eq!(out.tags.get("div"), 1);
    }

    #[test]
    fn test_void_elements_do_not_increment_depth() {
        let doc = r#"<svg><img src="x.png"><path d="M0 0"/></svg>"#;
        let out = scan(doc);
        assert_eq!(out.subtrees.len(), 1);
        assert!(out.subtrees[0].fingerprint.contains("<img src=\"x.png\">"));
    }

    #[test]
    fn test_unmatched_end_tag_is_noop() {
        let doc = "</div><p>ok</p></svg>";
        let out = scan(doc);
        assert!(out.subtrees.is_empty());
        assert_eq!(out.tags.get("p"), 1);
    }

    #[test]
    fn test_depth_ceiling_abandons_subtree() {
        let mut doc = String::from("<svg>");
        for _ in 0..100 {
            doc.push_str("<g>");
        }
        for _ in 0..100 {
            doc.push_str("</g>");
        }
        doc.push_str("</svg><span></span>");
        let out = scan(&doc);
        assert!(out.subtrees.is_empty());
        assert_eq!(out.tags.get("span"), 1);
    }

    #[test]
    fn test_frequency_tables_and_markers() {
        let doc = r#"
            <div class="card card--wide" data-component="Card"></div>
            <div class="card"></div>
            <span data-component="Card"></span>
            <span data-component="Badge"></span>
        "#;
        let out = scan(doc);
        assert_eq!(out.tags.get("div"), 2);
        assert_eq!(out.tags.get("span"), 2);
        assert_eq!(out.classes.get("card"), 2);
        assert_eq!(out.classes.get("card--wide"), 1);
        assert_eq!(out.markers.get("Card"), 2);
        assert_eq!(out.markers.get("Badge"), 1);
    }

    #[test]
    fn test_style_probes_inline_and_block() {
        let doc = r#"
            <div style="position:absolute; top:0"></div>
            <div style="POSITION: ABSOLUTE"></div>
            <style>
              .a { display: flex; }
              .b { display:grid; position: absolute; }
            </style>
        "#;
        let out = scan(doc);
        assert_eq!(out.style.absolute, 3);
        assert_eq!(out.style.flex, 1);
        assert_eq!(out.style.grid, 1);
    }

    #[test]
    fn test_comments_and_doctype_skipped() {
        let doc = "<!DOCTYPE html><!-- <svg><circle/></svg> --><b></b>";
        let out = scan(doc);
        assert!(out.subtrees.is_empty());
        assert_eq!(out.tags.get("b"), 1);
    }

    #[test]
    fn test_line_attribution_counts_text_newlines() {
        let doc = "line one\nline two\n<svg><rect/></svg>";
        let out = scan(doc);
        assert_eq!(out.subtrees[0].lines, vec![3]);
    }

    #[test]
    fn test_empty_document_scans_clean() {
        let out = scan("");
        assert!(out.tags.is_empty());
        assert!(out.subtrees.is_empty());
        assert_eq!(out.style.absolute, 0);
    }
}
