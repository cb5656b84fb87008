//! Configuration discovery and effective settings resolution.
//!
//! uifit reads `uifit.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags.
//! Defaults:
//! - `output`: `human`
//! - `patterns`: none (must come from CLI or config)
//! - `ignore`: empty
//! - `analyze.min_score`: unset (no CI gate)
//! - `analyze.clamp_score`: false (scores are reported unclamped)
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Analyzer-related configuration section under `[analyze]`.
pub struct AnalyzeCfg {
    pub min_score: Option<i64>,
    pub clamp_score: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `uifit.toml|yaml`.
pub struct UifitConfig {
    pub output: Option<String>,
    /// Default document glob patterns when the CLI passes none.
    pub patterns: Option<Vec<String>>,
    /// Rule ids filtered from every result.
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
    #[serde(default)]
    pub analyze: Option<AnalyzeCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub patterns: Vec<String>,
    pub patterns_configured: bool,
    pub ignore: Vec<String>,
    pub min_score: Option<i64>,
    pub clamp_score: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `uifit.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("uifit.toml").exists()
            || cur.join("uifit.yaml").exists()
            || cur.join("uifit.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `UifitConfig` from `uifit.toml` or `uifit.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<UifitConfig> {
    let toml_path = root.join("uifit.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: UifitConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["uifit.yaml", "uifit.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: UifitConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_patterns: &[String],
    cli_output: Option<&str>,
    cli_min_score: Option<i64>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let (patterns, patterns_configured) = if !cli_patterns.is_empty() {
        (cli_patterns.to_vec(), true)
    } else {
        match cfg.patterns {
            Some(p) if !p.is_empty() => (p, true),
            _ => (Vec::new(), false),
        }
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let ignore = cfg.ignore.unwrap_or_default();

    let min_score = cli_min_score.or_else(|| cfg.analyze.as_ref().and_then(|a| a.min_score));
    let clamp_score = cfg
        .analyze
        .as_ref()
        .and_then(|a| a.clamp_score)
        .unwrap_or(false);

    Effective {
        repo_root,
        output,
        patterns,
        patterns_configured,
        ignore,
        min_score,
        clamp_score,
    }
}
