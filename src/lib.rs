//! uifit core library.
//!
//! This crate exposes programmatic APIs for analyzing HTML/CSS
//! documents for design-tool component conversion fitness: structural
//! duplication, layout anti-patterns, missing design tokens, and
//! missing semantic component markers, all via purely syntactic
//! analysis of a single document.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `scanner`: Streaming markup scanner with vector subtree fingerprints.
//! - `patterns`: Regex scans for repeated motifs and the token block.
//! - `rules`: The fixed battery of structural checks.
//! - `analyze`: Per-file analyze/validate drivers.
//! - `report`: Fitness score and the sectioned human report.
//! - `models`: Data models for scan output and issues.
//! - `output`: Human/JSON printers for analyze/validate.
//! - `utils`: Supporting helpers.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod patterns;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod utils;
