//! Shared data models for analyze/validate outputs.

pub mod scan;

use serde::Serialize;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
/// Issue severity. Closed set so report grouping stays exhaustive.
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Short tag used by the human printers.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warn",
            Severity::Info => "info",
        }
    }
}

#[derive(Serialize, Clone, Debug)]
/// A single finding from the rule engine.
///
/// Issues keep rule-evaluation order in the list; severity grouping
/// happens at report time only.
pub struct Issue {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, rule: &str, message: impl Into<String>) -> Self {
        Issue {
            severity,
            rule: rule.to_string(),
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Serialize, Clone, Copy, Default, Debug)]
/// Per-document severity counts used by printers and exit codes.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Summary {
    pub fn of(issues: &[Issue]) -> Self {
        let mut s = Summary::default();
        for is in issues {
            match is.severity {
                Severity::Error => s.errors += 1,
                Severity::Warning => s.warnings += 1,
                Severity::Info => s.infos += 1,
            }
        }
        s
    }
}

#[derive(Serialize, Debug)]
/// Validator-path result for one document.
pub struct ValidateResult {
    pub file: String,
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
