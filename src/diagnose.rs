//! Static error detection
//!
//! A bounded lexical scan of the resolved entry script against a fixed, ordered table
//! of known-malformed patterns. This is not a parser: it only recognises a handful of
//! mistakes that would otherwise produce a blank or confusing preview. The first rule
//! that matches produces the diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Diagnostic produced before any user code runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDiagnostic {
    /// Name of the rule that fired
    pub rule: String,
    pub message: String,
}

/// One row of the rule table.
///
/// A rule fires when at least one `requires` pattern matches and no `forbids`
/// pattern does.
pub struct DiagnosticRule {
    pub name: &'static str,
    pub message: &'static str,
    requires: Vec<Regex>,
    forbids: Vec<Regex>,
}

impl DiagnosticRule {
    fn new(
        name: &'static str,
        message: &'static str,
        requires: &[&str],
        forbids: &[&str],
    ) -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("diagnostic pattern is valid"))
                .collect()
        };
        Self {
            name,
            message,
            requires: compile(requires),
            forbids: compile(forbids),
        }
    }

    pub fn matches(&self, script: &str) -> bool {
        self.requires.iter().any(|p| p.is_match(script))
            && !self.forbids.iter().any(|p| p.is_match(script))
    }
}

/// Rules in priority order
pub static RULES: Lazy<Vec<DiagnosticRule>> = Lazy::new(|| {
    vec![
        DiagnosticRule::new(
            "truncated-export",
            "Syntax Error: Use 'export default App' instead of 'port default App'",
            &["port default"],
            &["export default"],
        ),
        DiagnosticRule::new(
            "malformed-framework-import",
            "Syntax Error: Invalid import statement for React",
            &[r"\bimport\s+React\b"],
            &[r#"\bfrom\s*["']react["']"#],
        ),
        DiagnosticRule::new(
            "markup-without-framework",
            "JSX Error: Make sure to import React when using JSX syntax",
            &["<div>", "</div>"],
            &["React"],
        ),
    ]
});

/// Scan an entry script; `None` when no rule fires
pub fn detect(script: &str) -> Option<StaticDiagnostic> {
    RULES
        .iter()
        .find(|rule| rule.matches(script))
        .map(|rule| StaticDiagnostic {
            rule: rule.name.to_string(),
            message: rule.message.to_string(),
        })
}
