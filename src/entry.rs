//! Entry resolution
//!
//! Each role (markup, style, script) has an ordered list of conventional candidate
//! paths. The first candidate that names a file in the snapshot wins; a role with no
//! match resolves to empty content rather than an error.

use crate::files::ProjectFileSet;
use serde::{Deserialize, Serialize};

/// Ordered candidate path lists per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConventions {
    #[serde(default = "default_markup")]
    pub markup: Vec<String>,

    #[serde(default = "default_style")]
    pub style: Vec<String>,

    #[serde(default = "default_script")]
    pub script: Vec<String>,
}

fn default_markup() -> Vec<String> {
    vec!["/index.html".to_string()]
}

fn default_style() -> Vec<String> {
    ["/styles.css", "/App.css", "/style.css"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_script() -> Vec<String> {
    ["/App.js", "/App.jsx", "/script.js", "/index.js"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for EntryConventions {
    fn default() -> Self {
        Self {
            markup: default_markup(),
            style: default_style(),
            script: default_script(),
        }
    }
}

/// One resolved role: the winning path (if any) and its content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub path: Option<String>,
    pub content: String,
}

impl ResolvedEntry {
    /// True when the entry carries something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Entries for all three roles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEntries {
    pub markup: ResolvedEntry,
    pub style: ResolvedEntry,
    pub script: ResolvedEntry,
}

impl EntryConventions {
    pub fn resolve(&self, files: &ProjectFileSet) -> ResolvedEntries {
        ResolvedEntries {
            markup: first_match(&self.markup, files),
            style: first_match(&self.style, files),
            script: first_match(&self.script, files),
        }
    }

    /// Resolved script entry text, the input of the error detector
    pub fn script_text<'a>(&self, files: &'a ProjectFileSet) -> &'a str {
        self.script
            .iter()
            .find_map(|candidate| files.content(candidate))
            .unwrap_or("")
    }

    pub fn validate(&self) -> Result<(), String> {
        for (role, list) in [
            ("markup", &self.markup),
            ("style", &self.style),
            ("script", &self.script),
        ] {
            if list.is_empty() {
                return Err(format!("{} candidate list cannot be empty", role));
            }
            if let Some(bad) = list.iter().find(|p| !p.starts_with('/')) {
                return Err(format!("{} candidate '{}' must be '/'-rooted", role, bad));
            }
        }
        Ok(())
    }
}

fn first_match(candidates: &[String], files: &ProjectFileSet) -> ResolvedEntry {
    candidates
        .iter()
        .find_map(|candidate| {
            files.content(candidate).map(|content| ResolvedEntry {
                path: Some(candidate.clone()),
                content: content.to_string(),
            })
        })
        .unwrap_or_default()
}
