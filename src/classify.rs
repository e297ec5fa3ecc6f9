//! Runtime Mode Classification
//!
//! Decides whether a snapshot should boot a component framework or run as plain
//! markup and script. Classification is a pure scan of the script-like records
//! against an explicit table of marker predicates; the first hit on any record is
//! enough for [`ModeClassification::Framework`].
//!
//! The table is deliberately over-inclusive. A false positive boots the framework
//! harness, which falls back to its scaffold; a false negative only yields a plainer
//! preview.

use crate::files::{FileRecord, ProjectFileSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Runtime mode of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeClassification {
    Plain,
    Framework,
}

impl ModeClassification {
    pub fn label(self) -> &'static str {
        match self {
            ModeClassification::Plain => "Plain",
            ModeClassification::Framework => "Framework",
        }
    }
}

/// Marker family, one per classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// File extension reserved for component markup syntax
    ComponentSyntax,
    /// Import or require of the framework runtime module
    RuntimeImport,
    /// Hook-style state/effect calls or the virtual element constructor
    FrameworkApi,
    /// Declares a function and returns a markup-like expression
    ComponentShape,
}

enum Matcher {
    ComponentExtension,
    /// Every pattern must match somewhere in the content
    AllOf(Vec<Regex>),
}

/// One row of the marker table
pub struct Marker {
    pub kind: MarkerKind,
    pub name: &'static str,
    matcher: Matcher,
}

impl Marker {
    pub fn matches(&self, record: &FileRecord) -> bool {
        match &self.matcher {
            Matcher::ComponentExtension => record.language.is_component_syntax(),
            Matcher::AllOf(patterns) => patterns.iter().all(|p| p.is_match(&record.content)),
        }
    }
}

fn content_marker(kind: MarkerKind, name: &'static str, patterns: &[&str]) -> Marker {
    Marker {
        kind,
        name,
        matcher: Matcher::AllOf(
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("marker pattern is valid"))
                .collect(),
        ),
    }
}

/// Marker predicates in evaluation order
pub static MARKERS: Lazy<Vec<Marker>> = Lazy::new(|| {
    vec![
        Marker {
            kind: MarkerKind::ComponentSyntax,
            name: "component-extension",
            matcher: Matcher::ComponentExtension,
        },
        content_marker(MarkerKind::RuntimeImport, "import-react", &[r"\bimport\s+React\b"]),
        content_marker(
            MarkerKind::RuntimeImport,
            "from-react",
            &[r#"\bfrom\s*["']react(?:-dom)?(?:/[\w./-]*)?["']"#],
        ),
        content_marker(
            MarkerKind::RuntimeImport,
            "require-react",
            &[r#"\brequire\s*\(\s*["']react(?:-dom)?["']\s*\)"#],
        ),
        content_marker(MarkerKind::FrameworkApi, "use-state", &[r"\buseState\b"]),
        content_marker(MarkerKind::FrameworkApi, "use-effect", &[r"\buseEffect\b"]),
        content_marker(
            MarkerKind::FrameworkApi,
            "create-element",
            &[r"(?:\bReact\.|(?:^|[^.\w]))createElement\s*\("],
        ),
        content_marker(
            MarkerKind::ComponentShape,
            "function-returns-markup",
            &[r"(?:\bfunction\b|=>)", r"\breturn\s*\(*\s*<(?:[A-Za-z]|>)"],
        ),
    ]
});

/// A marker that fired on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerHit {
    pub path: String,
    pub kind: MarkerKind,
    pub marker: String,
}

/// Classification with the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub mode: ModeClassification,
    pub hits: Vec<MarkerHit>,
}

/// Classify a snapshot
pub fn classify(files: &ProjectFileSet) -> ModeClassification {
    let framework = files
        .scripts()
        .any(|record| MARKERS.iter().any(|marker| marker.matches(record)));
    if framework {
        ModeClassification::Framework
    } else {
        ModeClassification::Plain
    }
}

/// Classify a snapshot and collect every marker hit, in path then table order
pub fn classify_detailed(files: &ProjectFileSet) -> ClassificationReport {
    let hits: Vec<MarkerHit> = files
        .scripts()
        .flat_map(|record| {
            MARKERS
                .iter()
                .filter(move |marker| marker.matches(record))
                .map(move |marker| MarkerHit {
                    path: record.path.clone(),
                    kind: marker.kind,
                    marker: marker.name.to_string(),
                })
        })
        .collect();
    let mode = if hits.is_empty() {
        ModeClassification::Plain
    } else {
        ModeClassification::Framework
    };
    ClassificationReport { mode, hits }
}
