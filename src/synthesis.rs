//! Document Synthesis
//!
//! Turns a snapshot into one self-contained HTML document that the sandbox can run.
//! Synthesis is a pure function of `(files, mode, diagnostic)` plus the configured
//! entry conventions and runtime resources: the same inputs always produce the same
//! bytes, so documents are regenerated on every refresh and never cached.
//!
//! Selection order:
//! 1. a static diagnostic yields the fixed diagnostic page and nothing else runs;
//! 2. framework mode yields the component harness shell;
//! 3. plain mode splices into the author's markup entry when it has content;
//! 4. otherwise plain mode yields the default shell.

mod console;
mod diagnostic;
mod framework;
mod plain;

pub use framework::{encode_entry_source, satisfies_component_contract, SCAFFOLD_COMPONENT};

use crate::classify::ModeClassification;
use crate::config::RuntimeConfig;
use crate::diagnose::StaticDiagnostic;
use crate::entry::{EntryConventions, ResolvedEntries};
use crate::files::ProjectFileSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which synthesis branch produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Diagnostic,
    Framework,
    PlainCustomMarkup,
    PlainDefaultShell,
}

/// Immutable synthesized document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDocument {
    kind: DocumentKind,
    text: String,
}

impl SynthesizedDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// blake3 digest of the document text, hex encoded
    pub fn fingerprint(&self) -> String {
        blake3::hash(self.text.as_bytes()).to_hex().to_string()
    }

    /// Whether the document loads framework runtime resources
    pub fn needs_runtime_resources(&self) -> bool {
        self.kind == DocumentKind::Framework
    }
}

/// Synthesizer bound to entry conventions and runtime resource URLs
#[derive(Debug, Clone, Default)]
pub struct DocumentSynthesizer {
    entries: EntryConventions,
    runtime: RuntimeConfig,
}

impl DocumentSynthesizer {
    pub fn new(entries: EntryConventions, runtime: RuntimeConfig) -> Self {
        Self { entries, runtime }
    }

    pub fn entries(&self) -> &EntryConventions {
        &self.entries
    }

    pub fn runtime(&self) -> &RuntimeConfig {
        &self.runtime
    }

    pub fn synthesize(
        &self,
        files: &ProjectFileSet,
        mode: ModeClassification,
        diagnostic: Option<&StaticDiagnostic>,
    ) -> SynthesizedDocument {
        if let Some(diagnostic) = diagnostic {
            return diagnostic::render(diagnostic);
        }

        let entries = self.entries.resolve(files);
        let document = match mode {
            ModeClassification::Framework => framework::render(&entries, &self.runtime),
            ModeClassification::Plain if entries.markup.has_content() => plain::splice(&entries),
            ModeClassification::Plain => plain::default_shell(&entries),
        };
        debug!(
            kind = ?document.kind,
            bytes = document.len(),
            script = entries.script.path.as_deref().unwrap_or("-"),
            style = entries.style.path.as_deref().unwrap_or("-"),
            "Synthesized preview document"
        );
        document
    }

    /// Document for the empty snapshot: the default shell with no entries
    pub fn default_shell(&self) -> SynthesizedDocument {
        plain::default_shell(&ResolvedEntries::default())
    }
}

/// Synthesize with the default conventions and runtime resources
pub fn synthesize(
    files: &ProjectFileSet,
    mode: ModeClassification,
    diagnostic: Option<&StaticDiagnostic>,
) -> SynthesizedDocument {
    DocumentSynthesizer::default().synthesize(files, mode, diagnostic)
}

static SCRIPT_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(script)").expect("script close pattern is valid"));
static STYLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(style)").expect("style close pattern is valid"));

/// Make user text safe to embed in a `<script>` element
pub(crate) fn escape_script(text: &str) -> String {
    SCRIPT_CLOSE.replace_all(text, r"<\/$1").into_owned()
}

/// Make user text safe to embed in a `<style>` element
pub(crate) fn escape_style(text: &str) -> String {
    STYLE_CLOSE.replace_all(text, r"<\/$1").into_owned()
}

/// Escape text for an HTML text or attribute position
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a user script so a synchronous throw is reported instead of aborting silently
pub(crate) fn guarded_script(script: &str) -> String {
    let mut out = String::new();
    out.push_str("try {\n");
    out.push_str(&escape_script(script));
    out.push_str("\n} catch (err) {\n  console.error('JavaScript error:', err);\n}\n");
    out
}
