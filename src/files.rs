//! Project file snapshots
//!
//! The editing subsystem owns the project's files; the preview engine only ever reads
//! an immutable [`ProjectFileSet`] snapshot taken at refresh time. Records are keyed by
//! absolute, `/`-rooted paths and kept in a sorted map so every pass over the set is
//! deterministic.

use crate::error::PreviewError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Directory names never loaded from disk
pub(crate) const IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target", ".livepreview"];

/// Record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    File,
    Folder,
}

/// Language inferred from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Css,
    Html,
    Json,
    Markdown,
    Python,
    Text,
}

impl Language {
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Language::Text,
        };
        match extension.as_str() {
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "ts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "css" => Language::Css,
            "html" | "htm" => Language::Html,
            "json" => Language::Json,
            "md" => Language::Markdown,
            "py" => Language::Python,
            _ => Language::Text,
        }
    }

    /// Languages whose content may execute in the preview
    pub fn is_script(self) -> bool {
        matches!(
            self,
            Language::JavaScript | Language::Jsx | Language::TypeScript | Language::Tsx
        )
    }

    /// Extensions that only exist for component markup syntax
    pub fn is_component_syntax(self) -> bool {
        matches!(self, Language::Jsx | Language::Tsx)
    }
}

/// One entry of the project tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
    pub language: Language,
}

impl FileRecord {
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self {
            path,
            content: content.into(),
            kind: FileKind::File,
            language,
        }
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
            kind: FileKind::Folder,
            language: Language::Text,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// Final path segment
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Snapshot of a project's files keyed by absolute path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFileSet {
    records: BTreeMap<String, FileRecord>,
}

impl ProjectFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set of plain files from `(path, content)` pairs.
    ///
    /// Later pairs replace earlier ones with the same path.
    pub fn from_files<I, P, C>(files: I) -> Result<Self, PreviewError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let mut set = Self::new();
        for (path, content) in files {
            set.insert(FileRecord::file(path, content))?;
        }
        Ok(set)
    }

    /// Insert or replace a record. Paths must be absolute and `/`-rooted.
    pub fn insert(&mut self, record: FileRecord) -> Result<(), PreviewError> {
        validate_path(&record.path)?;
        self.records.insert(record.path.clone(), record);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.get(path)
    }

    /// Content of a file record; folders and missing paths yield `None`
    pub fn content(&self, path: &str) -> Option<&str> {
        self.records
            .get(path)
            .filter(|record| record.is_file())
            .map(|record| record.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in path order
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// File records whose language may execute
    pub fn scripts(&self) -> impl Iterator<Item = &FileRecord> {
        self.iter()
            .filter(|record| record.is_file() && record.language.is_script())
    }

    /// Copy of this snapshot with one file's content replaced by an unsaved edit.
    ///
    /// A path with no record is added as a new file; a folder path is left alone.
    pub fn with_override(&self, path: &str, content: &str) -> Result<Self, PreviewError> {
        let mut next = self.clone();
        match next.records.get_mut(path) {
            Some(record) if record.is_file() => record.content = content.to_string(),
            Some(_) => debug!(path, "Ignoring content override for folder"),
            None => next.insert(FileRecord::file(path, content))?,
        }
        Ok(next)
    }

    /// Load a project directory from disk.
    ///
    /// Non-UTF-8 files are skipped; VCS and dependency directories are never entered.
    pub fn load_dir(root: &Path) -> Result<Self, PreviewError> {
        if !root.is_dir() {
            return Err(PreviewError::InvalidPath(root.display().to_string()));
        }
        let mut set = Self::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && IGNORED_DIRS
                        .iter()
                        .any(|ignored| entry.file_name() == std::ffi::OsStr::new(ignored)))
            });
        for entry in walker {
            let entry = entry.map_err(|e| PreviewError::InvalidPath(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| PreviewError::InvalidPath(e.to_string()))?;
            let path = format!(
                "/{}",
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            );
            if entry.file_type().is_dir() {
                set.insert(FileRecord::folder(path))?;
            } else if entry.file_type().is_file() {
                match std::fs::read_to_string(entry.path()) {
                    Ok(content) => set.insert(FileRecord::file(path, content))?,
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                        debug!(path = %path, "Skipping non-UTF-8 file");
                    }
                    Err(e) => return Err(PreviewError::IoError(e)),
                }
            }
        }
        Ok(set)
    }
}

fn validate_path(path: &str) -> Result<(), PreviewError> {
    if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
        return Err(PreviewError::InvalidPath(format!(
            "{} (paths must be absolute and '/'-rooted)",
            path
        )));
    }
    if path.split('/').skip(1).any(|segment| segment.is_empty() || segment == "..") {
        return Err(PreviewError::InvalidPath(path.to_string()));
    }
    Ok(())
}
