//! Watch loop
//!
//! Monitors the project directory and re-synthesizes the preview document after
//! every settled burst of filesystem changes. Each burst is a file-set change
//! trigger on a [`RefreshController`], so a new generation supersedes the old one.

use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::files::{ProjectFileSet, IGNORED_DIRS};
use crate::refresh::RefreshController;
use crate::sandbox::IframeBackend;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root directory
    pub project_root: PathBuf,
    /// Document written after every refresh
    pub out: PathBuf,
    /// Quiet period that ends a burst of events
    pub debounce: Duration,
}

/// Whether a filesystem event should trigger a refresh
pub(crate) fn is_relevant(event: &Event, options: &WatchOptions) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| !is_ignored(path, &options.project_root, &options.out))
}

fn is_ignored(path: &Path, root: &Path, out: &Path) -> bool {
    if path == out {
        return true;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| {
        IGNORED_DIRS
            .iter()
            .any(|ignored| component.as_os_str() == std::ffi::OsStr::new(ignored))
    })
}

/// Run until the watcher channel closes
pub fn watch_project(options: &WatchOptions, config: &PreviewConfig) -> Result<(), PreviewError> {
    let mut controller = RefreshController::new(IframeBackend::new(), config);
    refresh_and_write(&mut controller, options);

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        if let Err(e) = tx.send(res) {
            error!("Error sending watch event: {}", e);
        }
    })?;
    watcher.watch(&options.project_root, RecursiveMode::Recursive)?;
    info!(project = %options.project_root.display(), "Watching project");

    loop {
        let first = match rx.recv() {
            Ok(result) => result,
            Err(_) => break,
        };
        let mut relevant = accept(first, options);

        // Collapse the burst: keep reading until the debounce window passes quietly.
        loop {
            match rx.recv_timeout(options.debounce) {
                Ok(result) => relevant |= accept(result, options),
                Err(mpsc::RecvTimeoutError::Timeout) => break,
                Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }

        if relevant {
            refresh_and_write(&mut controller, options);
        }
    }
    Ok(())
}

fn accept(result: notify::Result<Event>, options: &WatchOptions) -> bool {
    match result {
        Ok(event) => {
            let relevant = is_relevant(&event, options);
            debug!(kind = ?event.kind, paths = ?event.paths, relevant, "Filesystem event");
            relevant
        }
        Err(e) => {
            warn!("Watch error: {}", e);
            false
        }
    }
}

fn refresh_and_write(controller: &mut RefreshController<IframeBackend>, options: &WatchOptions) {
    let files = match ProjectFileSet::load_dir(&options.project_root) {
        Ok(files) => files,
        Err(e) => {
            warn!("Failed to load project: {}", e);
            return;
        }
    };
    if let Err(e) = controller.files_changed(files) {
        warn!("Refresh failed: {}", e);
    }
    match std::fs::write(&options.out, controller.document().as_str()) {
        Ok(()) => info!(
            state = controller.state().label(),
            mode = controller.mode().label(),
            out = %options.out.display(),
            "Preview updated"
        ),
        Err(e) => error!("Failed to write preview document: {}", e),
    }
}
