//! Shared test utilities for integration tests
//!
//! Project fixtures, wire payload builders, and isolation of the user config
//! directory for tests that go through `ConfigLoader`.

use livepreview::files::ProjectFileSet;
use serde_json::{json, Value};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// The component used throughout the scenarios
pub const COMPONENT: &str = "function App(){ return (<div/>); } export default App;";

/// In-memory project from `(path, content)` pairs
pub fn project(files: &[(&str, &str)]) -> ProjectFileSet {
    ProjectFileSet::from_files(files.iter().copied()).unwrap()
}

/// A wire message as the interception shim posts it
pub fn console_payload(kind: &str, data: &str) -> Value {
    json!({ "type": kind, "data": data, "timestamp": "2024-05-01T12:00:00.000Z" })
}

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
///
/// Extra variables in `vars` are set for the duration of `f` and removed afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, _) in vars {
        std::env::remove_var(key);
    }
    env_state.restore();

    result
}
