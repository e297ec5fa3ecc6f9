//! Integration tests for layered configuration loading

use super::test_utils::with_isolated_env;
use livepreview::config::{ConfigLoader, PreviewConfig};
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let config = with_isolated_env(&test_dir, &[], || ConfigLoader::load(project.path()).unwrap());
    assert_eq!(config.console.capacity, 50);
    assert_eq!(config.entries.script[0], "/App.js");
    assert_eq!(config.runtime, PreviewConfig::default().runtime);
}

#[test]
fn test_project_file_overrides_user_file() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let user_dir = test_dir.path().join("config").join("livepreview");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[console]\ncapacity = 10\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();
    std::fs::write(
        project.path().join(".livepreview.toml"),
        "[console]\ncapacity = 20\n\n[entries]\nscript = [\"/main.js\"]\n",
    )
    .unwrap();

    let config = with_isolated_env(&test_dir, &[], || ConfigLoader::load(project.path()).unwrap());
    assert_eq!(config.console.capacity, 20);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.entries.script, vec!["/main.js".to_string()]);
    assert_eq!(config.entries.markup, vec!["/index.html".to_string()]);
}

#[test]
fn test_environment_wins_over_files() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(project.path().join(".livepreview.toml"), "[console]\ncapacity = 20\n").unwrap();

    let config = with_isolated_env(&test_dir, &[("LIVEPREVIEW__CONSOLE__CAPACITY", "5")], || {
        ConfigLoader::load(project.path()).unwrap()
    });
    assert_eq!(config.console.capacity, 5);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(
        project.path().join(".livepreview.toml"),
        "[runtime]\ntranspiler = \"http://insecure.example/babel.js\"\n",
    )
    .unwrap();

    let result = with_isolated_env(&test_dir, &[], || ConfigLoader::load(project.path()));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("https://"), "{message}");
}

#[test]
fn test_load_from_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preview.toml");
    std::fs::write(&path, "[console]\ncapacity = 7\n").unwrap();
    let config = with_isolated_env(&dir, &[], || ConfigLoader::load_from_file(&path).unwrap());
    assert_eq!(config.console.capacity, 7);

    assert!(ConfigLoader::load_from_file(&dir.path().join("missing.toml")).is_err());
}
