use super::{load_settings_with, normalize_base_url, Settings};

use std::{collections::HashMap, fs, path::PathBuf};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn normalizes_base_url() {
    assert_eq!(normalize_base_url(" https://rh.example.com/ "), "https://rh.example.com");
    assert_eq!(normalize_base_url("   "), "http://localhost:8080");
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        "base_url = \"https://rh.example.com/\"\ntoken_path = \"/tmp/hr-token.json\"\n",
    )
    .expect("write config");

    let settings = load_settings_with(Some(&path), env_of(&[])).expect("settings");
    assert_eq!(
        settings,
        Settings {
            base_url: "https://rh.example.com".into(),
            token_path: PathBuf::from("/tmp/hr-token.json"),
        }
    );
}

#[test]
fn environment_wins_over_file_and_app_prefix_wins_last() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "base_url = \"https://file.example.com\"\n").expect("write config");

    let settings = load_settings_with(
        Some(&path),
        env_of(&[
            ("HRDASH_BASE_URL", "https://env.example.com"),
            ("APP__BASE_URL", "https://app.example.com"),
            ("HRDASH_TOKEN_PATH", "/var/lib/hrdash/token.json"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.base_url, "https://app.example.com");
    assert_eq!(settings.token_path, PathBuf::from("/var/lib/hrdash/token.json"));
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings_with(Some(&dir.path().join("missing.toml")), env_of(&[]))
        .expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "base_url = [").expect("write config");
    let err = load_settings_with(Some(&path), env_of(&[])).expect_err("broken");
    assert!(err.to_string().contains("invalid config file"));
}
