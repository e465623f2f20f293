use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use launchscore::storage::config::RuntimeConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn load_config_file_applies_values() {
    let _guard = ENV_LOCK.lock().expect("lock env");
    let dir = tempfile::tempdir().expect("create tempdir");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
            [catalog]
            path = "/srv/launcher/catalog.json"

            [filters]
            dedupe = false
            exclude_prefixes = "/opt/hidden"

            [results]
            limit = 12
        "#,
    )
    .expect("write config");

    let previous = snapshot_env();
    clear_tracked_env();
    let config = RuntimeConfig::load_from_path(&config_path).expect("load config from path");
    restore_env(&previous);

    assert_eq!(
        config.catalog.path,
        PathBuf::from("/srv/launcher/catalog.json")
    );
    assert!(!config.filters.dedupe);
    assert_eq!(config.filters.exclude_prefixes, vec!["/opt/hidden".to_string()]);
    assert_eq!(config.results.limit, 12);
}

#[test]
fn missing_file_keeps_defaults() {
    let _guard = ENV_LOCK.lock().expect("lock env");
    let dir = tempfile::tempdir().expect("create tempdir");

    let previous = snapshot_env();
    clear_tracked_env();
    let config = RuntimeConfig::load_from_path(&dir.path().join("absent.toml"))
        .expect("load defaults");
    restore_env(&previous);

    assert!(config.filters.dedupe);
    assert_eq!(
        config.filters.exclude_prefixes,
        vec!["/Library".to_string(), "/System".to_string()]
    );
    assert_eq!(config.results.limit, 5);
    assert!(config.catalog.path.ends_with("launchscore/catalog.json"));
}

#[test]
fn env_vars_override_file_values() {
    let _guard = ENV_LOCK.lock().expect("lock env");
    let dir = tempfile::tempdir().expect("create tempdir");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
            [catalog]
            path = "/from/file.json"

            [filters]
            dedupe = true

            [results]
            limit = 3
        "#,
    )
    .expect("write config");

    let previous = snapshot_env();
    env::set_var("LAUNCHSCORE_CATALOG_PATH", "/from/env.json");
    env::set_var("LAUNCHSCORE_DEDUPE", "false");
    env::set_var("LAUNCHSCORE_EXCLUDE_PREFIXES", "/System, /usr/share");
    env::set_var("LAUNCHSCORE_RESULT_LIMIT", "9");

    let config = RuntimeConfig::load_from_path(&config_path).expect("load config from path");
    restore_env(&previous);

    assert_eq!(config.catalog.path, PathBuf::from("/from/env.json"));
    assert!(!config.filters.dedupe);
    assert_eq!(
        config.filters.exclude_prefixes,
        vec!["/System".to_string(), "/usr/share".to_string()]
    );
    assert_eq!(config.results.limit, 9);
}

#[test]
fn invalid_env_limit_is_rejected() {
    let _guard = ENV_LOCK.lock().expect("lock env");
    let dir = tempfile::tempdir().expect("create tempdir");

    let previous = snapshot_env();
    clear_tracked_env();
    env::set_var("LAUNCHSCORE_RESULT_LIMIT", "many");
    let result = RuntimeConfig::load_from_path(&dir.path().join("absent.toml"));
    restore_env(&previous);

    let err = result.expect_err("invalid limit should fail");
    assert!(err.to_string().contains("LAUNCHSCORE_RESULT_LIMIT"));
}

fn snapshot_env() -> Vec<(&'static str, Option<String>)> {
    tracked_env_keys()
        .into_iter()
        .map(|key| (key, env::var(key).ok()))
        .collect()
}

fn clear_tracked_env() {
    for key in tracked_env_keys() {
        env::remove_var(key);
    }
}

fn restore_env(previous: &[(&str, Option<String>)]) {
    for (key, value) in previous {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

fn tracked_env_keys() -> [&'static str; 4] {
    [
        "LAUNCHSCORE_CATALOG_PATH",
        "LAUNCHSCORE_DEDUPE",
        "LAUNCHSCORE_EXCLUDE_PREFIXES",
        "LAUNCHSCORE_RESULT_LIMIT",
    ]
}
