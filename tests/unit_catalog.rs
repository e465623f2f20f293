use launchscore::domain::models::CatalogEntry;
use launchscore::storage::catalog::CatalogStore;

#[test]
fn save_and_load_catalog_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("catalog.json");
    let store = CatalogStore::new(&path);

    let mut terminal = CatalogEntry::new("Terminal", "/Applications/Utilities/Terminal.app");
    terminal.aliases = vec!["shell".to_string()];
    let entries = vec![terminal, CatalogEntry::new("Notes", "/Applications/Notes.app")];

    store.save(&entries).expect("save catalog");
    let loaded = store.load().expect("load catalog");
    assert_eq!(entries, loaded);
}

#[test]
fn missing_catalog_is_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = CatalogStore::new(dir.path().join("absent.json"));
    assert!(store.load().expect("load missing catalog").is_empty());
}

#[test]
fn loads_legacy_app_cache_and_ignores_extra_fields() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("apps_cache.json");
    let apps = serde_json::json!([
        {"name": "Calendar", "icon": null, "path": "/Applications/Calendar.app", "executable_path": null, "icon_base64": "AAAA"},
        {"name": "", "icon": null, "path": "/Applications/Blank.app", "executable_path": null, "icon_base64": null}
    ]);
    let cache = serde_json::json!({ "apps": apps.to_string() });
    std::fs::write(&path, cache.to_string()).expect("write cache");

    let loaded = CatalogStore::new(&path).load().expect("load app cache");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Calendar");
    assert!(loaded[0].aliases.is_empty());
}

#[test]
fn malformed_catalog_reports_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write broken file");

    let err = CatalogStore::new(&path)
        .load()
        .expect_err("broken catalog should fail");
    assert!(err.to_string().contains("failed to parse catalog file"));
}
