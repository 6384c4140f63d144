use std::fs;

use mediasort_core::Preset;
use mediasort_store::{PresetStore, StoreError};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PresetStore {
    PresetStore::new(dir.path().join("presets"))
}

#[test]
fn test_load_missing_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let presets = vec![
        Preset::new("card", "/Volumes/CARD", "/home/me/Import"),
        Preset::new("ssd", "/Volumes/T7/footage", "/home/me/Video"),
        Preset::new("with spaces", "/tmp/a b", "/tmp/c d"),
    ];

    store.save(&presets).unwrap();
    assert_eq!(store.load().unwrap(), presets);
}

#[test]
fn test_save_replaces_contents() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .save(&[Preset::new("old", "/a", "/b"), Preset::new("older", "/c", "/d")])
        .unwrap();
    store.save(&[Preset::new("new", "/e", "/f")]).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, "new|src::/e|dst::/f\n");
    assert!(!dir.path().join("presets.tmp").exists());
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = PresetStore::new(dir.path().join("nested").join("presets"));

    store.save(&[Preset::new("card", "/a", "/b")]).unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_add_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.add(Preset::new("first", "/a", "/b")).unwrap();
    store.add(Preset::new("second", "/c", "/d")).unwrap();

    let names: Vec<_> = store.load().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn test_delete_removes_all_matching_names() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .save(&[
            Preset::new("card", "/a", "/b"),
            Preset::new("ssd", "/c", "/d"),
            Preset::new("card", "/e", "/f"),
        ])
        .unwrap();

    store.delete("card").unwrap();

    assert_eq!(store.load().unwrap(), vec![Preset::new("ssd", "/c", "/d")]);
}

#[test]
fn test_delete_unknown_name_is_noop() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let presets = vec![Preset::new("card", "/a", "/b")];
    store.save(&presets).unwrap();

    store.delete("missing").unwrap();

    assert_eq!(store.load().unwrap(), presets);
}

#[test]
fn test_load_drops_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    fs::write(
        store.path(),
        "card|src::/a|dst::/b\n\
         \n\
         garbage\n\
         half|src::/only\n\
         bad|src=/a|dst=/b\n\
         |src::/x|dst::/y\n\
         ssd|src::/c|dst::/d\n",
    )
    .unwrap();

    assert_eq!(
        store.load().unwrap(),
        vec![
            Preset::new("card", "/a", "/b"),
            Preset::new("ssd", "/c", "/d"),
        ]
    );
}

#[test]
fn test_load_unreadable_store_is_error() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be cannot be read as text.
    let store = PresetStore::new(dir.path());

    assert!(matches!(store.load(), Err(StoreError::Io { .. })));
}
