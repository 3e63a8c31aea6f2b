//! Theme flag persisted to a preferences file across restarts.

use marketiq::domain::theme::{Theme, ThemeFlag, ThemeMirror, THEME_STORAGE_KEY};
use marketiq::storage::{FileStore, KeyValueStore, PresentationMarker, SharedMarker};
use tokio_test::{assert_err, assert_ok};

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::new(dir.path().join(".marketiq").join("preferences.json"))
}

#[test]
fn test_first_run_double_toggle_restores_file_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(!store.path().exists());

    let mut flag = ThemeFlag::load(store.clone(), SharedMarker::new());
    assert_eq!(flag.theme(), Theme::Light);
    assert_eq!(assert_ok!(store.get(THEME_STORAGE_KEY)).as_deref(), Some("light"));
    let before = std::fs::read_to_string(store.path()).unwrap();

    assert_ok!(flag.toggle());
    assert_ok!(flag.toggle());
    assert_eq!(flag.theme(), Theme::Light);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_dark_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut flag = ThemeFlag::load(store_in(&dir), SharedMarker::new());
        assert_eq!(assert_ok!(flag.toggle()), Theme::Dark);
    }

    let marker = SharedMarker::new();
    let flag = ThemeFlag::load(store_in(&dir), marker.clone());
    assert_eq!(flag.theme(), Theme::Dark);
    assert_eq!(marker.current(), Some(Theme::Dark));
}

#[test]
fn test_double_toggle_restores_file_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set(THEME_STORAGE_KEY, "dark").unwrap();
    store.set("unrelated", "kept").unwrap();
    let original = std::fs::read_to_string(store.path()).unwrap();

    let mut flag = ThemeFlag::load(store.clone(), SharedMarker::new());
    flag.toggle().unwrap();
    assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("light"));
    flag.toggle().unwrap();

    assert_eq!(flag.theme(), Theme::Dark);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), original);
}

#[test]
fn test_unknown_stored_value_reads_as_light() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set(THEME_STORAGE_KEY, "solarized").unwrap();

    let flag = ThemeFlag::load(store.clone(), SharedMarker::new());
    assert_eq!(flag.theme(), Theme::Light);
    assert_eq!(assert_ok!(store.get(THEME_STORAGE_KEY)).as_deref(), Some("light"));
}

#[test]
fn test_corrupt_file_falls_back_to_light_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    let mut flag = ThemeFlag::load(store.clone(), SharedMarker::new());
    assert_eq!(flag.theme(), Theme::Light);

    assert_err!(flag.toggle());
    assert_eq!(flag.theme(), Theme::Light);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{not json");
}

#[test]
fn test_mirror_tracks_persisted_toggles() {
    let dir = tempfile::tempdir().unwrap();
    let mut flag = ThemeFlag::load(store_in(&dir), SharedMarker::new());
    let mirror = ThemeMirror::attach(&mut flag);

    flag.toggle().unwrap();
    assert_eq!(mirror.theme(), Theme::Dark);
    flag.toggle().unwrap();
    assert_eq!(mirror.theme(), Theme::Light);
}
