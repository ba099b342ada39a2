//! Tests for theme resolution, selection, and OS preference changes.

use strictly_lobby::{
    MemoryPreferenceStore, PreferenceStore, THEME_KEY, Theme, ThemeController,
};

fn store_with(value: Option<&str>) -> MemoryPreferenceStore {
    let mut store = MemoryPreferenceStore::new();
    if let Some(value) = value {
        store.set(THEME_KEY, value).expect("Memory store write failed");
    }
    store
}

fn stored(controller: &ThemeController<MemoryPreferenceStore>) -> Option<String> {
    controller.store().get(THEME_KEY).expect("Memory store read failed")
}

#[test]
fn test_no_override_follows_os_dark() {
    let controller = ThemeController::new(store_with(None), Theme::Dark);
    assert_eq!(controller.effective_theme(), Theme::Dark);
    assert_eq!(controller.applied(), Theme::Dark);
    assert!(controller.classes().dark);
    assert!(!controller.classes().light);
}

#[test]
fn test_stored_override_wins_at_startup() {
    let controller = ThemeController::new(store_with(Some("light")), Theme::Dark);
    assert_eq!(controller.applied(), Theme::Light);
}

#[test]
fn test_corrupted_override_fails_open_to_light() {
    let controller = ThemeController::new(store_with(Some("solarized")), Theme::Dark);
    assert_eq!(controller.applied(), Theme::Light);
}

#[test]
fn test_empty_override_follows_os() {
    let controller = ThemeController::new(store_with(Some("")), Theme::Dark);
    assert_eq!(controller.applied(), Theme::Dark);
}

#[test]
fn test_select_differs_from_os_persists_then_matching_clears() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);

    controller.select(Theme::Light).expect("Select failed");
    assert_eq!(controller.applied(), Theme::Light);
    assert_eq!(stored(&controller).as_deref(), Some("light"));

    controller.select(Theme::Dark).expect("Select failed");
    assert_eq!(controller.applied(), Theme::Dark);
    assert_eq!(stored(&controller), None);
}

#[test]
fn test_toggle_twice_returns_to_original() {
    let mut controller = ThemeController::new(store_with(None), Theme::Light);
    let original = controller.applied();

    let first = controller.toggle().expect("Toggle failed");
    assert_eq!(first, original.opposite());
    assert_eq!(controller.applied(), original.opposite());

    controller.toggle().expect("Toggle failed");
    assert_eq!(controller.applied(), original);
    assert_eq!(stored(&controller), None);
}

#[test]
fn test_toggle_reads_applied_theme_not_store() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);
    controller.apply(Theme::Light);

    controller.toggle().expect("Toggle failed");

    assert_eq!(controller.applied(), Theme::Dark);
}

#[test]
fn test_os_change_applies_without_override() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);

    controller.observe_os_preference(Theme::Light);

    assert_eq!(controller.os_preference(), Theme::Light);
    assert_eq!(controller.applied(), Theme::Light);
}

#[test]
fn test_os_change_ignored_with_override() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);
    controller.select(Theme::Light).expect("Select failed");

    controller.observe_os_preference(Theme::Light);
    controller.observe_os_preference(Theme::Dark);

    assert_eq!(controller.applied(), Theme::Light);
    assert_eq!(stored(&controller).as_deref(), Some("light"));
}

#[test]
fn test_override_matching_new_os_default_is_tolerated() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);
    controller.select(Theme::Light).expect("Select failed");

    // OS flips to match the override; the stale entry stays until the next select.
    controller.observe_os_preference(Theme::Light);

    assert_eq!(stored(&controller).as_deref(), Some("light"));
    assert_eq!(controller.effective_theme(), Theme::Light);
}

#[test]
fn test_apply_is_idempotent() {
    let mut controller = ThemeController::new(store_with(None), Theme::Dark);
    controller.apply(Theme::Light);
    let once = controller.classes();
    controller.apply(Theme::Light);
    assert_eq!(controller.classes(), once);
    assert!(once.contains("theme-light"));
    assert!(!once.contains("theme-dark"));
}
