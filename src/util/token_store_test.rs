use super::*;

fn change(key: Option<&str>, old: Option<&str>, new: Option<&str>) -> StorageChange {
    StorageChange {
        area: StorageArea::Local,
        key: key.map(str::to_owned),
        old_value: old.map(str::to_owned),
        new_value: new.map(str::to_owned),
    }
}

// =============================================================
// StorageChange
// =============================================================

#[test]
fn removal_of_token_key_is_detected() {
    assert!(change(Some("auth_token"), Some("t"), None).is_token_removal("auth_token"));
}

#[test]
fn insertion_is_not_a_removal() {
    assert!(!change(Some("auth_token"), None, Some("t")).is_token_removal("auth_token"));
    assert!(!change(Some("auth_token"), Some("t1"), Some("t2")).is_token_removal("auth_token"));
}

#[test]
fn other_keys_are_ignored() {
    assert!(!change(Some("theme"), Some("dark"), None).is_token_removal("auth_token"));
}

#[test]
fn whole_store_clear_counts_as_removal() {
    assert!(change(None, None, None).is_token_removal("auth_token"));
}

#[test]
fn session_storage_changes_are_ignored() {
    let cleared = StorageChange { area: StorageArea::Session, ..change(None, None, None) };
    assert!(!cleared.is_token_removal("auth_token"));
    let removed = StorageChange { area: StorageArea::Session, ..change(Some("auth_token"), Some("t"), None) };
    assert!(!removed.is_token_removal("auth_token"));
}

// =============================================================
// MemoryTokenStore
// =============================================================

#[test]
fn set_get_remove_round_trip() {
    let store = MemoryTokenStore::new("auth_token");
    assert_eq!(store.get(), None);
    store.set("t-1").unwrap();
    assert_eq!(store.get().as_deref(), Some("t-1"));
    store.remove();
    assert_eq!(store.get(), None);
}

#[test]
fn tabs_share_one_slot() {
    let tab_a = MemoryTokenStore::new("auth_token");
    let tab_b = tab_a.open_tab();
    tab_a.set("t-1").unwrap();
    assert_eq!(tab_b.get().as_deref(), Some("t-1"));
    assert_eq!(tab_b.key(), "auth_token");
}

#[test]
fn changes_are_delivered_to_other_tabs_only() {
    let tab_a = MemoryTokenStore::new("auth_token");
    let tab_b = tab_a.open_tab();
    let mut seen_by_a = tab_a.watch();
    let mut seen_by_b = tab_b.watch();

    tab_a.set("t-1").unwrap();
    tab_a.remove();

    assert_eq!(seen_by_b.try_recv().unwrap(), change(Some("auth_token"), None, Some("t-1")));
    assert_eq!(seen_by_b.try_recv().unwrap(), change(Some("auth_token"), Some("t-1"), None));
    assert!(seen_by_a.try_recv().is_err());
}

#[test]
fn unchanged_writes_do_not_notify() {
    let tab_a = MemoryTokenStore::new("auth_token");
    let tab_b = tab_a.open_tab();
    let mut seen_by_b = tab_b.watch();
    tab_a.remove();
    assert!(seen_by_b.try_recv().is_err());
}
