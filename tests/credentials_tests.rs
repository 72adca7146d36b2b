use omnisumma::credentials::{resolve_api_key, CredentialError};
use omnisumma::CredentialStore;

#[test]
fn set_get_clear() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open(dir.path().join("db")).unwrap();

    assert_eq!(store.get().unwrap(), None);
    store.set("  sk-test-123  ").unwrap();
    assert_eq!(store.get().unwrap(), Some("sk-test-123".to_string()));

    assert!(store.clear().unwrap());
    assert!(!store.clear().unwrap());
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn empty_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open(dir.path().join("db")).unwrap();

    assert!(matches!(store.set("   "), Err(CredentialError::Empty)));
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn key_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db");
    {
        let store = CredentialStore::open(&path).unwrap();
        store.set("sk-persisted").unwrap();
    }
    let store = CredentialStore::open(&path).unwrap();
    assert_eq!(store.get().unwrap(), Some("sk-persisted".to_string()));
}

#[test]
fn configured_key_wins_over_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open(dir.path().join("db")).unwrap();
    store.set("sk-stored").unwrap();

    assert_eq!(
        resolve_api_key(Some("sk-config"), Some(&store)),
        Some("sk-config".to_string())
    );
    assert_eq!(
        resolve_api_key(None, Some(&store)),
        Some("sk-stored".to_string())
    );
}
