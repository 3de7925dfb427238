use super::*;

fn sample_identity() -> Identity {
    Identity {
        user_id: 42,
        access_token: "tok-access".to_owned(),
        refresh_token: "tok-refresh".to_owned(),
    }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_round_trips_values() {
    let store = MemoryStore::default();
    store.set("k", "v");
    assert_eq!(store.get("k"), Some("v".to_owned()));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

// =============================================================
// Identity persistence
// =============================================================

#[test]
fn identity_round_trips_through_store() {
    let store = MemoryStore::default();
    store.store_identity(&sample_identity());
    assert_eq!(store.identity(), Ok(sample_identity()));
}

#[test]
fn identity_missing_token_is_auth_missing() {
    let store = MemoryStore::default();
    store.set("userId", "42");
    // No accessToken/refreshToken stored.
    assert_eq!(store.identity(), Err(ClientError::AuthMissing));
}

#[test]
fn identity_unparseable_user_id_is_auth_missing() {
    let store = MemoryStore::default();
    store.store_identity(&sample_identity());
    store.set("userId", "not-a-number");
    assert_eq!(store.identity(), Err(ClientError::AuthMissing));
}

#[test]
fn clear_identity_removes_all_keys() {
    let store = MemoryStore::default();
    store.store_identity(&sample_identity());
    store.clear_identity();
    assert_eq!(store.get("userId"), None);
    assert_eq!(store.get("accessToken"), None);
    assert_eq!(store.get("refreshToken"), None);
    assert_eq!(store.identity(), Err(ClientError::AuthMissing));
}

#[test]
fn empty_store_is_auth_missing() {
    let store = MemoryStore::default();
    assert_eq!(store.identity(), Err(ClientError::AuthMissing));
}
