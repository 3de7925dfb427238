use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_identity() {
    let state = AuthState::default();
    assert!(state.identity.is_none());
    assert_eq!(state.user_id(), None);
}

#[test]
fn auth_state_default_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
}

#[test]
fn user_id_reads_through_identity() {
    let state = AuthState {
        identity: Some(Identity {
            user_id: 7,
            access_token: "a".to_owned(),
            refresh_token: "r".to_owned(),
        }),
        loading: false,
    };
    assert_eq!(state.user_id(), Some(7));
}
