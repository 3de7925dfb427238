#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::util::session_store::Identity;

/// Authentication state tracking the signed-in identity.
///
/// `loading` is true while the identity is being restored from the session
/// store on startup, so guarded pages don't redirect prematurely.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl AuthState {
    /// User id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<i64> {
        self.identity.as_ref().map(|i| i.user_id)
    }
}
