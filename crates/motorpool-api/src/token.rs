// Shared bearer-token slot
//
// The session layer writes the token after login and clears it on logout;
// the client re-reads it on every call, so requests always reflect the
// latest credential without rebuilding the client.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};

/// Shared, externally updatable bearer-token slot.
///
/// Cheap to clone; all clones observe the same token.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<SecretString>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh token (after login or registration).
    pub fn set(&self, token: SecretString) {
        *self.inner.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the stored token (logout).
    pub fn clear(&self) {
        *self.inner.write().expect("token lock poisoned") = None;
    }

    /// Whether a token is currently held.
    pub fn is_set(&self) -> bool {
        self.inner.read().expect("token lock poisoned").is_some()
    }

    /// Render the `Authorization` header value.
    ///
    /// An absent token yields `"Bearer "`: the platform treats a missing
    /// credential as an empty one and answers 401, so the decision stays
    /// server-side.
    pub(crate) fn bearer_header(&self) -> String {
        let guard = self.inner.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => format!("Bearer {}", token.expose_secret()),
            None => "Bearer ".to_owned(),
        }
    }
}
