//! Admin session context.
//!
//! The stored credential is modeled as an explicit object handed to the
//! UI at construction, not as ambient storage access: [`Session`] owns
//! the in-memory token and delegates persistence to a [`TokenStore`].
//! Production wires in the keyring-backed store from `stagepass-config`;
//! tests substitute [`MemoryTokenStore`].

use std::sync::{Arc, Mutex, RwLock};

use secrecy::SecretString;
use thiserror::Error;
use tracing::{info, warn};

/// Failure talking to the persistent credential store.
#[derive(Debug, Error)]
#[error("credential store error: {0}")]
pub struct StoreError(pub String);

/// Persistence seam for the admin bearer token.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any. Absence is not an error.
    fn load(&self) -> Option<SecretString>;

    /// Persist a token, replacing any previous one.
    fn save(&self, token: &SecretString) -> Result<(), StoreError>;

    /// Remove the stored token. Clearing an absent token succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// The administrator's session: current token + persistent store.
///
/// Interior-mutable so fetch tasks can invalidate it concurrently with
/// the UI thread reading it; all methods take `&self`.
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<SecretString>>,
}

impl Session {
    /// Create a session, loading any previously stored credential.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        Self {
            store,
            token: RwLock::new(token),
        }
    }

    /// Whether a credential is currently held.
    pub fn authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }

    /// Snapshot of the current token.
    pub fn token(&self) -> Option<SecretString> {
        self.token.read().expect("session lock poisoned").clone()
    }

    /// Store a new credential (login). The in-memory token is set only
    /// after the store accepts it.
    pub fn login(&self, token: SecretString) -> Result<(), StoreError> {
        self.store.save(&token)?;
        *self.token.write().expect("session lock poisoned") = Some(token);
        info!("admin session established");
        Ok(())
    }

    /// Hold a credential for this run only, without persisting it.
    ///
    /// Used for tokens sourced from an env var or config file, which the
    /// session must not silently copy into its own store.
    pub fn adopt(&self, token: SecretString) {
        *self.token.write().expect("session lock poisoned") = Some(token);
    }

    /// Discard the credential, in memory and in the store.
    ///
    /// Called on explicit logout and whenever the backend answers
    /// 401/403. Store failures are logged, not propagated -- the
    /// in-memory token is gone either way and the UI must re-login.
    pub fn invalidate(&self) {
        *self.token.write().expect("session lock poisoned") = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored credential");
        }
        info!("admin session invalidated");
    }
}

/// In-memory [`TokenStore`] for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<SecretString> {
        self.token.lock().expect("store lock poisoned").clone()
    }

    fn save(&self, token: &SecretString) -> Result<(), StoreError> {
        *self.token.lock().expect("store lock poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}
