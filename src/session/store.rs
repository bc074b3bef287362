//! Wallet-session lifecycle
//!
//! Holds the current authenticated identity and the active provider handle.
//! One store exists per process, owned by the dashboard controller and passed
//! explicitly to whatever needs it. Lifecycle methods take `&mut self`, so
//! two restores or logins can never run concurrently.

use crate::auth::error::AuthError;
use crate::auth::{ProviderHandle, WalletAuth};
use std::sync::Arc;

/// Lifecycle states of the wallet session.
///
/// `Uninitialized → Restoring → { Active | Anonymous }`, and `Active →
/// Anonymous` on logout. The identity address and the provider handle live
/// together inside `Active`: one cannot exist without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Restoring,
    Active {
        address: String,
        provider: ProviderHandle,
    },
    Anonymous,
}

pub struct SessionStore {
    auth: Arc<dyn WalletAuth>,
    state: SessionState,
}

impl SessionStore {
    pub fn new(auth: Arc<dyn WalletAuth>) -> Self {
        Self {
            auth,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn identity_address(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn provider(&self) -> Option<&ProviderHandle> {
        match &self.state {
            SessionState::Active { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Restore a prior wallet session, if the auth service knows of one.
    ///
    /// Every failure along the way is non-fatal: the store logs it and lands
    /// in `Anonymous`, from where the user can still log in manually.
    pub async fn initialize(&mut self) {
        self.state = SessionState::Restoring;

        match self.auth.init_modal().await {
            Ok(Some(provider)) => match self.auth.resolve_address(&provider).await {
                Ok(address) => {
                    self.state = SessionState::Active { address, provider };
                }
                Err(e) => {
                    log::warn!("Account resolution failed during restore: {}", e);
                    self.state = SessionState::Anonymous;
                }
            },
            Ok(None) => {
                self.state = SessionState::Anonymous;
            }
            Err(e) => {
                log::warn!("Session restore failed: {}", e);
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Run the interactive connect flow and resolve the account identity.
    ///
    /// On success the store becomes `Active` and the resolved address is
    /// returned. On failure or cancellation the store is `Anonymous` and the
    /// error propagates to the caller for display only.
    pub async fn login(&mut self) -> Result<String, AuthError> {
        let provider = match self.auth.connect().await {
            Ok(provider) => provider,
            Err(e) => {
                self.state = SessionState::Anonymous;
                return Err(e);
            }
        };

        match self.auth.resolve_address(&provider).await {
            Ok(address) => {
                self.state = SessionState::Active {
                    address: address.clone(),
                    provider,
                };
                Ok(address)
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                Err(e)
            }
        }
    }

    /// Disconnect and drop the identity. The session is cleared even when
    /// the underlying disconnect call fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self.auth.disconnect().await {
            log::warn!("Disconnect failed, clearing session anyway: {}", e);
        }
        self.state = SessionState::Anonymous;
    }
}
