use crate::auth::error::AuthError;
use crate::environment::Environment;

pub(crate) mod client;
pub use client::WalletAuthClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Opaque handle to an active wallet connection, issued by the auth service.
/// Only the auth boundary looks inside it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProviderHandle {
    token: String,
}

impl ProviderHandle {
    pub(crate) fn new(token: String) -> Self {
        Self { token }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WalletAuth: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Restore a previously established wallet session, if one exists.
    /// `Ok(None)` means no prior session; errors mean the restore itself failed.
    async fn init_modal(&self) -> Result<Option<ProviderHandle>, AuthError>;

    /// Run the interactive connect flow. Suspends until the user completes
    /// or abandons it.
    async fn connect(&self) -> Result<ProviderHandle, AuthError>;

    /// Tear down the active wallet session.
    async fn disconnect(&self) -> Result<(), AuthError>;

    /// Resolve the primary account address for a provider handle.
    async fn resolve_address(&self, provider: &ProviderHandle) -> Result<String, AuthError>;
}
