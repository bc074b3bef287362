//! Error handling for the wallet-auth boundary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// A prior session could not be restored.
    #[error("Session restore failed: {0}")]
    Restore(String),

    /// The user cancelled or never completed the interactive connect flow.
    #[error("Login cancelled")]
    Cancelled,

    /// The auth service failed to tear down the session. The local session is
    /// cleared regardless.
    #[error("Disconnect failed: {0}")]
    Disconnect(String),

    /// A provider handle could not be resolved to an account address.
    #[error("Account resolution failed: {0}")]
    AccountResolution(String),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// An error occurred while processing the request.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl AuthError {
    pub async fn from_response(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        AuthError::Http { status, message }
    }
}
