//! Error handling for the search-index boundary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Failed to decode a JSON response from the service
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// An error occurred while processing the request.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl QueryError {
    pub async fn from_response(response: reqwest::Response) -> QueryError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        QueryError::Http { status, message }
    }
}
