//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, invalid URL, unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status. `message` is the backend's
    /// structured error message when the body carried one.
    #[error("Request failed with status {status}")]
    HttpStatus {
        status: u16,
        body: String,
        message: Option<String>,
    },
    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// The backend's own explanation of the failure, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
