//! Error type for API calls.

/// Error returned when an API call could not produce a usable response.
///
/// A non-2xx status is *not* an error at this level: the response is handed
/// back to the caller, which decides what the status means.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Failed to serialize request data.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to deserialize response data.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The request never produced a response (network failure, CORS, ...).
    #[error("Request error: {0}")]
    Request(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Deserialization(e.to_string())
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl From<gloo_net::Error> for ClientError {
    fn from(e: gloo_net::Error) -> Self {
        ClientError::Request(e.to_string())
    }
}
