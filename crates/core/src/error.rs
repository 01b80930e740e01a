/// Domain error taxonomy for the gateway.
///
/// Every failure visible over HTTP maps to exactly one of these kinds:
/// `InvalidInput` becomes 400, `PayloadTooLarge` becomes 413, and
/// `Processing` becomes 500 with the backend's message surfaced as-is.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request is malformed: missing file, empty filename, disallowed
    /// extension, missing text/prompt, unknown tool name.
    #[error("{0}")]
    InvalidInput(String),

    /// The uploaded payload exceeds the configured size bound.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// A processing backend failed. The message is surfaced verbatim in
    /// the HTTP error body.
    #[error("{0}")]
    Processing(String),
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidInput`] with an owned message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
