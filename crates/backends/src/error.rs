/// Errors from a processing backend.
///
/// The runner translates every variant into the `Processing` taxonomy
/// kind; the message survives verbatim into the HTTP error body.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request to the service failed (network, DNS, TLS).
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Backend error ({status}): {body}")]
    Service {
        /// HTTP status code returned by the service.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// The service answered 2xx but the body was not in the expected shape.
    #[error("Malformed backend response: {0}")]
    Malformed(String),

    /// Reading or writing a local artifact failed.
    #[error("Backend I/O error: {0}")]
    Io(#[from] std::io::Error),
}
