//! Error types for the willow advisor.

/// Errors that can occur while configuring or calling the advisor.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Configuration is invalid or incomplete.
    #[error("advisor config error: {message}")]
    Config {
        /// Description of the error.
        message: String,
    },

    /// A prompt template failed to load or render.
    #[error("template error: {source}")]
    Template {
        /// The underlying template error.
        #[from]
        source: minijinja::Error,
    },

    /// The HTTP call failed before a response arrived.
    #[error("{backend} request failed: {source}")]
    Request {
        /// Backend name.
        backend: &'static str,
        /// The underlying HTTP error.
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{backend} returned {status}: {body}")]
    Status {
        /// Backend name.
        backend: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, if readable.
        body: String,
    },

    /// The response did not contain advice text.
    #[error("{backend} response missing {path}")]
    MalformedResponse {
        /// Backend name.
        backend: &'static str,
        /// JSON path that was expected.
        path: &'static str,
    },
}
