use thiserror::Error;

use crate::envelope::Envelope;

/// Top-level error type for the `motorpool-api` crate.
///
/// Covers every failure mode of a platform call: transport, authentication,
/// envelope-level rejection, and payload decoding. `motorpool-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The platform rejected the bearer token (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, malformed
    /// URL reaching the request builder, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Platform API ────────────────────────────────────────────────
    /// The response envelope signalled failure (`"status": "error"`).
    ///
    /// The full envelope is retained so callers can inspect `message`,
    /// `data`, and any extra fields the platform attached.
    #[error("Request failed: {message}")]
    RequestFailed {
        message: String,
        envelope: Envelope,
        /// HTTP status the envelope arrived on (`None` when the platform
        /// put a failure envelope on a success status).
        status: Option<u16>,
    },

    /// Non-success HTTP status without a decodable failure envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates missing or rejected
    /// credentials and re-authentication might resolve it.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::RequestFailed {
                status: Some(404), ..
            } => true,
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The failure envelope, when the platform returned one.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Self::RequestFailed { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}
