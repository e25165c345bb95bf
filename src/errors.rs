//! Error taxonomy for the squashmatrix.com client.
//!
//! Every failure a public operation can surface is one of these variants.
//! There is no retry machinery behind them: a classified error is surfaced
//! (or converted to [`Outcome::Suppressed`](crate::client::Outcome) when the
//! client was built with `suppress_errors`) exactly once.

use thiserror::Error;

/// Failures surfaced by session handling, request dispatch and parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The login handshake did not yield a valid, non-expired auth cookie.
    ///
    /// Carries either one of the fixed handshake messages from
    /// [`crate::constants`] or the site's own validation messages joined
    /// with `", "`.
    #[error("authorization failed: {0}")]
    AuthorizationFailed(String),

    /// The origin rejected the request as forbidden (HTTP 409 with the
    /// forbidden body marker).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The origin throttled the request (HTTP 409 with the rate-limit body
    /// marker). Anonymous sessions hit this considerably sooner.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The requested entity page was empty or malformed beyond recognition.
    #[error("entity not found")]
    NotFound,

    /// Unclassified non-success response; carries the raw body for
    /// diagnostics.
    #[error("unexpected response (status {status}): {body}")]
    Unknown { status: u16, body: String },

    /// The operation deadline elapsed, anywhere in the pipeline including a
    /// nested re-authentication handshake.
    #[error("request timed out")]
    TimedOut,

    /// The HTTP transport failed before a status code was available.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client construction options violated an invariant, e.g. both a player
    /// id and an email were supplied.
    #[error("invalid client options: {0}")]
    InvalidOptions(String),
}
