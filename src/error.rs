// src/error.rs
// =============================================================================
// Errors that abort a whole audit.
//
// Only failures around the source page itself end up here. Problems with an
// individual link (timeouts, DNS, TLS, 404s) are recorded as data in the
// audit result and never surface as an AuditError.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The page URL could not be parsed, so relative links can't be resolved
    #[error("invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page could not be retrieved at all (DNS, timeout, connection reset)
    #[error("failed to fetch {url}: {source}")]
    PageRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page answered, but not with a 2xx status
    #[error("failed to fetch {url}: HTTP {status}")]
    PageStatus { url: String, status: StatusCode },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
