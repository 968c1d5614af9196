// src/checker/link.rs
// =============================================================================
// The values that flow through an audit:
//
//   extract -> ExtractedLink (candidate or already-broken href)
//   probe   -> LinkOutcome (one per extracted link, in document order)
//   report  -> AuditResult (see report.rs)
// =============================================================================

use serde::{Deserialize, Serialize};

/// Status recorded when no HTTP status line was ever received
/// (DNS failure, timeout, TLS error, refused connection, unresolvable href)
pub const TRANSPORT_FAILURE: u16 = 0;

/// An href that resolved to an absolute URL and still needs probing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute URL after resolving the href against the page URL
    pub url: String,
    /// Trimmed text content of the anchor (may be empty)
    pub text: String,
    /// True when the URL's host differs from the page's host
    pub is_external: bool,
}

/// The result of checking one link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOutcome {
    pub url: String,
    /// HTTP status code, or TRANSPORT_FAILURE
    pub status: u16,
    pub text: String,
    pub is_external: bool,
}

impl LinkOutcome {
    /// A link is broken when it couldn't be reached or answered with 4xx/5xx.
    ///
    /// Anything else that produced a status line counts as working,
    /// including 1xx and 3xx codes.
    pub fn is_broken(&self) -> bool {
        self.status == TRANSPORT_FAILURE || self.status >= 400
    }
}

/// One qualifying href, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedLink {
    /// Resolved fine; the dispatcher will probe it
    Candidate(CandidateLink),
    /// Could not be resolved; already recorded as broken with status 0
    Malformed(LinkOutcome),
}

/// Internal/external counts over every resolvable qualifying href
///
/// Malformed hrefs are not part of either count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTallies {
    pub internal: usize,
    pub external: usize,
}

impl LinkTallies {
    pub fn record(&mut self, is_external: bool) {
        if is_external {
            self.external += 1;
        } else {
            self.internal += 1;
        }
    }
}
