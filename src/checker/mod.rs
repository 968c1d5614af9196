// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules, in the order an audit uses them:
// - html: Extracts and classifies the links on a page
// - http: Probes one link (HEAD, then GET as a fallback)
// - dispatch: Probes a page's links concurrently under a cap
// - report: Turns outcomes into the final audit result
// - link: The shared data types
// =============================================================================

mod dispatch;
mod html;
mod http;
mod link;
mod report;

// Re-export the public API so callers can write `checker::dispatch()`
pub use dispatch::dispatch;
pub use html::extract_html_links;
pub use http::Prober;
pub use link::TRANSPORT_FAILURE;
pub use report::{summarize, AuditResult, PageFacts};
