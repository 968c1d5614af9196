// src/audit/mod.rs
// =============================================================================
// Runs a complete audit of one page:
//
//   fetch page -> extract links -> probe (capped, concurrent) -> summarize
//
// Only a failure to fetch the page (or to set up HTTP clients) is an error.
// Everything that goes wrong with individual links ends up in the result.
// =============================================================================

mod page;

use tracing::info;
use url::Url;

use crate::checker::{self, AuditResult, PageFacts, Prober};
use crate::config::AuditConfig;
use crate::error::AuditError;

pub use page::{fetch_page, page_client};

/// Fetches `url` and audits every link on it
pub async fn audit_page(url: &str, config: &AuditConfig) -> Result<AuditResult, AuditError> {
    let base = Url::parse(url).map_err(|source| AuditError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let client = page_client(config)?;
    let html = fetch_page(&client, &base).await?;

    audit_resolved(&html, url, &base, config).await
}

/// Audits links in already-downloaded HTML, resolving them against `base_url`
pub async fn audit_markup(
    html: &str,
    base_url: &str,
    config: &AuditConfig,
) -> Result<AuditResult, AuditError> {
    let base = Url::parse(base_url).map_err(|source| AuditError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })?;

    audit_resolved(html, base_url, &base, config).await
}

// `url` is reported back exactly as the caller gave it; `base` is its parsed form
async fn audit_resolved(
    html: &str,
    url: &str,
    base: &Url,
    config: &AuditConfig,
) -> Result<AuditResult, AuditError> {
    let prober = Prober::new(&config.probe)?;

    let extraction = checker::extract_html_links(html, base);
    info!(
        anchors = extraction.total_anchors,
        qualifying = extraction.links.len(),
        internal = extraction.tallies.internal,
        external = extraction.tallies.external,
        "extracted links"
    );

    let dispatched = checker::dispatch(extraction.links, config.max_links, |candidate| {
        prober.probe(candidate)
    })
    .await;

    let mut warnings = extraction.warnings;
    warnings.extend(dispatched.warnings);

    let page = PageFacts {
        url: url.to_string(),
        total_anchors: extraction.total_anchors,
        tallies: extraction.tallies,
    };

    Ok(checker::summarize(
        page,
        dispatched.outcomes,
        warnings,
        config.max_reported,
    ))
}
