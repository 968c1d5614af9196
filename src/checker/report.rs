// src/checker/report.rs
// =============================================================================
// Reduces probe outcomes into the audit result shown to the user.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::link::{LinkOutcome, LinkTallies};

/// The full result of auditing one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// The audited page
    pub url: String,
    /// Every <a href> on the page, before skipping or capping
    pub total_links: usize,
    pub working_links: usize,
    /// Broken links in document order, cut to the report limit
    pub broken_links: Vec<LinkOutcome>,
    pub warnings: Vec<String>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub internal_links: usize,
    pub external_links: usize,
    /// All broken links that were probed, not just the reported ones
    pub broken_count: usize,
    /// Percentage of probed links that work, 100 when nothing was probed
    pub success_rate: u8,
}

impl AuditResult {
    pub fn has_broken_links(&self) -> bool {
        self.summary.broken_count > 0
    }
}

/// Everything the aggregator needs besides the outcomes themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFacts {
    pub url: String,
    pub total_anchors: usize,
    pub tallies: LinkTallies,
}

pub fn summarize(
    page: PageFacts,
    outcomes: Vec<LinkOutcome>,
    warnings: Vec<String>,
    max_reported: usize,
) -> AuditResult {
    let (mut broken, working): (Vec<_>, Vec<_>) =
        outcomes.into_iter().partition(LinkOutcome::is_broken);

    let broken_count = broken.len();
    let working_links = working.len();
    broken.truncate(max_reported);

    AuditResult {
        url: page.url,
        total_links: page.total_anchors,
        working_links,
        broken_links: broken,
        warnings,
        summary: Summary {
            internal_links: page.tallies.internal,
            external_links: page.tallies.external,
            broken_count,
            success_rate: success_rate(working_links, broken_count),
        },
    }
}

fn success_rate(working: usize, broken: usize) -> u8 {
    let checked = working + broken;
    if checked == 0 {
        return 100;
    }
    // Ratio is within [0, 1], so the rounded percentage fits in a u8
    ((working as f64 / checked as f64) * 100.0).round() as u8
}
