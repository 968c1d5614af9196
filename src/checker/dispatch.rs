// src/checker/dispatch.rs
// =============================================================================
// Runs the probes for one page.
//
// - Only the first `max_links` extracted links (document order) are checked
// - Every capped probe starts at once and we wait until all have settled
// - Identical URLs are probed once; every anchor still gets its own outcome
// - Results are put back in document order, never in completion order
//
// Each probe carries its own timeouts and always returns an outcome, so one
// slow or failing link can't stall or abort the others.
// =============================================================================

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info, warn};

use super::link::{CandidateLink, ExtractedLink, LinkOutcome, TRANSPORT_FAILURE};

/// Outcomes for the probed links plus any warning about the cap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// One outcome per checked link, in document order
    pub outcomes: Vec<LinkOutcome>,
    pub warnings: Vec<String>,
}

// Where a capped link's outcome comes from
enum Planned {
    Resolved(LinkOutcome),
    Probe {
        candidate: CandidateLink,
        probe_index: usize,
    },
}

/// Probes up to `max_links` links with `probe` and collects their outcomes.
///
/// `probe` is called once per distinct URL among the capped links.
pub async fn dispatch<F, Fut>(links: Vec<ExtractedLink>, max_links: usize, probe: F) -> Dispatched
where
    F: Fn(CandidateLink) -> Fut,
    Fut: Future<Output = LinkOutcome>,
{
    let total = links.len();
    let mut warnings = Vec::new();

    if total > max_links {
        warn!(total, max_links, "too many links on page, checking only the first ones");
        warnings.push(format!(
            "Only checking first {} links out of {} total links found.",
            max_links, total
        ));
    }

    // Map every capped link to a finished outcome or a slot in `unique`
    let mut unique: Vec<CandidateLink> = Vec::new();
    let mut probe_index_by_url: HashMap<String, usize> = HashMap::new();
    let plan: Vec<Planned> = links
        .into_iter()
        .take(max_links)
        .map(|link| match link {
            ExtractedLink::Malformed(outcome) => Planned::Resolved(outcome),
            ExtractedLink::Candidate(candidate) => {
                let probe_index = *probe_index_by_url
                    .entry(candidate.url.clone())
                    .or_insert_with(|| {
                        unique.push(candidate.clone());
                        unique.len() - 1
                    });
                Planned::Probe {
                    candidate,
                    probe_index,
                }
            }
        })
        .collect();

    info!(
        links = plan.len(),
        distinct_urls = unique.len(),
        "probing links"
    );

    // Launch every probe together; completion order is whatever the network
    // makes it, so each result carries its index back
    let mut statuses = vec![TRANSPORT_FAILURE; unique.len()];
    let concurrency = unique.len().max(1);
    let mut settled = stream::iter(unique.into_iter().enumerate())
        .map(|(index, candidate)| {
            let pending = probe(candidate);
            async move { (index, pending.await) }
        })
        .buffer_unordered(concurrency);

    while let Some((index, outcome)) = settled.next().await {
        debug!(url = %outcome.url, status = outcome.status, "probe settled");
        statuses[index] = outcome.status;
    }

    let outcomes = plan
        .into_iter()
        .map(|planned| match planned {
            Planned::Resolved(outcome) => outcome,
            Planned::Probe {
                candidate,
                probe_index,
            } => LinkOutcome {
                url: candidate.url,
                status: statuses[probe_index],
                text: candidate.text,
                is_external: candidate.is_external,
            },
        })
        .collect();

    Dispatched { outcomes, warnings }
}
