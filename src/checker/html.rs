// src/checker/html.rs
// =============================================================================
// This module turns a page's HTML into the list of links to check.
//
// We use the `scraper` crate to walk every <a href> in document order and the
// `url` crate to resolve each href against the page URL.
//
// For each anchor:
// - empty hrefs and #fragment / mailto: / tel: / javascript: hrefs are skipped
// - hrefs that can't be resolved become a broken outcome right away
// - everything else becomes a candidate, classified internal or external
//
// Rust concepts:
// - Enums with data: ExtractedLink is either a candidate or a finished outcome
// - Iterators: For collecting an element's text nodes
// =============================================================================

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::link::{CandidateLink, ExtractedLink, LinkOutcome, LinkTallies, TRANSPORT_FAILURE};

/// Warning added when a page has nothing worth probing
pub const NO_LINKS_WARNING: &str = "No links found on this page to check.";

/// Href prefixes that never point at something we can probe
const SKIPPED_PREFIXES: [&str; 4] = ["#", "mailto:", "tel:", "javascript:"];

/// Everything the extractor learned about a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Every <a> element carrying an href, skipped ones included
    pub total_anchors: usize,
    /// Qualifying hrefs in document order
    pub links: Vec<ExtractedLink>,
    pub tallies: LinkTallies,
    pub warnings: Vec<String>,
}

// Extracts the links to check from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links and for
//         deciding which links are external)
//
// Example:
//   html = "<a href='/docs'>Docs</a> <a href='mailto:me@x.org'>Mail</a>"
//   base = "https://example.com"
//   result.total_anchors = 2, result.links = [https://example.com/docs]
pub fn extract_html_links(html: &str, base: &Url) -> Extraction {
    let document = Html::parse_document(html);

    // The selector is a constant, so parsing can only fail on a typo here
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    let mut extraction = Extraction::default();

    for element in document.select(&selector) {
        extraction.total_anchors += 1;

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_checkable_href(href) {
            continue;
        }

        let text = element.text().collect::<String>().trim().to_string();

        match resolve_url(base, href) {
            Some(resolved) => {
                let is_external = resolved.host_str() != base.host_str();
                extraction.tallies.record(is_external);
                extraction.links.push(ExtractedLink::Candidate(CandidateLink {
                    url: resolved.to_string(),
                    text,
                    is_external,
                }));
            }
            None => {
                debug!(href, "could not resolve href, recording it as broken");
                extraction.links.push(ExtractedLink::Malformed(LinkOutcome {
                    url: href.to_string(),
                    status: TRANSPORT_FAILURE,
                    text,
                    is_external: false,
                }));
            }
        }
    }

    if extraction.links.is_empty() {
        extraction.warnings.push(NO_LINKS_WARNING.to_string());
    }

    extraction
}

// Checks whether an href is worth resolving at all
//
// The prefixes are compared on the raw attribute value, case-sensitively.
fn is_checkable_href(href: &str) -> bool {
    !href.is_empty() && !SKIPPED_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"             -> Some("https://example.com/docs")
//   href = "../other"          -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "http://[bad"       -> None (invalid host)
//   href = "ht!tp://bad"       -> None (invalid scheme)
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    if has_malformed_scheme(href) {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => base.join(href).ok(),
    }
}

// Detects hrefs that look like "scheme://..." but whose scheme isn't legal
//
// URL joining would quietly treat "ht!tp://bad" as a relative path under the
// page, which hides an obviously mistyped link.
fn has_malformed_scheme(href: &str) -> bool {
    let Some(end) = href.find("://") else {
        return false;
    };
    let scheme = href[..end].trim_start();

    // A '/', '?', '#' or '=' before "://" means it sits inside a path,
    // query or parameter value ("go=https://x")
    if scheme.is_empty() || scheme.contains(['/', '?', '#', '=']) {
        return false;
    }

    !is_valid_scheme(scheme)
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
