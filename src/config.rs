// src/config.rs
// =============================================================================
// Settings for one audit run.
//
// Every limit the audit enforces lives here instead of in module-level
// constants, so the CLI (and tests) can build one value and hand it down
// through extraction, probing and reporting.
// =============================================================================

use std::time::Duration;

/// User agent attached to the page fetch and to every probe
pub const DEFAULT_USER_AGENT: &str = concat!("link-auditor/", env!("CARGO_PKG_VERSION"));

/// Timeout and redirect budget for one kind of probe request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTier {
    pub timeout: Duration,
    pub max_redirects: usize,
}

/// How a single link is probed: HEAD first, then GET as a second chance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub head: ProbeTier,
    pub get: ProbeTier,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            head: ProbeTier {
                timeout: Duration::from_secs(5),
                max_redirects: 5,
            },
            get: ProbeTier {
                timeout: Duration::from_secs(3),
                max_redirects: 3,
            },
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Links past this many (in document order) are not probed
    pub max_links: usize,
    /// Broken links past this many are left out of the report
    pub max_reported: usize,
    /// Budget for downloading the audited page itself
    pub page_timeout: Duration,
    pub probe: ProbeConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_links: 50,
            max_reported: 20,
            page_timeout: Duration::from_secs(10),
            probe: ProbeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_limits() {
        let config = AuditConfig::default();
        assert_eq!(config.max_links, 50);
        assert_eq!(config.max_reported, 20);
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert_eq!(config.probe.head.timeout, Duration::from_secs(5));
        assert_eq!(config.probe.head.max_redirects, 5);
        assert_eq!(config.probe.get.timeout, Duration::from_secs(3));
        assert_eq!(config.probe.get.max_redirects, 3);
        assert!(config.probe.user_agent.starts_with("link-auditor/"));
    }
}
