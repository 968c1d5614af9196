// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is declared as Rust structs and
// enums, and clap generates the parsing, --help and --version for us.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AuditConfig, ProbeConfig, ProbeTier, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "link-auditor",
    version,
    about = "Audit a web page's links for broken targets",
    long_about = "link-auditor fetches one page, checks every link on it concurrently \
                  and reports which ones are broken. It exits with 1 when broken links \
                  are found, so it fits in CI pipelines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print debug diagnostics (per-link probe details) to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a page and check its links
    ///
    /// Example: link-auditor page https://example.com --json
    Page {
        /// Page URL, including http:// or https://
        #[arg(value_parser = parse_http_url)]
        url: String,

        #[command(flatten)]
        options: AuditArgs,
    },

    /// Check the links in a local HTML file
    ///
    /// Example: link-auditor html build/index.html --base-url https://example.com/
    Html {
        /// HTML file to read
        file: PathBuf,

        /// URL the file is served from; relative links resolve against it
        #[arg(long, value_parser = parse_http_url)]
        base_url: String,

        #[command(flatten)]
        options: AuditArgs,
    },
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Output the audit result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Maximum number of links to check
    #[arg(long, default_value_t = 50)]
    pub max_links: usize,

    /// Maximum number of broken links listed in the report
    #[arg(long, default_value_t = 20)]
    pub max_reported: usize,

    /// Timeout for the HEAD probe, in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub head_timeout_ms: u64,

    /// Timeout for the fallback GET probe, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub get_timeout_ms: u64,

    /// Timeout for fetching the page itself, in milliseconds
    #[arg(long, default_value_t = 10000)]
    pub page_timeout_ms: u64,

    /// User agent sent with every request
    #[arg(long, env = "LINK_AUDITOR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl AuditArgs {
    /// Builds the audit configuration; redirect limits are fixed per tier
    pub fn to_config(&self) -> AuditConfig {
        let defaults = ProbeConfig::default();
        AuditConfig {
            max_links: self.max_links,
            max_reported: self.max_reported,
            page_timeout: Duration::from_millis(self.page_timeout_ms),
            probe: ProbeConfig {
                head: ProbeTier {
                    timeout: Duration::from_millis(self.head_timeout_ms),
                    ..defaults.head
                },
                get: ProbeTier {
                    timeout: Duration::from_millis(self.get_timeout_ms),
                    ..defaults.get
                },
                user_agent: self.user_agent.clone(),
            },
        }
    }
}

// Accepts only absolute http:// or https:// URLs
fn parse_http_url(value: &str) -> Result<String, String> {
    let has_scheme = ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme));

    if has_scheme {
        Ok(value.to_string())
    } else {
        Err("Invalid URL format. Please include http:// or https://".to_string())
    }
}
