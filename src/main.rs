// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (diagnostics go to stderr, the report to stdout)
// 3. Run the audit for the chosen subcommand
// 4. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
// =============================================================================

mod audit;
mod checker;
mod cli;
mod config;
mod error;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AuditArgs, Cli, Commands};
use tracing_subscriber::EnvFilter;

use checker::AuditResult;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise our own crate logs at info (or debug)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "link_auditor=debug" } else { "link_auditor=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = the page could not be audited
async fn run(cli: Cli) -> Result<i32> {
    let (result, options) = match cli.command {
        Commands::Page { url, options } => {
            let result = audit::audit_page(&url, &options.to_config())
                .await
                .context("Failed to check broken links")?;
            (result, options)
        }
        Commands::Html { file, base_url, options } => {
            let html = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let result = audit::audit_markup(&html, &base_url, &options.to_config())
                .await
                .context("Failed to check broken links")?;
            (result, options)
        }
    };

    print_result(&result, &options)?;

    if result.has_broken_links() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_result(result: &AuditResult, options: &AuditArgs) -> Result<()> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_table(result);
    }
    Ok(())
}

// Prints the broken links and a summary as a human-readable table
fn print_table(result: &AuditResult) {
    println!("🔍 Audited: {}", result.url);

    for warning in &result.warnings {
        println!("⚠️  {}", warning);
    }

    if !result.broken_links.is_empty() {
        println!();
        println!("{:<60} {:<15} {:<30}", "URL", "STATUS", "TEXT");
        println!("{}", "=".repeat(105));

        for link in &result.broken_links {
            let scope = if link.is_external { "external" } else { "internal" };
            println!(
                "{:<60} {:<15} {:<30}",
                truncate(&link.url, 57),
                format_status(link.status),
                format!("{} ({})", truncate(&link.text, 17), scope)
            );
        }

        let hidden = result.summary.broken_count - result.broken_links.len();
        if hidden > 0 {
            println!("... and {} more broken link(s)", hidden);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   🔗 Links on page: {}", result.total_links);
    println!(
        "   🏠 Internal: {}   🌐 External: {}",
        result.summary.internal_links, result.summary.external_links
    );
    println!("   ✅ Working: {}", result.working_links);
    println!("   ❌ Broken: {}", result.summary.broken_count);
    println!("   📈 Success rate: {}%", result.summary.success_rate);
}

fn format_status(status: u16) -> String {
    if status == checker::TRANSPORT_FAILURE {
        "❌ UNREACHABLE".to_string()
    } else {
        format!("❌ HTTP {}", status)
    }
}

// Shortens text for a fixed-width column, respecting char boundaries
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
