// src/audit/page.rs
// =============================================================================
// Downloads the page being audited.
//
// Unlike link probes, this request is all-or-nothing: if the page can't be
// fetched, or answers with anything but 2xx, the audit stops here.
// =============================================================================

use reqwest::Client;
use tracing::info;
use url::Url;

use crate::config::AuditConfig;
use crate::error::AuditError;

/// Builds the client used for the page fetch
pub fn page_client(config: &AuditConfig) -> Result<Client, AuditError> {
    Client::builder()
        .timeout(config.page_timeout)
        .user_agent(config.probe.user_agent.as_str())
        .build()
        .map_err(AuditError::Client)
}

// Fetches a web page and returns its HTML content
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, AuditError> {
    let request_error = |source: reqwest::Error| AuditError::PageRequest {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuditError::PageStatus {
            url: url.to_string(),
            status,
        });
    }

    let html = response.text().await.map_err(request_error)?;
    info!(url = %url, bytes = html.len(), "fetched page");
    Ok(html)
}
