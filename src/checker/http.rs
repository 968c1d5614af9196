// src/checker/http.rs
// =============================================================================
// This module checks whether a single URL is alive.
//
// Strategy (fixed order):
// 1. HEAD request (no body download), 5s timeout, up to 5 redirects
// 2. If HEAD never got a status line back, GET with 3s timeout, 3 redirects
// 3. If GET fails the same way, the link gets status 0
//
// Any HTTP status, including 404 or 405, is a successful probe. Only
// transport-level failures (timeout, DNS, TLS, refused connection, redirect
// overflow) trigger the fallback.
//
// Rust concepts:
// - async/await: Each probe waits on the network without blocking others
// - Clients: reqwest::Client pools connections, so we build two once
//   (one per tier) and reuse them for every link
// =============================================================================

use reqwest::{redirect::Policy, Client};
use tracing::debug;

use super::link::{CandidateLink, LinkOutcome, TRANSPORT_FAILURE};
use crate::config::{ProbeConfig, ProbeTier};
use crate::error::AuditError;

/// Probes links with the two-tier HEAD-then-GET strategy
#[derive(Debug, Clone)]
pub struct Prober {
    head_client: Client,
    get_client: Client,
}

impl Prober {
    /// Builds one client per tier so each carries its own timeout and
    /// redirect limit
    pub fn new(config: &ProbeConfig) -> Result<Self, AuditError> {
        Ok(Self {
            head_client: build_client(&config.head, &config.user_agent)?,
            get_client: build_client(&config.get, &config.user_agent)?,
        })
    }

    /// Resolves one candidate to exactly one outcome. Never fails.
    pub async fn probe(&self, candidate: CandidateLink) -> LinkOutcome {
        let status = match self.head_client.head(&candidate.url).send().await {
            Ok(response) => response.status().as_u16(),
            Err(head_error) => {
                debug!(
                    url = %candidate.url,
                    reason = categorize_error(&head_error),
                    "HEAD probe failed, retrying with GET"
                );
                // The response is dropped unread: the status line is all we need
                match self.get_client.get(&candidate.url).send().await {
                    Ok(response) => response.status().as_u16(),
                    Err(get_error) => {
                        debug!(
                            url = %candidate.url,
                            reason = categorize_error(&get_error),
                            "GET probe failed, link unreachable"
                        );
                        TRANSPORT_FAILURE
                    }
                }
            }
        };

        LinkOutcome {
            url: candidate.url,
            status,
            text: candidate.text,
            is_external: candidate.is_external,
        }
    }
}

fn build_client(tier: &ProbeTier, user_agent: &str) -> Result<Client, AuditError> {
    Client::builder()
        .timeout(tier.timeout)
        .redirect(redirect_policy(tier.max_redirects))
        .user_agent(user_agent)
        .build()
        .map_err(AuditError::Client)
}

// Follows up to `max_redirects` hops
//
// reqwest's `previous()` list includes the original URL, so `Policy::limited(n)`
// gives up on the n-th redirect. The +1 makes the n-th hop allowed.
fn redirect_policy(max_redirects: usize) -> Policy {
    Policy::limited(max_redirects + 1)
}

// Puts a reqwest error into a short, loggable category
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - A URL reqwest refuses to send (e.g. ftp:)
fn categorize_error(error: &reqwest::Error) -> &'static str {
    let error_string = error.to_string().to_lowercase();

    if error.is_timeout() {
        "timeout"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_builder() {
        "unsupported url"
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "dns error"
        } else {
            "connection failed"
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "tls error"
    } else {
        "transport error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Short budgets so timeout tests finish quickly
    fn fast_config() -> ProbeConfig {
        ProbeConfig {
            head: ProbeTier {
                timeout: Duration::from_millis(300),
                max_redirects: 5,
            },
            get: ProbeTier {
                timeout: Duration::from_millis(300),
                max_redirects: 3,
            },
            user_agent: "link-auditor-test/1.0".to_string(),
        }
    }

    fn candidate(url: String) -> CandidateLink {
        CandidateLink {
            url,
            text: "Link".to_string(),
            is_external: true,
        }
    }

    #[tokio::test]
    async fn test_head_success_skips_get() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("{}/ok", server.uri()))).await;

        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.text, "Link");
        assert!(outcome.is_external);
        assert!(!outcome.is_broken());
    }

    #[tokio::test]
    async fn test_method_not_allowed_is_a_result_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(server.uri())).await;

        assert_eq!(outcome.status, 405);
        assert!(outcome.is_broken());
    }

    #[tokio::test]
    async fn test_not_found_is_reported_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(server.uri())).await;
        assert_eq!(outcome.status, 404);
    }

    #[tokio::test]
    async fn test_head_timeout_falls_back_to_get() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(server.uri())).await;
        assert_eq!(outcome.status, 204);
    }

    #[tokio::test]
    async fn test_both_tiers_time_out() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(server.uri())).await;
        assert_eq!(outcome.status, TRANSPORT_FAILURE);
        assert!(outcome.is_broken());
    }

    #[tokio::test]
    async fn test_redirect_overflow_falls_back_to_get() {
        let server = MockServer::start().await;
        // HEAD loops forever; GET answers directly
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("{}/loop", server.uri()))).await;
        assert_eq!(outcome.status, 200);
    }

    // Serves `/{prefix}0 -> /{prefix}1 -> ... -> /{prefix}{hops}` for `verb`,
    // with the last hop answering 200
    async fn mount_redirect_chain(server: &MockServer, verb: &str, prefix: &str, hops: usize) {
        for hop in 0..hops {
            Mock::given(method(verb))
                .and(path(format!("/{prefix}{hop}")))
                .respond_with(
                    ResponseTemplate::new(302).insert_header("location", format!("/{prefix}{}", hop + 1)),
                )
                .mount(server)
                .await;
        }
        Mock::given(method(verb))
            .and(path(format!("/{prefix}{hops}")))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    // HEAD never answers, so only the GET tier's redirect budget matters
    async fn mount_hanging_head(server: &MockServer) {
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_head_follows_exactly_five_redirects() {
        let server = MockServer::start().await;
        mount_redirect_chain(&server, "HEAD", "h", 5).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(0)
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("{}/h0", server.uri()))).await;
        assert_eq!(outcome.status, 200);
    }

    #[tokio::test]
    async fn test_get_follows_exactly_three_redirects() {
        let server = MockServer::start().await;
        mount_hanging_head(&server).await;
        mount_redirect_chain(&server, "GET", "g", 3).await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("{}/g0", server.uri()))).await;
        assert_eq!(outcome.status, 200);
    }

    #[tokio::test]
    async fn test_get_refuses_fourth_redirect() {
        let server = MockServer::start().await;
        mount_hanging_head(&server).await;
        mount_redirect_chain(&server, "GET", "g", 4).await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("{}/g0", server.uri()))).await;
        assert_eq!(outcome.status, TRANSPORT_FAILURE);
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_failure() {
        // Bind then drop a listener to get a port nobody is listening on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(format!("http://127.0.0.1:{port}/"))).await;
        assert_eq!(outcome.status, TRANSPORT_FAILURE);
    }

    #[tokio::test]
    async fn test_non_http_scheme_is_transport_failure() {
        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate("ftp://example.com/file".to_string())).await;
        assert_eq!(outcome.status, TRANSPORT_FAILURE);
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(header("user-agent", "link-auditor-test/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let prober = Prober::new(&fast_config()).unwrap();
        let outcome = prober.probe(candidate(server.uri())).await;
        assert_eq!(outcome.status, 200);
    }
}
