use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::fmt;

use crate::config::Config;

/// How a probe treats redirect responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowPolicy {
    /// Follow the redirect chain and report where it ended up.
    FollowRedirects,
    /// Report the 3xx status directly, with the `Location`-resolved URL.
    Manual,
}

/// What the origin answered: the resolved URL plus whatever status it
/// returned. 3xx/4xx/5xx are results here, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub final_url: String,
    pub status_code: u16,
}

/// Network-level probe failure (DNS, connect, TLS, timeout, malformed
/// response). The only failure condition a probe has; it never carries an
/// HTTP status.
#[derive(Debug, Clone)]
pub struct ProbeError {
    description: String,
}

impl ProbeError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl std::error::Error for ProbeError {}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        let description = std::error::Error::source(&err)
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string());
        Self { description }
    }
}

/// One HTTP GET against a target URL.
///
/// Implemented by the reqwest-backed prober in production and by scripted
/// fakes in tests.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str, policy: FollowPolicy)
    -> Result<ProbeOutcome, ProbeError>;
}

/// Probes URLs over the network with a shared connection pool per policy.
pub struct HttpProber {
    following: reqwest::Client,
    manual: reqwest::Client,
}

impl HttpProber {
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let timeout = config.timeout_duration();
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let following = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .user_agent(user_agent)
            .build()?;
        let manual = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(user_agent)
            .build()?;

        Ok(Self { following, manual })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(
        &self,
        url: &str,
        policy: FollowPolicy,
    ) -> Result<ProbeOutcome, ProbeError> {
        match policy {
            FollowPolicy::FollowRedirects => {
                let response = self.following.get(url).send().await?;
                Ok(ProbeOutcome {
                    final_url: response.url().to_string(),
                    status_code: response.status().as_u16(),
                })
            }
            FollowPolicy::Manual => {
                let response = self.manual.get(url).send().await?;
                let status_code = response.status().as_u16();
                let final_url = if response.status().is_redirection() {
                    match response
                        .headers()
                        .get(reqwest::header::LOCATION)
                        .and_then(|value| value.to_str().ok())
                    {
                        Some(location) => resolve_location(response.url(), location),
                        // 3xx without a Location header points nowhere else
                        None => response.url().to_string(),
                    }
                } else {
                    response.url().to_string()
                };
                Ok(ProbeOutcome {
                    final_url,
                    status_code,
                })
            }
        }
    }
}

/// Resolve a `Location` header value (absolute or relative) against the
/// URL that produced it.
fn resolve_location(base: &url::Url, location: &str) -> String {
    base.join(location)
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| location.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;

    fn test_config() -> Config {
        Config {
            timeout: Some(5), // 5 seconds for CI stability
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_location__absolute() {
        let base = url::Url::parse("https://example.com/a").unwrap();
        let resolved = resolve_location(&base, "https://other.com/b");
        assert_eq!(resolved, "https://other.com/b");
    }

    #[test]
    fn test_resolve_location__relative() {
        let base = url::Url::parse("https://example.com/a").unwrap();
        let resolved = resolve_location(&base, "/b");
        assert_eq!(resolved, "https://example.com/b");
    }

    #[test]
    fn test_probe_error__from_reqwest_keeps_description() {
        let err = ProbeError::new("connection refused");
        assert_eq!(err.description(), "connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_probe__reports_status_verbatim() {
        let mut server = Server::new_async().await;
        let _m = server.mock("GET", "/200").with_status(200).create();
        let endpoint = server.url() + "/200";

        let prober = HttpProber::from_config(&test_config()).unwrap();
        let outcome = prober
            .probe(&endpoint, FollowPolicy::Manual)
            .await
            .expect("probe failed");

        assert_eq!(outcome.status_code, 200);
        assert_eq!(outcome.final_url, endpoint);
    }

    #[tokio::test]
    async fn test_probe__manual_resolves_location_without_following() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create();
        let endpoint = server.url() + "/old";

        let prober = HttpProber::from_config(&test_config()).unwrap();
        let outcome = prober
            .probe(&endpoint, FollowPolicy::Manual)
            .await
            .expect("probe failed");

        assert_eq!(outcome.status_code, 301);
        assert_eq!(outcome.final_url, server.url() + "/new");
    }

    #[tokio::test]
    async fn test_probe__follow_policy_lands_on_final_url() {
        let mut server = Server::new_async().await;
        let _m_old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create();
        let _m_new = server.mock("GET", "/new").with_status(200).create();
        let endpoint = server.url() + "/old";

        let prober = HttpProber::from_config(&test_config()).unwrap();
        let outcome = prober
            .probe(&endpoint, FollowPolicy::FollowRedirects)
            .await
            .expect("probe failed");

        assert_eq!(outcome.status_code, 200);
        assert_eq!(outcome.final_url, server.url() + "/new");
    }

    #[tokio::test]
    async fn test_probe__network_failure_is_probe_error() {
        let config = Config {
            timeout: Some(1),
            ..Default::default()
        };
        let prober = HttpProber::from_config(&config).unwrap();

        // RFC 5737 TEST-NET-1 address, guaranteed unreachable
        let result = prober
            .probe("http://192.0.2.1:1/unreachable", FollowPolicy::Manual)
            .await;

        assert!(result.is_err());
    }
}
