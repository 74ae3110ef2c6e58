//! External IP resolution
//!
//! One GET against a plain-text IP echo endpoint (f13rce.net/ip.php,
//! api.ipify.org, icanhazip.com, ...). No retries.

use std::time::Duration;

use tracing::{debug, trace};
use ureq::Agent;

use super::build_agent;
use crate::errors::{MapIpError, Result};

/// Longest body accepted from an echo endpoint
const MAX_BODY_LEN: usize = 256;

/// Source of the machine's public IP address
pub trait ExternalIpSource {
    fn fetch(&self) -> Result<String>;

    /// Source name (for logging)
    fn name(&self) -> &'static str;
}

/// Resolves the public IP by asking an HTTP echo endpoint
pub struct HttpIpResolver {
    agent: Agent,
    endpoint: String,
}

impl HttpIpResolver {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            endpoint: endpoint.to_string(),
        }
    }
}

impl ExternalIpSource for HttpIpResolver {
    fn fetch(&self) -> Result<String> {
        trace!("Requesting external IP from {}", self.endpoint);

        let resp = self.agent.get(&self.endpoint).call().map_err(|e| {
            let err = MapIpError::from(e);
            MapIpError::network(format!(
                "cannot reach IP endpoint {}: {}",
                self.endpoint,
                err.message()
            ))
        })?;

        let body = resp.into_body().read_to_string().map_err(|e| {
            MapIpError::network(format!(
                "failed to read response from {}: {}",
                self.endpoint, e
            ))
        })?;

        let ip = parse_ip_body(&body).ok_or_else(|| {
            MapIpError::network(format!(
                "IP endpoint {} returned an unusable response",
                self.endpoint
            ))
        })?;

        debug!("External IP is {}", ip);
        Ok(ip)
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}

/// Uses a caller-supplied address (`--ip`) instead of asking the network
pub struct FixedIp(pub String);

impl ExternalIpSource for FixedIp {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "Fixed"
    }
}

/// One-off resolution against `endpoint`
pub fn fetch_external_ip(endpoint: &str, timeout: Duration) -> Result<String> {
    HttpIpResolver::new(endpoint, timeout).fetch()
}

/// Trim the echo body. Empty, oversized or multi-line bodies are rejected.
fn parse_ip_body(body: &str) -> Option<String> {
    let ip = body.trim();
    if ip.is_empty() || ip.len() > MAX_BODY_LEN || ip.contains(char::is_whitespace) {
        return None;
    }
    Some(ip.to_string())
}
