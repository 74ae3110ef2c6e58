//! Network-facing services: external IP resolution and GeoIP lookup

pub mod geoip;
pub mod resolver;

use std::time::Duration;

use ureq::Agent;

pub use geoip::{GeoIpLookup, GeoIpProvider, GeoLocation};
pub use resolver::{ExternalIpSource, FixedIp, HttpIpResolver, fetch_external_ip};

/// Build a blocking HTTP agent with a global per-request timeout.
///
/// Non-2xx responses surface as `ureq::Error::StatusCode`.
pub(crate) fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}
