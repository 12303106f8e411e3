//! Internet-connectivity probes.
//!
//! Three independent probes answer "does this host reach the wide-area
//! network": an HTTP fetch of the public IP from an echo endpoint, an ICMP
//! latency measurement against a well-known beacon, and a read of the OS
//! resolver configuration. They run concurrently under a single join
//! barrier, and their failures stay isolated from one another: a dead
//! probe degrades its own report field and nothing else.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tracing::debug;

use crate::error::{NetscopeError, Result};

/// Public-IP echo endpoint answering over IPv4 only.
const PUBLIC_IP_URL_V4: &str = "https://api.ipify.org?format=text";
/// Dual-stack echo endpoint; reports the IPv6 address when one is routable.
const PUBLIC_IP_URL_DUAL: &str = "https://api64.ipify.org?format=text";
/// Latency beacon (Cloudflare public resolver).
const LATENCY_BEACON: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1));
/// Timeout for the public-IP HTTP fetch.
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
/// Echo requests per latency measurement.
const ECHO_COUNT: u32 = 3;

/// Placeholder rendered for a report field whose probe failed.
pub const UNAVAILABLE: &str = "N/A";

/// Nameservers as reported by the OS resolver subsystem.
///
/// "Readable but empty" and "unreadable" are different findings and keep
/// distinct display forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsServers {
    /// At least one nameserver is configured.
    Detected(Vec<String>),
    /// The resolver configuration was readable but lists no nameservers.
    NoneFound,
    /// The resolver subsystem could not be queried at all.
    Undetectable,
}

impl fmt::Display for DnsServers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected(servers) => write!(f, "{}", servers.join(", ")),
            Self::NoneFound => write!(f, "No DNS servers found"),
            Self::Undetectable => write!(f, "Unable to detect"),
        }
    }
}

/// Merged outcome of the three connectivity probes.
///
/// Built exactly once per invocation, after every probe has finished.
/// Field presence is independent: each `None` means only that its own
/// probe failed.
#[derive(Debug, Clone)]
pub struct ConnectivityReport {
    /// Public IP as reported by the echo endpoint.
    pub public_ip: Option<String>,
    /// Average round-trip time to the latency beacon.
    pub ping_latency: Option<Duration>,
    /// Nameservers from the OS resolver configuration.
    pub dns_servers: DnsServers,
}

impl ConnectivityReport {
    /// Merge the probe outcomes, absorbing failures into absent fields.
    pub fn from_parts(
        public_ip: Result<String>,
        ping_latency: Result<Duration>,
        dns_servers: DnsServers,
    ) -> Self {
        let public_ip = match public_ip {
            Ok(ip) => Some(ip),
            Err(e) => {
                debug!(target: "horizon_netscope_core::probe", "public IP probe failed: {e}");
                None
            }
        };
        let ping_latency = match ping_latency {
            Ok(rtt) => Some(rtt),
            Err(e) => {
                debug!(target: "horizon_netscope_core::probe", "latency probe failed: {e}");
                None
            }
        };
        Self {
            public_ip,
            ping_latency,
            dns_servers,
        }
    }

    /// Public IP for display, with the unavailable placeholder.
    pub fn public_ip_display(&self) -> String {
        self.public_ip.clone().unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// Beacon round-trip time for display, with the unavailable placeholder.
    pub fn ping_display(&self) -> String {
        match self.ping_latency {
            Some(rtt) => format!("{rtt:?}"),
            None => UNAVAILABLE.to_string(),
        }
    }

    /// Nameserver list for display.
    pub fn dns_display(&self) -> String {
        self.dns_servers.to_string()
    }
}

/// Runs the three internet-reachability probes.
///
/// The production endpoints are compiled in; the builder-style setters
/// exist so tests can aim the HTTP probe at a local server or move the
/// latency beacon off the real network.
#[derive(Debug, Clone)]
pub struct ConnectivityProber {
    public_ip_url_v4: String,
    public_ip_url_dual: String,
    latency_beacon: IpAddr,
    http_timeout: Duration,
}

impl Default for ConnectivityProber {
    fn default() -> Self {
        Self {
            public_ip_url_v4: PUBLIC_IP_URL_V4.to_string(),
            public_ip_url_dual: PUBLIC_IP_URL_DUAL.to_string(),
            latency_beacon: LATENCY_BEACON,
            http_timeout: HTTP_TIMEOUT,
        }
    }
}

impl ConnectivityProber {
    /// Create a prober against the production endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect the public-IP probe at different echo endpoints.
    pub fn with_public_ip_urls(mut self, v4: impl Into<String>, dual: impl Into<String>) -> Self {
        self.public_ip_url_v4 = v4.into();
        self.public_ip_url_dual = dual.into();
        self
    }

    /// Move the latency beacon.
    pub fn with_latency_beacon(mut self, beacon: IpAddr) -> Self {
        self.latency_beacon = beacon;
        self
    }

    /// Change the public-IP fetch timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Run all three probes concurrently and merge their outcomes.
    ///
    /// Never fails as a whole. The probes share nothing but the join
    /// barrier: no cancellation between them, no retries, and the caller
    /// waits for the slowest probe before the merged report exists.
    pub async fn probe_all(&self, include_ipv6: bool) -> ConnectivityReport {
        let (public_ip, ping_latency, dns_servers) = tokio::join!(
            self.fetch_public_ip(include_ipv6),
            ping_host(self.latency_beacon),
            async { read_dns_servers() },
        );
        ConnectivityReport::from_parts(public_ip, ping_latency, dns_servers)
    }

    /// Fetch the public IP from the echo endpoint.
    ///
    /// `include_ipv6` selects the dual-stack endpoint, which prefers the
    /// IPv6 address when the host can route one. Non-2xx statuses are
    /// failures; the body is trimmed of endpoint framing whitespace.
    async fn fetch_public_ip(&self, include_ipv6: bool) -> Result<String> {
        let url = if include_ipv6 {
            &self.public_ip_url_dual
        } else {
            &self.public_ip_url_v4
        };
        let client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(|e| NetscopeError::Probe(format!("HTTP client setup: {e}")))?;
        let response = client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| NetscopeError::Probe(format!("public IP fetch: {e}")))?;
        let body = response
            .text()
            .await
            .map_err(|e| NetscopeError::Probe(format!("public IP body: {e}")))?;
        Ok(body.trim().to_string())
    }
}

/// Average round-trip time over three ICMP echoes to `addr`.
///
/// Shared by the internet latency probe and the gateway ping. Any failed
/// echo fails the whole measurement; the per-echo timeout is surge-ping's
/// built-in default. Raw sockets may require elevated privileges, which
/// surfaces here as a socket error.
pub async fn ping_host(addr: IpAddr) -> Result<Duration> {
    let config = match addr {
        IpAddr::V4(_) => Config::default(),
        IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
    };
    let client = Client::new(&config)
        .map_err(|e| NetscopeError::Probe(format!("ICMP socket: {e}")))?;
    let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
    let payload = [0u8; 56];
    let mut total = Duration::ZERO;
    for seq in 0..ECHO_COUNT {
        let (_reply, rtt) = pinger
            .ping(PingSequence(seq as u16), &payload)
            .await
            .map_err(|e| NetscopeError::Probe(format!("echo {seq} to {addr}: {e}")))?;
        total += rtt;
    }
    Ok(round_to_micros(total / ECHO_COUNT))
}

/// Round a duration to whole microseconds, half up.
fn round_to_micros(rtt: Duration) -> Duration {
    Duration::from_micros(((rtt.as_nanos() + 500) / 1_000) as u64)
}

/// Read the nameservers out of the OS resolver configuration.
///
/// The system configuration lists each server once per transport, so
/// duplicate addresses collapse, preserving first-seen order.
fn read_dns_servers() -> DnsServers {
    match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _opts)) => {
            let mut servers: Vec<String> = Vec::new();
            for name_server in config.name_servers() {
                let ip = name_server.socket_addr.ip().to_string();
                if !servers.contains(&ip) {
                    servers.push(ip);
                }
            }
            if servers.is_empty() {
                DnsServers::NoneFound
            } else {
                DnsServers::Detected(servers)
            }
        }
        Err(e) => {
            debug!(target: "horizon_netscope_core::probe", "resolver config unreadable: {e}");
            DnsServers::Undetectable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_all_success() {
        let report = ConnectivityReport::from_parts(
            Ok("203.0.113.7".to_string()),
            Ok(Duration::from_micros(8_250)),
            DnsServers::Detected(vec!["192.168.1.1".to_string()]),
        );
        assert_eq!(report.public_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(report.ping_latency, Some(Duration::from_micros(8_250)));
        assert_eq!(report.dns_display(), "192.168.1.1");
    }

    #[test]
    fn test_from_parts_public_ip_failure_is_isolated() {
        let report = ConnectivityReport::from_parts(
            Err(NetscopeError::Probe("connection refused".to_string())),
            Ok(Duration::from_millis(12)),
            DnsServers::Detected(vec!["1.1.1.1".to_string()]),
        );
        assert_eq!(report.public_ip, None);
        assert_eq!(report.public_ip_display(), "N/A");
        assert_eq!(report.ping_latency, Some(Duration::from_millis(12)));
        assert_eq!(report.dns_display(), "1.1.1.1");
    }

    #[test]
    fn test_from_parts_latency_failure_is_isolated() {
        let report = ConnectivityReport::from_parts(
            Ok("203.0.113.7".to_string()),
            Err(NetscopeError::Probe("echo timed out".to_string())),
            DnsServers::Detected(vec!["1.1.1.1".to_string()]),
        );
        assert_eq!(report.ping_latency, None);
        assert_eq!(report.ping_display(), "N/A");
        assert_eq!(report.public_ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_dns_sentinels_are_distinct() {
        assert_eq!(DnsServers::NoneFound.to_string(), "No DNS servers found");
        assert_eq!(DnsServers::Undetectable.to_string(), "Unable to detect");
    }

    #[test]
    fn test_dns_detected_joins_with_commas() {
        let servers = DnsServers::Detected(vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()]);
        assert_eq!(servers.to_string(), "8.8.8.8, 8.8.4.4");
    }

    #[test]
    fn test_ping_display_uses_duration_formatting() {
        let report = ConnectivityReport::from_parts(
            Ok("198.51.100.7".to_string()),
            Ok(Duration::from_micros(12_345)),
            DnsServers::NoneFound,
        );
        assert_eq!(report.ping_display(), "12.345ms");
    }

    #[test]
    fn test_round_to_micros_half_up() {
        assert_eq!(round_to_micros(Duration::from_nanos(1_499)), Duration::from_micros(1));
        assert_eq!(round_to_micros(Duration::from_nanos(1_500)), Duration::from_micros(2));
        assert_eq!(round_to_micros(Duration::from_nanos(2_000)), Duration::from_micros(2));
    }
}
