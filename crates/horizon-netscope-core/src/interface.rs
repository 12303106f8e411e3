//! System interface snapshots.
//!
//! Wraps the OS enumeration primitives from `netdev` into owned snapshot
//! types the rest of the crate can reason about without touching the OS
//! again. A snapshot is taken once per invocation and never refreshed.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{NetscopeError, Result};

/// A network interface captured at snapshot time.
#[derive(Debug, Clone)]
pub struct SystemInterface {
    /// Interface name (e.g., "eth0", "en0", "Wi-Fi").
    pub name: String,
    /// Human-readable adapter description. Populated on Windows, usually
    /// empty elsewhere.
    pub description: String,
    /// MAC address, if available.
    pub mac_address: Option<MacAddress>,
    /// IPv4 addresses bound to this interface.
    pub ipv4: Vec<Ipv4Binding>,
    /// IPv6 addresses bound to this interface.
    pub ipv6: Vec<Ipv6Binding>,
    /// Whether the interface is up.
    pub is_up: bool,
    /// Whether the OS marks this as the loopback interface.
    pub is_loopback: bool,
    /// OS interface index.
    pub index: u32,
}

impl SystemInterface {
    /// Take a snapshot of every interface the OS reports.
    ///
    /// `netdev` signals enumeration failure as an empty list. Any live
    /// system carries at least loopback, so an empty result is treated as
    /// a failure rather than an empty report.
    pub fn snapshot() -> Result<Vec<SystemInterface>> {
        let interfaces = netdev::get_interfaces();
        if interfaces.is_empty() {
            return Err(NetscopeError::Enumeration(
                "the OS returned no network interfaces".to_string(),
            ));
        }
        Ok(interfaces.into_iter().map(SystemInterface::from_netdev).collect())
    }

    fn from_netdev(iface: netdev::Interface) -> Self {
        let ipv4 = iface
            .ipv4
            .iter()
            .map(|net| Ipv4Binding {
                address: net.addr(),
                prefix_len: net.prefix_len(),
                netmask: prefix_to_netmask(net.prefix_len()),
            })
            .collect();
        let ipv6 = iface
            .ipv6
            .iter()
            .map(|net| Ipv6Binding {
                address: net.addr(),
                prefix_len: net.prefix_len(),
            })
            .collect();
        Self {
            name: iface.name.clone(),
            description: iface.description.clone().unwrap_or_default(),
            mac_address: iface.mac_addr.map(|mac| MacAddress::new(mac.octets())),
            ipv4,
            ipv6,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
            index: iface.index,
        }
    }

    /// Bound addresses in CIDR display form, IPv4 before IPv6.
    pub fn display_addresses(&self, include_ipv6: bool) -> Vec<String> {
        let mut addresses: Vec<String> = self
            .ipv4
            .iter()
            .map(|binding| format!("{}/{}", binding.address, binding.prefix_len))
            .collect();
        if include_ipv6 {
            addresses.extend(
                self.ipv6
                    .iter()
                    .map(|binding| format!("{}/{}", binding.address, binding.prefix_len)),
            );
        }
        addresses
    }

    /// Whether any address at all is bound to this interface.
    pub fn has_addresses(&self) -> bool {
        !self.ipv4.is_empty() || !self.ipv6.is_empty()
    }
}

/// An IPv4 address bound to an interface, with its derived netmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Binding {
    /// The IPv4 address.
    pub address: Ipv4Addr,
    /// Network prefix length.
    pub prefix_len: u8,
    /// Dotted-quad netmask derived from the prefix length.
    pub netmask: Ipv4Addr,
}

/// An IPv6 address bound to an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Binding {
    /// The IPv6 address.
    pub address: Ipv6Addr,
    /// Network prefix length.
    pub prefix_len: u8,
}

/// MAC (hardware) address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Create a new MAC address from bytes.
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Default gateway as reported by the OS routing table.
#[derive(Debug, Clone)]
pub struct GatewayInfo {
    /// Gateway IP address. IPv4 preferred when the OS reports both.
    pub ip_address: IpAddr,
    /// Gateway MAC address, if known.
    pub mac_address: Option<MacAddress>,
}

/// Discover the default gateway, when the OS knows one.
///
/// A gateway entry carrying no address at all is treated as absent.
pub fn default_gateway() -> Option<GatewayInfo> {
    netdev::get_default_gateway().ok().and_then(|gateway| {
        let ip_address = gateway
            .ipv4
            .first()
            .copied()
            .map(IpAddr::V4)
            .or_else(|| gateway.ipv6.first().copied().map(IpAddr::V6))?;
        Some(GatewayInfo {
            ip_address,
            mac_address: Some(MacAddress::new(gateway.mac_addr.octets())),
        })
    })
}

/// Derive a dotted-quad netmask from a CIDR prefix length.
fn prefix_to_netmask(prefix_len: u8) -> Ipv4Addr {
    if prefix_len >= 32 {
        Ipv4Addr::new(255, 255, 255, 255)
    } else if prefix_len == 0 {
        Ipv4Addr::new(0, 0, 0, 0)
    } else {
        let mask = !((1u32 << (32 - prefix_len)) - 1);
        Ipv4Addr::from(mask.to_be_bytes())
    }
}

#[cfg(test)]
impl SystemInterface {
    /// Bare-bones interface for tests: a name and one optional IPv4 binding.
    pub(crate) fn mock(name: &str, ipv4: Option<(Ipv4Addr, u8)>) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            mac_address: None,
            ipv4: ipv4
                .map(|(address, prefix_len)| Ipv4Binding {
                    address,
                    prefix_len,
                    netmask: prefix_to_netmask(prefix_len),
                })
                .into_iter()
                .collect(),
            ipv6: Vec::new(),
            is_up: true,
            is_loopback: false,
            index: 0,
        }
    }
}
