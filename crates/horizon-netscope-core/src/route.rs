//! Default-route resolution.
//!
//! Answers two questions for the gateway summary and the interface table:
//! which interface carries the default route, and what IPv4 subnet mask is
//! bound to it. The OS lookup and the snapshot scan are separate steps so
//! the scan stays testable against constructed snapshots.

use tracing::debug;

use crate::error::{NetscopeError, Result};
use crate::interface::SystemInterface;

/// The interface carrying the default route, with its IPv4 subnet mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRouteInfo {
    /// Name of the default-route interface.
    pub interface_name: String,
    /// Dotted-quad subnet mask of its first IPv4 binding.
    pub subnet_mask: String,
}

/// Resolve the default route from live OS state.
///
/// Fails with [`NetscopeError::Resolution`] when the OS reports no default
/// route, when the reported interface is missing from the snapshot, or
/// when that interface has no IPv4 binding. On failure there is no mask to
/// report; callers must not substitute a made-up one.
pub fn resolve() -> Result<DefaultRouteInfo> {
    let default = netdev::get_default_interface()
        .map_err(|e| NetscopeError::Resolution(format!("no default route: {e}")))?;
    debug!(
        target: "horizon_netscope_core::route",
        "default route runs through {}", default.name
    );
    let snapshot = SystemInterface::snapshot()
        .map_err(|e| NetscopeError::Resolution(e.to_string()))?;
    resolve_from(&default.name, &snapshot)
}

/// Pick the named interface out of a snapshot and derive its subnet mask.
pub fn resolve_from(
    interface_name: &str,
    snapshot: &[SystemInterface],
) -> Result<DefaultRouteInfo> {
    let iface = snapshot
        .iter()
        .find(|iface| iface.name == interface_name)
        .ok_or_else(|| {
            NetscopeError::Resolution(format!(
                "default interface {interface_name} is not in the snapshot"
            ))
        })?;
    let binding = iface.ipv4.first().ok_or_else(|| {
        NetscopeError::Resolution(format!(
            "no IPv4 address bound to default interface {interface_name}"
        ))
    })?;
    Ok(DefaultRouteInfo {
        interface_name: interface_name.to_string(),
        subnet_mask: binding.netmask.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::interface::Ipv4Binding;

    #[test]
    fn test_resolve_from_default_interface() {
        let snapshot = vec![
            SystemInterface::mock("lo", Some((Ipv4Addr::new(127, 0, 0, 1), 8))),
            SystemInterface::mock("eth0", Some((Ipv4Addr::new(10, 0, 0, 5), 24))),
        ];
        let info = resolve_from("eth0", &snapshot).expect("should resolve");
        assert_eq!(
            info,
            DefaultRouteInfo {
                interface_name: "eth0".to_string(),
                subnet_mask: "255.255.255.0".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_from_missing_interface() {
        let snapshot = vec![SystemInterface::mock("eth0", None)];
        let err = resolve_from("wlan0", &snapshot).unwrap_err();
        assert!(matches!(err, NetscopeError::Resolution(_)));
    }

    #[test]
    fn test_resolve_from_interface_without_ipv4() {
        let snapshot = vec![SystemInterface::mock("eth0", None)];
        let err = resolve_from("eth0", &snapshot).unwrap_err();
        assert!(matches!(err, NetscopeError::Resolution(_)));
    }

    #[test]
    fn test_resolve_from_uses_first_ipv4_binding() {
        let mut iface = SystemInterface::mock("eth0", Some((Ipv4Addr::new(192, 168, 1, 10), 16)));
        iface.ipv4.push(Ipv4Binding {
            address: Ipv4Addr::new(10, 0, 0, 5),
            prefix_len: 24,
            netmask: Ipv4Addr::new(255, 255, 255, 0),
        });
        let info = resolve_from("eth0", &[iface]).expect("should resolve");
        assert_eq!(info.subnet_mask, "255.255.0.0");
    }
}
