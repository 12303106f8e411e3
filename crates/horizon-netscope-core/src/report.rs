//! Interface report assembly.
//!
//! Couples the snapshot, the classifier, and the default-route result
//! into the rows the presentation layer renders. Assembly never fails: a
//! missing default route only means no row gets the highlight.

use crate::classify::is_virtual_interface;
use crate::interface::SystemInterface;
use crate::route::DefaultRouteInfo;

/// Which addresses and interfaces the report includes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include IPv6 addresses.
    pub show_ipv6: bool,
    /// Include virtual interfaces beyond the default-route one.
    pub show_virtual: bool,
}

/// One row of the interface table: a single address bound to an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Owning interface name.
    pub name: String,
    /// The bound address in CIDR form.
    pub address: String,
    /// MAC address of the owning interface; empty when unknown.
    pub mac_address: String,
    /// Whether the owning interface carries the default route.
    pub is_default: bool,
    /// Whether the owning interface classified as virtual.
    pub is_virtual: bool,
}

/// Interface rows in OS enumeration order.
#[derive(Debug, Clone, Default)]
pub struct InterfaceReport {
    /// One record per kept interface/address pair.
    pub records: Vec<InterfaceRecord>,
    /// Index of the default-route row to highlight, when one exists.
    pub default_index: Option<usize>,
}

/// Assemble the interface report from a snapshot.
///
/// Interfaces with no addresses produce no rows. A virtual interface that
/// carries the default route is always kept, whatever `show_virtual`
/// says, and stays flagged virtual so presentation can annotate it. When
/// the default interface owns several rows the highlight tracks the last
/// one.
pub fn build_report(
    snapshot: &[SystemInterface],
    default_route: Option<&DefaultRouteInfo>,
    options: &ReportOptions,
) -> InterfaceReport {
    let default_name = default_route.map(|route| route.interface_name.as_str());
    let mut report = InterfaceReport::default();
    for iface in snapshot {
        if !iface.has_addresses() {
            continue;
        }
        let is_default = default_name == Some(iface.name.as_str());
        let is_virtual = is_virtual_interface(&iface.name, &iface.description);
        if is_virtual && !is_default && !options.show_virtual {
            continue;
        }
        let mac_address = iface
            .mac_address
            .map(|mac| mac.to_string())
            .unwrap_or_default();
        for address in iface.display_addresses(options.show_ipv6) {
            if is_default {
                report.default_index = Some(report.records.len());
            }
            report.records.push(InterfaceRecord {
                name: iface.name.clone(),
                address,
                mac_address: mac_address.clone(),
                is_default,
                is_virtual,
            });
        }
    }
    report
}
