//! Terminal rendering.
//!
//! The interface table and the one-line summary boxes are comfy-table
//! tables. The default-route row is highlighted through cell styling
//! rather than raw escape codes so column widths stay honest.

use std::time::Duration;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use horizon_netscope_core::{ConnectivityReport, DefaultRouteInfo, GatewayInfo, InterfaceReport};

/// Placeholder for a value the resolver could not determine.
const UNDETERMINED: &str = "could not determine";

/// Print the interface/address table.
///
/// The default-route row renders bold green. Virtual names get a
/// `(virtual)` annotation only while virtual interfaces are hidden; the
/// only virtual rows still present then belong to the default route.
pub fn print_interface_table(report: &InterfaceReport, show_virtual: bool) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Interface").add_attribute(Attribute::Bold),
        Cell::new("Address").add_attribute(Attribute::Bold),
        Cell::new("MAC").add_attribute(Attribute::Bold),
    ]);

    for (index, record) in report.records.iter().enumerate() {
        let name = if record.is_virtual && !show_virtual {
            format!("{} (virtual)", record.name)
        } else {
            record.name.clone()
        };
        let mut row = vec![
            Cell::new(name),
            Cell::new(&record.address),
            Cell::new(&record.mac_address),
        ];
        if report.default_index == Some(index) {
            row = row
                .into_iter()
                .map(|cell| cell.fg(Color::Green).add_attribute(Attribute::Bold))
                .collect();
        }
        table.add_row(row);
    }

    println!("{table}");
}

/// Print the gateway and subnet summary boxes.
///
/// Both always print; an unresolved value degrades to a placeholder
/// rather than suppressing the box.
pub fn print_gateway_summary(
    gateway: Option<&GatewayInfo>,
    default_route: Option<&DefaultRouteInfo>,
    gateway_ping: Option<Duration>,
) {
    let gateway_text = match gateway {
        Some(info) => match gateway_ping {
            Some(rtt) => format!("Gateway: {} ({rtt:?})", info.ip_address),
            None => format!("Gateway: {}", info.ip_address),
        },
        None => format!("Gateway: {UNDETERMINED}"),
    };
    let subnet_text = match default_route {
        Some(route) => format!("Subnet Mask: {}", route.subnet_mask),
        None => format!("Subnet Mask: {UNDETERMINED}"),
    };
    println!("{}", boxed(&gateway_text));
    println!("{}", boxed(&subnet_text));
}

/// Print the internet-connectivity summary boxes.
pub fn print_connectivity_summary(report: &ConnectivityReport) {
    println!();
    println!("{}", boxed(&format!("Public IP: {}", report.public_ip_display())));
    println!("{}", boxed(&format!("Internet Ping: {}", report.ping_display())));
    println!("{}", boxed(&format!("DNS: {}", report.dns_display())));
}

/// A one-line bordered box.
fn boxed(content: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.add_row(vec![Cell::new(content)]);
    table
}
