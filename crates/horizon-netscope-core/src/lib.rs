//! Network diagnostic core for Horizon Netscope.
//!
//! Gathers a point-in-time picture of a host's network posture:
//!
//! - **Interface snapshot**: every interface with its addresses and MAC,
//!   classified as physical or virtual by name-pattern heuristics
//! - **Default route**: which interface carries the default route and the
//!   IPv4 subnet mask bound to it
//! - **Connectivity probes**: public IP, round-trip time to a well-known
//!   beacon, and the OS-configured DNS servers, probed concurrently
//!
//! # Building a report
//!
//! ```ignore
//! use horizon_netscope_core::{
//!     ConnectivityProber, ReportOptions, SystemInterface, build_report, route,
//! };
//!
//! let snapshot = SystemInterface::snapshot()?;
//! let default_route = route::resolve().ok();
//! let options = ReportOptions { show_ipv6: false, show_virtual: false };
//! let report = build_report(&snapshot, default_route.as_ref(), &options);
//! for record in &report.records {
//!     println!("{} {} {}", record.name, record.address, record.mac_address);
//! }
//!
//! // Optional wide-area checks; each probe degrades independently.
//! let connectivity = ConnectivityProber::new().probe_all(false).await;
//! println!("public IP: {}", connectivity.public_ip_display());
//! ```
//!
//! Probe failures never abort a run: every section of the report degrades
//! to an explicit placeholder instead.

mod error;

pub mod classify;
pub mod interface;
pub mod probe;
pub mod report;
pub mod route;

pub use error::{NetscopeError, Result};

// Re-export commonly used types at the crate root
pub use interface::{
    GatewayInfo, Ipv4Binding, Ipv6Binding, MacAddress, SystemInterface, default_gateway,
};
pub use probe::{ConnectivityProber, ConnectivityReport, DnsServers, ping_host};
pub use report::{InterfaceRecord, InterfaceReport, ReportOptions, build_report};
pub use route::DefaultRouteInfo;
